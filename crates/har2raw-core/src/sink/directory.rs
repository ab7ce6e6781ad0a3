//! Sink that writes each pair as raw files plus a JSON-lines manifest.
//!
//! Layout under the output directory:
//! - `00001.request.http`, `00001.response.http`, ...
//! - `manifest.jsonl`, one record per pair with its service and file names.
//!
//! Re-opening an existing directory continues the numbering after the last
//! manifest record.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::message::HttpService;

use super::Sink;

pub const MANIFEST_FILE: &str = "manifest.jsonl";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub seq: u64,
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub request_file: String,
    pub response_file: String,
}

#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    next_seq: u64,
}

impl DirectorySink {
    /// Opens (creating if needed) an output directory.
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).with_context(|| format!("create dir: {}", dir.display()))?;
        let manifest = dir.join(MANIFEST_FILE);
        let existing = match fs::read_to_string(&manifest) {
            Ok(s) => s.lines().filter(|l| !l.trim().is_empty()).count() as u64,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                return Err(e).with_context(|| format!("read manifest: {}", manifest.display()))
            }
        };
        Ok(Self {
            dir: dir.to_path_buf(),
            next_seq: existing + 1,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads back every manifest record in write order.
    pub fn read_manifest(dir: &Path) -> Result<Vec<ManifestRecord>> {
        let path = dir.join(MANIFEST_FILE);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("read manifest: {}", path.display()))?;
        data.lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).context("parse manifest record"))
            .collect()
    }
}

impl Sink for DirectorySink {
    fn add(&mut self, service: &HttpService, request: &[u8], response: &[u8]) -> Result<()> {
        let seq = self.next_seq;
        let record = ManifestRecord {
            seq,
            protocol: service.protocol.clone(),
            host: service.host.clone(),
            port: service.port,
            request_file: format!("{seq:05}.request.http"),
            response_file: format!("{seq:05}.response.http"),
        };

        let request_path = self.dir.join(&record.request_file);
        fs::write(&request_path, request)
            .with_context(|| format!("write request: {}", request_path.display()))?;
        let response_path = self.dir.join(&record.response_file);
        fs::write(&response_path, response)
            .with_context(|| format!("write response: {}", response_path.display()))?;

        let manifest = self.dir.join(MANIFEST_FILE);
        let mut line = serde_json::to_string(&record).context("serialize manifest record")?;
        line.push('\n');
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&manifest)
            .and_then(|mut f| f.write_all(line.as_bytes()))
            .with_context(|| format!("append manifest: {}", manifest.display()))?;

        self.next_seq += 1;
        tracing::debug!(seq, %service, "wrote message pair");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(host: &str) -> HttpService {
        HttpService {
            host: host.to_string(),
            port: 80,
            protocol: "http".to_string(),
        }
    }

    #[test]
    fn writes_files_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::create(dir.path()).unwrap();
        sink.add(&service("a.test"), b"GET / HTTP/1.1\r\n\r\n", b"HTTP/1.1 200 OK\r\n\r\n")
            .unwrap();

        let req = fs::read(dir.path().join("00001.request.http")).unwrap();
        assert_eq!(req, b"GET / HTTP/1.1\r\n\r\n");
        let records = DirectorySink::read_manifest(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq, 1);
        assert_eq!(records[0].host, "a.test");
        assert_eq!(records[0].response_file, "00001.response.http");
    }

    #[test]
    fn reopening_continues_numbering() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut sink = DirectorySink::create(dir.path()).unwrap();
            sink.add(&service("a.test"), b"1", b"1").unwrap();
            sink.add(&service("b.test"), b"2", b"2").unwrap();
        }
        let mut sink = DirectorySink::create(dir.path()).unwrap();
        sink.add(&service("c.test"), b"3", b"3").unwrap();

        let records = DirectorySink::read_manifest(dir.path()).unwrap();
        let seqs: Vec<u64> = records.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert!(dir.path().join("00003.request.http").exists());
    }

    #[test]
    fn unwritable_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::create(dir.path()).unwrap();
        // A directory where the request file should go makes the write fail.
        fs::create_dir(dir.path().join("00001.request.http")).unwrap();
        assert!(sink.add(&service("a.test"), b"x", b"y").is_err());
    }
}
