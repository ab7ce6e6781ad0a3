//! `har2raw show <path> <index>` – print one rebuilt entry to stdout.

use anyhow::{Context, Result};
use har2raw_core::config::Har2RawConfig;
use har2raw_core::har::HarArchive;
use har2raw_core::import::convert;
use har2raw_core::BuiltMessage;
use std::io::Write;
use std::path::Path;

use super::entry_at;

pub fn run_show(cfg: &Har2RawConfig, path: &Path, index: usize) -> Result<()> {
    let archive = HarArchive::load(path)?;
    let entry = entry_at(&archive, index)?;
    let built = convert(entry, &cfg.build_options())
        .with_context(|| format!("entry #{index}"))?;

    let mut out = std::io::stdout().lock();
    write_message(&mut out, &built)?;
    out.flush()?;
    Ok(())
}

/// Service comment line, raw request, `# response` marker, raw response.
fn write_message<W: Write>(out: &mut W, built: &BuiltMessage) -> Result<()> {
    writeln!(out, "# {}", built.service)?;
    out.write_all(&built.request)?;
    writeln!(out)?;
    writeln!(out, "# response")?;
    out.write_all(&built.response)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use har2raw_core::BuildOptions;
    use serde_json::json;

    #[test]
    fn show_prints_service_then_both_messages() {
        let entry = json!({
            "request": { "url": "https://a.test/x?y=1" },
            "response": {
                "status": 201,
                "statusText": "Created",
                "content": { "text": "ok", "mimeType": "text/plain" }
            }
        });
        let built = convert(&entry, &BuildOptions::default()).unwrap();

        let mut buf = Vec::new();
        write_message(&mut buf, &built).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "# https://a.test:443\n\
             GET /x?y=1 HTTP/1.1\r\nHost: a.test\r\n\r\n\n\
             # response\n\
             HTTP/1.1 201 Created\r\n\r\nok\n"
        );
    }

    #[test]
    fn show_rejects_out_of_range_index() {
        let mut har = tempfile::NamedTempFile::new().unwrap();
        har.write_all(br#"{"log":{"entries":[{"request":{"url":"http://a.test/"}}]}}"#)
            .unwrap();
        har.flush().unwrap();
        assert!(run_show(&Har2RawConfig::default(), har.path(), 2).is_err());
        assert!(run_show(&Har2RawConfig::default(), har.path(), 0).is_err());
    }
}
