//! Entry normalization: default every field the builder needs, decode base64
//! bodies and split the request URL into its routing parts.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::{BodyPart, ImportError};

use super::parse::{HarBody, HarEntry, HarHeader};

const DEFAULT_METHOD: &str = "GET";
const DEFAULT_STATUS: i64 = 200;
const DEFAULT_STATUS_TEXT: &str = "OK";

/// One header line as recorded in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Message body after intake decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    /// Plain HAR text, kept as recorded.
    Text(String),
    /// Bytes decoded from a base64 body.
    Binary(Vec<u8>),
}

impl Body {
    /// Bytes as they go on the wire without charset handling (text as UTF-8).
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Empty => &[],
            Body::Text(t) => t.as_bytes(),
            Body::Binary(b) => b,
        }
    }
}

/// Routing parts of a request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTarget {
    /// Lower-case scheme, e.g. `https`.
    pub protocol: String,
    pub host: String,
    /// Explicit port, or the scheme default.
    pub port: u16,
    /// Path plus `?query` when the query is non-empty.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    pub method: String,
    pub url: String,
    pub target: ParsedTarget,
    pub request_headers: Vec<Header>,
    pub request_body: Body,
    pub status: i64,
    pub status_text: String,
    pub response_headers: Vec<Header>,
    pub response_body: Body,
    /// `content.mimeType` of the response, `""` when absent.
    pub mime_type: String,
}

/// Normalizes one loosely-typed HAR entry.
///
/// A missing `request` object or `request.url` is a `MalformedEntry`; a
/// missing `response` becomes `200 OK` with no headers and no body.
pub fn normalize(entry: &Value) -> Result<NormalizedEntry, ImportError> {
    let entry = HarEntry::deserialize(entry)
        .map_err(|e| ImportError::malformed(format!("unexpected entry shape: {e}")))?;

    let request = entry
        .request
        .ok_or_else(|| ImportError::malformed("entry has no request"))?;
    let url = request
        .url
        .ok_or_else(|| ImportError::malformed("request has no url"))?;
    let target = parse_target(&url)?;

    let request_body = decode_body(request.post_data, BodyPart::Request)?;

    let response = entry.response.unwrap_or_default();
    let mime_type = response
        .content
        .as_ref()
        .and_then(|c| c.mime_type.clone())
        .unwrap_or_default();
    let response_body = decode_body(response.content, BodyPart::Response)?;

    Ok(NormalizedEntry {
        method: request.method.unwrap_or_else(|| DEFAULT_METHOD.to_string()),
        url,
        target,
        request_headers: collect_headers(request.headers),
        request_body,
        status: response.status.unwrap_or(DEFAULT_STATUS),
        status_text: response
            .status_text
            .unwrap_or_else(|| DEFAULT_STATUS_TEXT.to_string()),
        response_headers: collect_headers(response.headers),
        response_body,
        mime_type,
    })
}

/// Splits a URL into protocol, host, port and path+query.
///
/// Port defaults to 443 for TLS schemes (`https`, `wss`) and 80 otherwise.
/// The fragment is dropped; an empty query adds no `?`.
pub fn parse_target(url: &str) -> Result<ParsedTarget, ImportError> {
    let parsed = Url::parse(url)
        .map_err(|e| ImportError::malformed(format!("unparseable url {url:?}: {e}")))?;

    let host = match parsed.host_str() {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => return Err(ImportError::malformed(format!("url {url:?} has no host"))),
    };

    let protocol = parsed.scheme().to_string();
    let port = parsed.port().unwrap_or_else(|| default_port(&protocol));

    let mut path = parsed.path().to_string();
    if path.is_empty() {
        path.push('/');
    }
    if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
        path.push('?');
        path.push_str(query);
    }

    Ok(ParsedTarget {
        protocol,
        host,
        port,
        path,
    })
}

fn default_port(protocol: &str) -> u16 {
    match protocol {
        "https" | "wss" => 443,
        _ => 80,
    }
}

fn collect_headers(headers: Option<Vec<HarHeader>>) -> Vec<Header> {
    headers
        .unwrap_or_default()
        .into_iter()
        .map(|h| Header {
            name: h.name.unwrap_or_default(),
            value: h.value.unwrap_or_default(),
        })
        .collect()
}

fn decode_body(body: Option<HarBody>, part: BodyPart) -> Result<Body, ImportError> {
    let Some(body) = body else {
        return Ok(Body::Empty);
    };
    let text = body.text.unwrap_or_default();
    if text.is_empty() {
        return Ok(Body::Empty);
    }
    if body.encoding.as_deref() != Some("base64") {
        return Ok(Body::Text(text));
    }

    // Some exporters wrap long base64 payloads.
    let compact: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(compact)
        .map(Body::Binary)
        .map_err(|source| ImportError::InvalidEncoding { part, source })
}
