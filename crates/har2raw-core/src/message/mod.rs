//! HTTP/1.1 message assembly from normalized entries.
//!
//! Both messages use the same framing: start line, CRLF, header lines joined
//! by CRLF, a blank line, then the body bytes.

pub mod charset;

use std::fmt;

use crate::error::ImportError;
use crate::har::{Body, Header, NormalizedEntry};

pub const CRLF: &str = "\r\n";
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Destination of a rebuilt message pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpService {
    pub host: String,
    pub port: u16,
    pub protocol: String,
}

impl fmt::Display for HttpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// Raw request/response bytes plus where they were sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltMessage {
    pub service: HttpService,
    pub request: Vec<u8>,
    pub response: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Decode the response body with its declared charset (ISO-8859-1 as the
    /// fallback) and re-encode it. When off, body bytes are appended as-is.
    pub reencode_response_body: bool,
    /// Charset used when the response MIME type declares none.
    pub default_charset: String,
    /// Skip HTTP/2 pseudo-headers (`:authority`, `:path`, ...) that browsers
    /// record but HTTP/1.1 cannot carry. Off by default so headers come out
    /// exactly as recorded.
    pub drop_pseudo_headers: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            reencode_response_body: true,
            default_charset: DEFAULT_CHARSET.to_string(),
            drop_pseudo_headers: false,
        }
    }
}

/// Builds the request/response pair for one normalized entry.
pub fn build(
    entry: &NormalizedEntry,
    options: &BuildOptions,
) -> Result<BuiltMessage, ImportError> {
    let request = build_request(entry, options);
    let response = build_response(entry, options)?;
    Ok(BuiltMessage {
        service: HttpService {
            host: entry.target.host.clone(),
            port: entry.target.port,
            protocol: entry.target.protocol.clone(),
        },
        request,
        response,
    })
}

/// `METHOD PATH HTTP/1.1` plus headers, with `Host` synthesized first when the
/// entry has none.
pub fn build_request(entry: &NormalizedEntry, options: &BuildOptions) -> Vec<u8> {
    let start_line = format!("{} {} HTTP/1.1", entry.method, entry.target.path);

    let mut lines = header_lines(&entry.request_headers, options);
    let has_host = entry
        .request_headers
        .iter()
        .any(|h| h.name.eq_ignore_ascii_case("host"));
    if !has_host {
        lines.insert(0, format!("Host: {}", entry.target.host));
    }

    frame(&start_line, &lines, entry.request_body.as_bytes())
}

/// `HTTP/1.1 STATUS TEXT` plus headers and the (optionally re-encoded) body.
pub fn build_response(
    entry: &NormalizedEntry,
    options: &BuildOptions,
) -> Result<Vec<u8>, ImportError> {
    let start_line = format!("HTTP/1.1 {} {}", entry.status, entry.status_text);
    let lines = header_lines(&entry.response_headers, options);
    let body = response_body(entry, options)?;
    Ok(frame(&start_line, &lines, &body))
}

fn response_body(
    entry: &NormalizedEntry,
    options: &BuildOptions,
) -> Result<Vec<u8>, ImportError> {
    if !options.reencode_response_body {
        return Ok(entry.response_body.as_bytes().to_vec());
    }

    let label = charset::charset_from_mime(&entry.mime_type)
        .unwrap_or(options.default_charset.as_str());
    match &entry.response_body {
        Body::Empty => Ok(Vec::new()),
        Body::Text(text) => Ok(charset::encode_text(text, label)),
        Body::Binary(bytes) => charset::reencode(bytes, label),
    }
}

fn header_lines(headers: &[Header], options: &BuildOptions) -> Vec<String> {
    headers
        .iter()
        .filter(|h| !(options.drop_pseudo_headers && h.name.starts_with(':')))
        .map(|h| format!("{}: {}", h.name, h.value))
        .collect()
}

/// With no header lines the start line is followed directly by the blank line
/// (`start CRLF CRLF`), not by an extra CRLF; the extra one would read as body.
fn frame(start_line: &str, header_lines: &[String], body: &[u8]) -> Vec<u8> {
    let head = if header_lines.is_empty() {
        format!("{start_line}{CRLF}{CRLF}")
    } else {
        format!("{start_line}{CRLF}{}{CRLF}{CRLF}", header_lines.join(CRLF))
    };
    let mut out = Vec::with_capacity(head.len() + body.len());
    out.extend_from_slice(head.as_bytes());
    out.extend_from_slice(body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::normalize;
    use serde_json::json;

    fn build_default(entry: serde_json::Value) -> BuiltMessage {
        build(&normalize(&entry).unwrap(), &BuildOptions::default()).unwrap()
    }

    fn text(bytes: &[u8]) -> &str {
        std::str::from_utf8(bytes).unwrap()
    }

    #[test]
    fn host_is_synthesized_first_when_absent() {
        let msg = build_default(json!({
            "request": {
                "method": "GET",
                "url": "https://example.com:8443/a?b=1",
                "headers": [ { "name": "Accept", "value": "*/*" } ]
            }
        }));
        assert_eq!(
            text(&msg.request),
            "GET /a?b=1 HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n"
        );
        assert_eq!(msg.service.port, 8443);
        assert_eq!(msg.service.to_string(), "https://example.com:8443");
    }

    #[test]
    fn existing_host_in_any_case_is_kept_in_place() {
        for name in ["Host", "host", "HOST"] {
            let msg = build_default(json!({
                "request": {
                    "url": "http://example.com/",
                    "headers": [
                        { "name": "Accept", "value": "*/*" },
                        { "name": name, "value": "other.test" }
                    ]
                }
            }));
            assert_eq!(
                text(&msg.request),
                format!("GET / HTTP/1.1\r\nAccept: */*\r\n{name}: other.test\r\n\r\n")
            );
        }
    }

    #[test]
    fn empty_headers_still_frame_correctly() {
        let msg = build_default(json!({ "request": { "url": "http://x.com/p" } }));
        assert_eq!(text(&msg.request), "GET /p HTTP/1.1\r\nHost: x.com\r\n\r\n");
        assert_eq!(text(&msg.response), "HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn base64_request_body_follows_blank_line() {
        let msg = build_default(json!({
            "request": {
                "method": "POST",
                "url": "http://x.com/up",
                "postData": { "text": "aGVsbG8=", "encoding": "base64" }
            }
        }));
        assert!(msg.request.ends_with(b"\r\n\r\nhello"));
    }

    #[test]
    fn response_status_line_and_headers() {
        let msg = build_default(json!({
            "request": { "url": "http://x.com/" },
            "response": {
                "status": 404,
                "statusText": "Not Found",
                "headers": [ { "name": "Content-Type", "value": "text/plain" } ],
                "content": { "text": "nope", "mimeType": "text/plain" }
            }
        }));
        assert_eq!(
            text(&msg.response),
            "HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\n\r\nnope"
        );
    }

    #[test]
    fn response_never_gets_a_host_header() {
        let msg = build_default(json!({ "request": { "url": "http://x.com/" }, "response": {} }));
        assert!(!text(&msg.response).contains("Host:"));
    }

    #[test]
    fn bogus_charset_keeps_binary_body() {
        let body: Vec<u8> = (0u8..=255).collect();
        use base64::Engine as _;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&body);
        let msg = build_default(json!({
            "request": { "url": "http://x.com/" },
            "response": {
                "content": {
                    "text": encoded,
                    "encoding": "base64",
                    "mimeType": "text/html; charset=bogus-charset"
                }
            }
        }));
        assert!(msg.response.ends_with(&body));
    }

    #[test]
    fn declared_latin1_text_body_is_encoded() {
        let msg = build_default(json!({
            "request": { "url": "http://x.com/" },
            "response": { "content": { "text": "café", "mimeType": "text/plain; charset=iso-8859-1" } }
        }));
        assert!(msg.response.ends_with(&[b'c', b'a', b'f', 0xe9]));
    }

    #[test]
    fn reencode_off_appends_text_as_utf8() {
        let entry = normalize(&json!({
            "request": { "url": "http://x.com/" },
            "response": { "content": { "text": "café", "mimeType": "text/plain; charset=iso-8859-1" } }
        }))
        .unwrap();
        let opts = BuildOptions {
            reencode_response_body: false,
            ..BuildOptions::default()
        };
        let msg = build(&entry, &opts).unwrap();
        assert!(msg.response.ends_with("café".as_bytes()));
    }

    #[test]
    fn pseudo_headers_are_kept_unless_dropped() {
        let raw = json!({
            "request": {
                "url": "https://x.com/",
                "headers": [
                    { "name": ":authority", "value": "x.com" },
                    { "name": ":method", "value": "GET" },
                    { "name": "accept", "value": "*/*" }
                ]
            }
        });
        let msg = build_default(raw.clone());
        assert_eq!(
            text(&msg.request),
            "GET / HTTP/1.1\r\nHost: x.com\r\n:authority: x.com\r\n:method: GET\r\naccept: */*\r\n\r\n"
        );

        let drop = BuildOptions {
            drop_pseudo_headers: true,
            ..BuildOptions::default()
        };
        let msg = build(&normalize(&raw).unwrap(), &drop).unwrap();
        assert_eq!(
            text(&msg.request),
            "GET / HTTP/1.1\r\nHost: x.com\r\naccept: */*\r\n\r\n"
        );
    }

    #[test]
    fn building_twice_is_byte_identical() {
        let raw = json!({
            "request": {
                "method": "PUT",
                "url": "https://x.com/item/1",
                "headers": [ { "name": "Content-Type", "value": "application/json" } ],
                "postData": { "text": "{\"a\":1}" }
            },
            "response": { "status": 204, "statusText": "No Content" }
        });
        assert_eq!(build_default(raw.clone()), build_default(raw));
    }
}
