//! Shared HAR fixtures for integration tests.

use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

/// A capture with a mix of typical browser entries:
/// 1. GET with explicit Host header and gzip'd-style binary body
/// 2. POST with base64 body and no Host
/// 3. entry with an unparseable url
/// 4. latin-1 page recorded as text
pub fn mixed_capture() -> Value {
    json!({
        "log": {
            "version": "1.2",
            "creator": { "name": "fixture", "version": "1" },
            "entries": [
                {
                    "request": {
                        "method": "GET",
                        "url": "https://shop.example.com/cart?id=7",
                        "headers": [
                            { "name": "host", "value": "shop.example.com" },
                            { "name": "Accept", "value": "text/html" }
                        ]
                    },
                    "response": {
                        "status": 200,
                        "statusText": "OK",
                        "headers": [ { "name": "Content-Type", "value": "application/octet-stream" } ],
                        "content": { "size": 4, "mimeType": "application/octet-stream", "text": "AP+AgQ==", "encoding": "base64" }
                    }
                },
                {
                    "request": {
                        "method": "POST",
                        "url": "http://api.example.com:8080/login",
                        "headers": [ { "name": "Content-Type", "value": "text/plain" } ],
                        "postData": { "mimeType": "text/plain", "text": "aGVsbG8=", "encoding": "base64" }
                    },
                    "response": { "status": 302, "statusText": "Found", "headers": [ { "name": "Location", "value": "/home" } ] }
                },
                {
                    "request": { "method": "GET", "url": "http//missing-colon.example.com/", "headers": [] },
                    "response": { "status": 200, "statusText": "OK", "headers": [] }
                },
                {
                    "request": { "method": "GET", "url": "http://old.example.com/", "headers": [] },
                    "response": {
                        "status": 200,
                        "statusText": "OK",
                        "headers": [],
                        "content": { "size": 4, "mimeType": "text/html; charset=ISO-8859-1", "text": "café" }
                    }
                }
            ]
        }
    })
}

pub fn write_har(doc: &Value) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(serde_json::to_string_pretty(doc).unwrap().as_bytes())
        .unwrap();
    f.flush().unwrap();
    f
}
