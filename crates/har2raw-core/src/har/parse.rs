//! Lenient HAR 1.2 entry structures.
//!
//! Every field is optional so that browser-authored archives with missing or
//! `null` members still deserialize; defaults are applied by the normalizer.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct HarEntry {
    pub request: Option<HarRequest>,
    pub response: Option<HarResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarRequest {
    pub method: Option<String>,
    pub url: Option<String>,
    pub headers: Option<Vec<HarHeader>>,
    pub post_data: Option<HarBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarResponse {
    pub status: Option<i64>,
    pub status_text: Option<String>,
    pub headers: Option<Vec<HarHeader>>,
    pub content: Option<HarBody>,
}

/// `postData` on the request side, `content` on the response side.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarBody {
    pub text: Option<String>,
    pub encoding: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarHeader {
    pub name: Option<String>,
    pub value: Option<String>,
}
