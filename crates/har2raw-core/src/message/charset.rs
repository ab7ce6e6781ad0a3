//! Response body charset detection and re-encoding.
//!
//! Labels are resolved with the WHATWG label table from `encoding_rs`. When a
//! label is unknown or the bytes are malformed for it, decoding falls back to
//! ISO-8859-1, which maps every byte value 0-255 to a char and back.

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::error::ImportError;

pub const LATIN1: &str = "iso-8859-1";

/// Extracts the `charset=` parameter from a MIME type.
///
/// The token match is case-sensitive; the value ends at `;` or end of string
/// and is whitespace-trimmed. An empty value counts as absent.
pub fn charset_from_mime(mime_type: &str) -> Option<&str> {
    let (_, rest) = mime_type.split_once("charset=")?;
    let value = rest.split(';').next().unwrap_or_default().trim();
    (!value.is_empty()).then_some(value)
}

/// Charset that successfully decoded a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Whatwg(&'static Encoding),
    Latin1,
}

impl Charset {
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Whatwg(enc) => enc.name(),
            Charset::Latin1 => LATIN1,
        }
    }

    /// Encodes `text` back to bytes, or `None` if some char has no mapping
    /// (or the charset cannot be written, as with UTF-16).
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        match self {
            Charset::Whatwg(enc) => {
                if enc.output_encoding() != *enc {
                    return None;
                }
                let (bytes, _, had_unmappable) = enc.encode(text);
                (!had_unmappable).then(|| bytes.into_owned())
            }
            Charset::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<'a> {
    pub text: Cow<'a, str>,
    pub charset: Charset,
    /// True when the requested label was unknown or did not fit the bytes.
    pub fell_back: bool,
}

/// Decodes `bytes` as `label`, falling back to ISO-8859-1. Never fails.
pub fn decode<'a>(bytes: &'a [u8], label: &str) -> Decoded<'a> {
    if let Some(enc) = Encoding::for_label(label.trim().as_bytes()) {
        if let Some(text) = enc.decode_without_bom_handling_and_without_replacement(bytes) {
            return Decoded {
                text,
                charset: Charset::Whatwg(enc),
                fell_back: false,
            };
        }
        tracing::debug!("body is not valid {}; falling back to {}", enc.name(), LATIN1);
    } else {
        tracing::debug!("unknown charset {:?}; falling back to {}", label, LATIN1);
    }

    Decoded {
        text: Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
        charset: Charset::Latin1,
        fell_back: true,
    }
}

/// Decodes a binary body with `label` and reassembles it in the charset that
/// decoded it.
///
/// The original bytes are kept whenever the charset cannot write the text
/// back (UTF-16 and friends) or the round trip is not byte-exact (Big5
/// duplicates, ISO-2022-JP escape sequences), so recorded lengths still match.
pub fn reencode(bytes: &[u8], label: &str) -> Result<Vec<u8>, ImportError> {
    let decoded = decode(bytes, label);
    match (decoded.charset.encode(&decoded.text), decoded.charset) {
        (Some(out), _) if out == bytes => Ok(out),
        (Some(_), cs) => {
            tracing::debug!("{} round trip altered the body; keeping original bytes", cs.name());
            Ok(bytes.to_vec())
        }
        (None, Charset::Whatwg(_)) => Ok(bytes.to_vec()),
        (None, Charset::Latin1) => Err(ImportError::CharsetDecode {
            charset: LATIN1.to_string(),
        }),
    }
}

/// Encodes HAR text into `label` when every char is representable there,
/// else into UTF-8.
pub fn encode_text(text: &str, label: &str) -> Vec<u8> {
    Encoding::for_label(label.trim().as_bytes())
        .map(Charset::Whatwg)
        .and_then(|cs| cs.encode(text))
        .unwrap_or_else(|| text.as_bytes().to_vec())
}
