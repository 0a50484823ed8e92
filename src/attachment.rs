//! Attachment model and payload codec
//!
//! Attachments travel inside the record as base64 text so the wire form
//! stays valid UTF-8 end to end. The declared `size` field is the single
//! integrity check protecting the round-trip guarantee: decoding verifies
//! the payload length against it and refuses to return truncated bytes.

use crate::error::{Error, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Identifier of the payload encoding scheme; the only supported value.
pub const ENCODING: &str = "base64";

/// One embedded file carried by a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original filename. Not re-validated for path safety here; callers
    /// persisting attachments to a filesystem must sanitize it themselves.
    pub name: String,
    /// MIME type of the decoded payload
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Decoded payload length in bytes
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// Payload encoding scheme (always `base64`)
    pub encoding: String,
    /// Encoded payload
    pub data: String,
    /// Unknown keys from newer minor versions, preserved on rewrite
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Attachment {
    /// Encode raw bytes into an attachment.
    pub fn encode(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            encoding: ENCODING.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            extra: serde_json::Map::new(),
        }
    }

    /// Decode the payload, verifying it matches the declared size.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| Error::CorruptAttachment {
                name: self.name.clone(),
                detail: format!("invalid base64 payload: {}", e),
            })?;

        if bytes.len() as u64 != self.size_bytes {
            return Err(Error::CorruptAttachment {
                name: self.name.clone(),
                detail: format!(
                    "declared {} bytes but payload decodes to {}",
                    self.size_bytes,
                    bytes.len()
                ),
            });
        }

        Ok(bytes)
    }

    /// Human-formatted payload size, e.g. `3.2 KB`.
    pub fn size_display(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }
}

/// Detect a MIME type from a file extension, defaulting to octet-stream.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        Some("html") => "text/html",
        Some("xml") => "text/xml",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("py") => "text/x-python",
        Some("js") => "text/javascript",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}
