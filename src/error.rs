//! Gossip error types

use crate::validate::ValidationIssue;
use thiserror::Error;

/// Gossip error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Wire form could not be parsed into the expected structure
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Format version has an unrecognized major component
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(String),

    /// Decoded attachment payload disagrees with its declared metadata
    #[error("Corrupt attachment '{name}': {detail}")]
    CorruptAttachment { name: String, detail: String },

    /// No attachment with the requested name exists on the record
    #[error("Attachment not found: {0}")]
    AttachmentNotFound(String),

    /// Fatal validation issues blocked serialization
    #[error("Validation failed: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for Gossip operations
pub type Result<T> = std::result::Result<T, Error>;
