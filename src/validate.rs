//! Record validation
//!
//! Validation never throws: it returns the full list of issues and lets the
//! caller decide what to do with warnings. The split matters because the
//! format exists for pragmatic context transfer, not strict archival
//! correctness: a thin summary is still worth pasting into a new session,
//! so it warns instead of failing, while a corrupt attachment or missing
//! topic makes the record unusable and blocks serialization.

use crate::config::GossipConfig;
use crate::error::{Error, Result};
use crate::record::Record;
use std::fmt;

/// Structural minimum for the summary: blank-line-separated paragraphs.
pub const MIN_SUMMARY_PARAGRAPHS: usize = 3;

/// How an issue affects serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Returned to the caller, never blocks
    Warning,
    /// Blocks serialization
    Fatal,
}

/// What kind of rule was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Format version major component unrecognized
    UnsupportedVersion,
    /// A required field is absent or empty after trimming
    MissingField,
    /// Summary below the structural paragraph minimum
    InsufficientContext,
    /// Attachment payload disagrees with its declared size
    CorruptAttachment,
    /// Aggregate attachment size above the soft ceiling
    LargePayload,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueKind::UnsupportedVersion => "UnsupportedVersion",
            IssueKind::MissingField => "MissingField",
            IssueKind::InsufficientContext => "InsufficientContext",
            IssueKind::CorruptAttachment => "CorruptAttachment",
            IssueKind::LargePayload => "LargePayload",
        };
        f.write_str(s)
    }
}

/// One validation finding
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    /// Which field or attachment, and what about it
    pub detail: String,
}

impl ValidationIssue {
    fn fatal(kind: IssueKind, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            kind,
            detail: detail.into(),
        }
    }

    fn warning(kind: IssueKind, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            detail: detail.into(),
        }
    }

    /// Whether this issue blocks serialization.
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

/// Whether any issue in the list is fatal.
pub fn has_fatal(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(ValidationIssue::is_fatal)
}

/// Validate a record, accumulating all content issues.
///
/// An unrecognized format version short-circuits: nothing else about the
/// record can be trusted at that point. Everything after it accumulates so
/// the caller sees the complete picture in one pass. `source_ai`
/// normalization never appears here; the enum absorbs unknown values on
/// parse.
pub fn validate(record: &Record, config: &GossipConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !version_supported(&record.format_version) {
        issues.push(ValidationIssue::fatal(
            IssueKind::UnsupportedVersion,
            format!("format version '{}'", record.format_version),
        ));
        return issues;
    }

    if record.metadata.topic.trim().is_empty() {
        issues.push(ValidationIssue::fatal(
            IssueKind::MissingField,
            "metadata.topic is empty",
        ));
    }
    if record.context.summary.trim().is_empty() {
        issues.push(ValidationIssue::fatal(
            IssueKind::MissingField,
            "context.summary is empty",
        ));
    }
    for (i, point) in record.context.key_points.iter().enumerate() {
        if point.trim().is_empty() {
            issues.push(ValidationIssue::fatal(
                IssueKind::MissingField,
                format!("context.key_points[{}] is empty", i),
            ));
        }
    }
    for (i, question) in record.context.open_questions.iter().enumerate() {
        if question.trim().is_empty() {
            issues.push(ValidationIssue::fatal(
                IssueKind::MissingField,
                format!("context.open_questions[{}] is empty", i),
            ));
        }
    }

    let paragraphs = paragraph_count(&record.context.summary);
    if paragraphs > 0 && paragraphs < MIN_SUMMARY_PARAGRAPHS {
        issues.push(ValidationIssue::warning(
            IssueKind::InsufficientContext,
            format!(
                "summary has {} paragraph(s), {} recommended",
                paragraphs, MIN_SUMMARY_PARAGRAPHS
            ),
        ));
    }

    for file in &record.files {
        if let Err(e) = file.decode() {
            issues.push(ValidationIssue::fatal(IssueKind::CorruptAttachment, e.to_string()));
        }
    }

    let total = record.total_attachment_bytes();
    if total > config.soft_ceiling_bytes {
        issues.push(ValidationIssue::warning(
            IssueKind::LargePayload,
            format!(
                "attachments total {} bytes, soft ceiling is {}",
                total, config.soft_ceiling_bytes
            ),
        ));
    }

    issues
}

/// Check that a record has no fatal issues, for use on the serialization path.
///
/// Warnings pass through here silently (the caller can run [`validate`]
/// itself to see them); fatal issues come back as [`Error::Validation`].
pub fn ensure_serializable(record: &Record) -> Result<()> {
    let fatals: Vec<_> = validate(record, &GossipConfig::default())
        .into_iter()
        .filter(ValidationIssue::is_fatal)
        .collect();

    if fatals.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(fatals))
    }
}

/// Whether a `major.minor` version string has a supported major component.
pub fn version_supported(version: &str) -> bool {
    version.split('.').next() == Some("1")
}

/// Count blank-line-separated blocks of non-blank lines.
fn paragraph_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_paragraph = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            in_paragraph = false;
        } else if !in_paragraph {
            count += 1;
            in_paragraph = true;
        }
    }
    count
}
