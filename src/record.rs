//! The Gossip record model
//!
//! A [`Record`] is the canonical in-memory form of one portable
//! conversation context. Its identity (`id`, `created`) is assigned once at
//! construction and survives every save/load round trip byte-for-byte; the
//! content collections (key points, open questions, attachments,
//! continuation) may be appended to until the record is serialized.

use crate::attachment::Attachment;
use crate::error::Result;
use crate::id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current format version; the loader accepts any `1.x`.
pub const FORMAT_VERSION: &str = "1.0";

/// The AI system a conversation originated from.
///
/// An open set: unrecognized names normalize to [`SourceAi::Other`] instead
/// of failing, so new systems don't force a format version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceAi {
    Claude,
    ChatGpt,
    Gemini,
    Grok,
    #[default]
    Other,
}

impl SourceAi {
    /// Canonical lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceAi::Claude => "claude",
            SourceAi::ChatGpt => "chatgpt",
            SourceAi::Gemini => "gemini",
            SourceAi::Grok => "grok",
            SourceAi::Other => "other",
        }
    }
}

impl fmt::Display for SourceAi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceAi {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "claude" => SourceAi::Claude,
            "chatgpt" => SourceAi::ChatGpt,
            "gemini" => SourceAi::Gemini,
            "grok" => SourceAi::Grok,
            _ => SourceAi::Other,
        })
    }
}

impl Serialize for SourceAi {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceAi {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // Normalization is infallible; unknown systems become Other.
        Ok(s.parse().unwrap_or_default())
    }
}

/// Record metadata block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Conversation topic/title
    pub topic: String,
    /// Source AI system
    pub source_ai: SourceAi,
    /// Tool that created the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Opaque user identifier supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Unknown keys from newer minor versions, preserved on rewrite
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Record context block: the conversational substance being transferred
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Comprehensive conversation summary. Human-written; the validator
    /// only enforces a structural paragraph minimum.
    pub summary: String,
    /// Key decisions and facts, in chronological/importance order
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Unresolved topics, in order
    #[serde(default)]
    pub open_questions: Vec<String>,
    /// Unknown keys from newer minor versions, preserved on rewrite
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A portable conversation-context record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Format version, `major.minor`
    #[serde(rename = "version")]
    pub format_version: String,
    /// Unique identifier, assigned once at construction
    #[serde(rename = "gossip_id")]
    pub id: String,
    /// Creation timestamp (UTC), assigned once at construction
    pub created: DateTime<Utc>,
    /// Metadata block
    pub metadata: Metadata,
    /// Context block
    pub context: Context,
    /// Embedded files
    #[serde(default)]
    pub files: Vec<Attachment>,
    /// Next-step instruction for the resuming system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
    /// Unknown top-level keys from newer minor versions
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    /// Start building a record from the two required fields.
    pub fn builder(topic: impl Into<String>, summary: impl Into<String>) -> RecordBuilder {
        RecordBuilder::new(topic, summary)
    }

    /// Append a key point.
    pub fn add_key_point(&mut self, point: impl Into<String>) {
        self.context.key_points.push(point.into());
    }

    /// Append an open question.
    pub fn add_open_question(&mut self, question: impl Into<String>) {
        self.context.open_questions.push(question.into());
    }

    /// Append an attachment.
    pub fn attach(&mut self, attachment: Attachment) {
        self.files.push(attachment);
    }

    /// Set or replace the continuation instruction.
    pub fn set_continuation(&mut self, continuation: impl Into<String>) {
        self.continuation = Some(continuation.into());
    }

    /// Look up an attachment by its original filename.
    pub fn attachment(&self, name: &str) -> Option<&Attachment> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Sum of declared attachment payload sizes.
    pub fn total_attachment_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }

    /// Compute summary statistics for this record.
    ///
    /// Sizes measure the canonical forms, so a record with fatal validation
    /// issues has no stats either.
    pub fn stats(&self) -> Result<RecordStats> {
        let json_bytes = crate::wire::serialize_compact(self)?.len() as u64;
        let rendered_bytes = crate::render::render(self).len() as u64;

        Ok(RecordStats {
            id: self.id.clone(),
            topic: self.metadata.topic.clone(),
            created: self.created,
            source_ai: self.metadata.source_ai,
            key_points: self.context.key_points.len(),
            open_questions: self.context.open_questions.len(),
            files: self.files.len(),
            attachment_bytes: self.total_attachment_bytes(),
            json_bytes,
            rendered_bytes,
        })
    }
}

/// Summary statistics for one record, as shown by `gossip info`.
#[derive(Debug, Clone, Serialize)]
pub struct RecordStats {
    pub id: String,
    pub topic: String,
    pub created: DateTime<Utc>,
    pub source_ai: SourceAi,
    pub key_points: usize,
    pub open_questions: usize,
    pub files: usize,
    pub attachment_bytes: u64,
    pub json_bytes: u64,
    pub rendered_bytes: u64,
}

/// Builder for constructing [`Record`] instances
pub struct RecordBuilder {
    topic: String,
    summary: String,
    source_ai: SourceAi,
    key_points: Vec<String>,
    open_questions: Vec<String>,
    continuation: Option<String>,
    created_by: Option<String>,
    user_id: Option<String>,
    files: Vec<Attachment>,
}

impl RecordBuilder {
    /// Create a new builder with the required topic and summary.
    pub fn new(topic: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            summary: summary.into(),
            source_ai: SourceAi::Other,
            key_points: Vec::new(),
            open_questions: Vec::new(),
            continuation: None,
            created_by: None,
            user_id: None,
            files: Vec::new(),
        }
    }

    /// Set the source AI system.
    pub fn source_ai(mut self, source: SourceAi) -> Self {
        self.source_ai = source;
        self
    }

    /// Add a key point.
    pub fn key_point(mut self, point: impl Into<String>) -> Self {
        self.key_points.push(point.into());
        self
    }

    /// Add key points from an iterator.
    pub fn key_points<I, S>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_points.extend(points.into_iter().map(Into::into));
        self
    }

    /// Add an open question.
    pub fn open_question(mut self, question: impl Into<String>) -> Self {
        self.open_questions.push(question.into());
        self
    }

    /// Add open questions from an iterator.
    pub fn open_questions<I, S>(mut self, questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.open_questions
            .extend(questions.into_iter().map(Into::into));
        self
    }

    /// Set the continuation instruction.
    pub fn continuation(mut self, continuation: impl Into<String>) -> Self {
        self.continuation = Some(continuation.into());
        self
    }

    /// Record the creating tool.
    pub fn created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    /// Record an opaque user identifier.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Add an attachment.
    pub fn file(mut self, attachment: Attachment) -> Self {
        self.files.push(attachment);
        self
    }

    /// Build the record, assigning its identity and timestamp.
    pub fn build(self) -> Record {
        Record {
            format_version: FORMAT_VERSION.to_string(),
            id: id::generate(),
            created: Utc::now(),
            metadata: Metadata {
                topic: self.topic,
                source_ai: self.source_ai,
                created_by: self.created_by,
                user_id: self.user_id,
                extra: serde_json::Map::new(),
            },
            context: Context {
                summary: self.summary,
                key_points: self.key_points,
                open_questions: self.open_questions,
                extra: serde_json::Map::new(),
            },
            files: self.files,
            continuation: self.continuation,
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let record = Record::builder("Topic", "Summary").build();
        assert_eq!(record.format_version, FORMAT_VERSION);
        assert!(record.id.starts_with("gossip_"));
        assert_eq!(record.metadata.topic, "Topic");
        assert_eq!(record.metadata.source_ai, SourceAi::Other);
        assert!(record.metadata.created_by.is_none());
        assert_eq!(record.context.summary, "Summary");
        assert!(record.context.key_points.is_empty());
        assert!(record.files.is_empty());
        assert!(record.continuation.is_none());
    }

    #[test]
    fn test_builder_full() {
        let record = Record::builder("Planning", "What we discussed")
            .source_ai(SourceAi::Claude)
            .key_points(["first", "second"])
            .open_question("what next?")
            .continuation("keep going")
            .created_by("gossip-rs test")
            .user_id("u-42")
            .build();

        assert_eq!(record.context.key_points, vec!["first", "second"]);
        assert_eq!(record.context.open_questions, vec!["what next?"]);
        assert_eq!(record.continuation.as_deref(), Some("keep going"));
        assert_eq!(record.metadata.created_by.as_deref(), Some("gossip-rs test"));
        assert_eq!(record.metadata.user_id.as_deref(), Some("u-42"));
    }

    #[test]
    fn test_ids_unique_per_build() {
        let a = Record::builder("t", "s").build();
        let b = Record::builder("t", "s").build();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_append_after_build() {
        let mut record = Record::builder("t", "s").build();
        record.add_key_point("later point");
        record.add_open_question("later question");
        record.set_continuation("resume here");
        assert_eq!(record.context.key_points, vec!["later point"]);
        assert_eq!(record.context.open_questions, vec!["later question"]);
        assert_eq!(record.continuation.as_deref(), Some("resume here"));
    }

    #[test]
    fn test_source_ai_normalization() {
        assert_eq!("Claude".parse::<SourceAi>().unwrap(), SourceAi::Claude);
        assert_eq!("CHATGPT".parse::<SourceAi>().unwrap(), SourceAi::ChatGpt);
        assert_eq!("llama".parse::<SourceAi>().unwrap(), SourceAi::Other);
        assert_eq!("unknown".parse::<SourceAi>().unwrap(), SourceAi::Other);
        assert_eq!("".parse::<SourceAi>().unwrap(), SourceAi::Other);
    }

    #[test]
    fn test_source_ai_serde() {
        let json = serde_json::to_string(&SourceAi::Gemini).unwrap();
        assert_eq!(json, "\"gemini\"");

        let parsed: SourceAi = serde_json::from_str("\"some-new-system\"").unwrap();
        assert_eq!(parsed, SourceAi::Other);
    }

    #[test]
    fn test_wire_key_names() {
        let record = Record::builder("t", "s").build();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("version").is_some());
        assert!(json.get("gossip_id").is_some());
        assert!(json.get("created").is_some());
        assert!(json["metadata"].get("topic").is_some());
        assert!(json["context"].get("key_points").is_some());
        // Absent options are skipped, not written as null
        assert!(json.get("continuation").is_none());
        assert!(json["metadata"].get("created_by").is_none());
    }

    #[test]
    fn test_attachment_lookup_and_totals() {
        let mut record = Record::builder("t", "s").build();
        record.attach(crate::attachment::Attachment::encode(
            "a.txt",
            "text/plain",
            b"aaaa",
        ));
        record.attach(crate::attachment::Attachment::encode(
            "b.txt",
            "text/plain",
            b"bbbbbb",
        ));

        assert_eq!(record.total_attachment_bytes(), 10);
        assert_eq!(record.attachment("b.txt").unwrap().size_bytes, 6);
        assert!(record.attachment("c.txt").is_none());
    }

    #[test]
    fn test_stats() {
        let mut record = Record::builder("Stats", "s")
            .key_points(["a", "b", "c"])
            .open_question("q")
            .build();
        record.attach(crate::attachment::Attachment::encode(
            "f.bin",
            "application/octet-stream",
            &[1, 2, 3, 4],
        ));

        let stats = record.stats().unwrap();
        assert_eq!(stats.key_points, 3);
        assert_eq!(stats.open_questions, 1);
        assert_eq!(stats.files, 1);
        assert_eq!(stats.attachment_bytes, 4);
        assert!(stats.json_bytes > 0);
        assert!(stats.rendered_bytes > 0);
    }

    #[test]
    fn test_stats_measure_canonical_forms() {
        let record = Record::builder("Sizes", "s").build();
        let stats = record.stats().unwrap();
        assert_eq!(
            stats.json_bytes,
            crate::wire::serialize_compact(&record).unwrap().len() as u64
        );
        assert_eq!(
            stats.rendered_bytes,
            crate::render::render(&record).len() as u64
        );
    }
}
