//! Canonical wire form
//!
//! The wire form is a fixed-key JSON layout versioned by `version`. The
//! loader gates on the major component before structural deserialization so
//! a future-major file fails with `UnsupportedVersion` rather than a
//! misleading parse error. Unknown keys at any nesting level survive a
//! read-modify-write cycle via the records' flattened side maps.

use crate::error::{Error, Result};
use crate::record::Record;
use crate::validate;

/// Serialize a record to pretty canonical JSON.
///
/// Fatal validation issues block serialization; warnings do not (run
/// [`validate::validate`] first to collect them).
pub fn serialize(record: &Record) -> Result<String> {
    validate::ensure_serializable(record)?;
    Ok(serde_json::to_string_pretty(record)?)
}

/// Serialize a record to compact canonical JSON.
pub fn serialize_compact(record: &Record) -> Result<String> {
    validate::ensure_serializable(record)?;
    Ok(serde_json::to_string(record)?)
}

/// Deserialize a record from canonical JSON.
pub fn deserialize(text: &str) -> Result<Record> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| Error::MalformedInput(e.to_string()))?;

    let version = value
        .get("version")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::MalformedInput("missing or non-string 'version' key".to_string()))?;

    if !validate::version_supported(version) {
        return Err(Error::UnsupportedVersion(version.to_string()));
    }

    let record: Record =
        serde_json::from_value(value).map_err(|e| Error::MalformedInput(e.to_string()))?;

    tracing::debug!(id = %record.id, "deserialized record");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::Attachment;
    use crate::record::{Record, SourceAi};

    const SUMMARY: &str = "Para one.\n\nPara two.\n\nPara three.";

    fn sample_record() -> Record {
        let mut record = Record::builder("Wire test", SUMMARY)
            .source_ai(SourceAi::Claude)
            .key_points(["alpha", "beta"])
            .open_question("gamma?")
            .continuation("resume with delta")
            .created_by("gossip-rs test")
            .build();
        record.attach(Attachment::encode("notes.txt", "text/plain", b"attached bytes"));
        record
    }

    #[test]
    fn test_round_trip_field_for_field() {
        let record = sample_record();
        let json = serialize(&record).unwrap();
        let reloaded = deserialize(&json).unwrap();

        assert_eq!(reloaded, record);
        // Identity survives the trip untouched
        assert_eq!(reloaded.id, record.id);
        assert_eq!(reloaded.created, record.created);
        // And attachment bytes decode identically
        assert_eq!(
            reloaded.files[0].decode().unwrap(),
            record.files[0].decode().unwrap()
        );
    }

    #[test]
    fn test_compact_round_trip() {
        let record = sample_record();
        let reloaded = deserialize(&serialize_compact(&record).unwrap()).unwrap();
        assert_eq!(reloaded, record);
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let record = sample_record();
        let mut value: serde_json::Value =
            serde_json::from_str(&serialize(&record).unwrap()).unwrap();
        value["version"] = "1.1".into();
        value["future_field"] = "kept".into();
        value["metadata"]["future_meta"] = 7.into();
        value["context"]["future_ctx"] = true.into();

        let reloaded = deserialize(&value.to_string()).unwrap();
        assert_eq!(reloaded.extra["future_field"], "kept");
        assert_eq!(reloaded.metadata.extra["future_meta"], 7);
        assert_eq!(reloaded.context.extra["future_ctx"], true);

        // A rewrite keeps them on the wire
        let rewritten = serialize(&reloaded).unwrap();
        assert!(rewritten.contains("future_field"));
        assert!(rewritten.contains("future_meta"));
    }

    #[test]
    fn test_unknown_major_rejected() {
        let mut value: serde_json::Value =
            serde_json::from_str(&serialize(&sample_record()).unwrap()).unwrap();
        value["version"] = "2.0".into();

        match deserialize(&value.to_string()) {
            Err(Error::UnsupportedVersion(v)) => assert_eq!(v, "2.0"),
            other => panic!("expected UnsupportedVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_same_major_minor_bump_accepted() {
        let mut value: serde_json::Value =
            serde_json::from_str(&serialize(&sample_record()).unwrap()).unwrap();
        value["version"] = "1.1".into();

        let record = deserialize(&value.to_string()).unwrap();
        assert_eq!(record.format_version, "1.1");
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            deserialize("{ not json"),
            Err(Error::MalformedInput(_))
        ));
        // Valid JSON, wrong shape
        assert!(matches!(
            deserialize("{\"version\": \"1.0\"}"),
            Err(Error::MalformedInput(_))
        ));
        // Missing version key
        assert!(matches!(
            deserialize("{\"gossip_id\": \"gossip_abc\"}"),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn test_fatal_validation_blocks_serialization() {
        let mut record = sample_record();
        record.metadata.topic = String::new();

        match serialize(&record) {
            Err(Error::Validation(issues)) => assert!(!issues.is_empty()),
            other => panic!("expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_warnings_do_not_block_serialization() {
        let mut record = sample_record();
        record.context.summary = "thin".to_string();
        assert!(serialize(&record).is_ok());
    }
}
