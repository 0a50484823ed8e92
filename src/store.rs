//! File persistence shell
//!
//! The core is transport-agnostic; this module is the local-file boundary
//! the CLI drives. Saves go through a sibling temp file and an atomic
//! rename, so a failed write never leaves a partial file behind as the
//! final artifact. Any external encryption wrapper applies outside this
//! layer; the store only ever sees plain canonical text.

use crate::attachment::{self, Attachment};
use crate::config::GossipConfig;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::{render, validate, wire};
use std::path::{Path, PathBuf};

/// On-disk representation to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Canonical JSON (`.gossip` / `.json`)
    Json,
    /// Human-readable text (`.txt`)
    Txt,
}

/// Save a record, returning the path actually written.
///
/// A missing or foreign extension is replaced with the format's default.
/// JSON is pretty-printed unless the config says otherwise. Fatal
/// validation issues block both formats.
pub fn save(
    record: &Record,
    path: &Path,
    format: OutputFormat,
    config: &GossipConfig,
) -> Result<PathBuf> {
    let content = match format {
        OutputFormat::Json if config.pretty => wire::serialize(record)?,
        OutputFormat::Json => wire::serialize_compact(record)?,
        OutputFormat::Txt => {
            // Same fatal gate as the canonical form
            validate::ensure_serializable(record)?;
            render::render(record)
        }
    };

    let path = normalize_extension(path, format);
    write_atomic(&path, content.as_bytes())?;

    tracing::info!(id = %record.id, path = %path.display(), bytes = content.len(), "saved record");
    Ok(path)
}

/// Load a record from a canonical JSON file.
pub fn load(path: &Path) -> Result<Record> {
    let content = std::fs::read_to_string(path)?;
    wire::deserialize(&content)
}

/// Read a file from disk and append it to the record as an attachment.
pub fn attach_file<'a>(record: &'a mut Record, path: &Path) -> Result<&'a Attachment> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path has no usable filename: {}", path.display()),
            ))
        })?
        .to_string();

    let bytes = std::fs::read(path)?;
    let mime_type = attachment::mime_type_for(path);
    record.attach(Attachment::encode(name, mime_type, &bytes));

    let attached = record.files.last().expect("just pushed");
    tracing::debug!(name = %attached.name, bytes = attached.size_bytes, "attached file");
    Ok(attached)
}

/// Decode a named attachment and write its bytes out.
///
/// The output may be a target path or an existing directory, in which case
/// the attachment's own name is used inside it. Without an output the name
/// is used relative to the current directory.
pub fn extract_file(record: &Record, name: &str, output: Option<&Path>) -> Result<PathBuf> {
    let attachment = record
        .attachment(name)
        .ok_or_else(|| Error::AttachmentNotFound(name.to_string()))?;

    let bytes = attachment.decode()?;
    let path = match output {
        Some(p) if p.is_dir() => p.join(name),
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(name),
    };
    std::fs::write(&path, &bytes)?;

    tracing::info!(name, path = %path.display(), bytes = bytes.len(), "extracted attachment");
    Ok(path)
}

fn normalize_extension(path: &Path, format: OutputFormat) -> PathBuf {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let keep = match format {
        OutputFormat::Json => matches!(ext.as_deref(), Some("gossip") | Some("json")),
        OutputFormat::Txt => matches!(ext.as_deref(), Some("txt")),
    };
    if keep {
        return path.to_path_buf();
    }

    let mut path = path.to_path_buf();
    path.set_extension(match format {
        OutputFormat::Json => "gossip",
        OutputFormat::Txt => "txt",
    });
    path
}

/// Write via temp file + rename so the target is never partially written.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    std::fs::write(&tmp, content)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Record, SourceAi};
    use tempfile::TempDir;

    const SUMMARY: &str = "First.\n\nSecond.\n\nThird.";

    fn sample_record() -> Record {
        Record::builder("Store test", SUMMARY)
            .source_ai(SourceAi::Grok)
            .key_point("persisted")
            .open_question("reloaded?")
            .build()
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let record = sample_record();

        let path = save(&record, &dir.path().join("ctx.gossip"), OutputFormat::Json, &GossipConfig::default()).unwrap();
        let reloaded = load(&path).unwrap();

        assert_eq!(reloaded, record);
        assert_eq!(reloaded.id, record.id);
        assert_eq!(reloaded.created, record.created);
    }

    #[test]
    fn test_save_appends_extension() {
        let dir = TempDir::new().unwrap();
        let record = sample_record();

        let path = save(&record, &dir.path().join("ctx"), OutputFormat::Json, &GossipConfig::default()).unwrap();
        assert_eq!(path.extension().unwrap(), "gossip");

        let path = save(&record, &dir.path().join("ctx2.json"), OutputFormat::Json, &GossipConfig::default()).unwrap();
        assert_eq!(path.extension().unwrap(), "json");

        let path = save(&record, &dir.path().join("ctx"), OutputFormat::Txt, &GossipConfig::default()).unwrap();
        assert_eq!(path.extension().unwrap(), "txt");
    }

    #[test]
    fn test_save_compact_json() {
        let dir = TempDir::new().unwrap();
        let record = sample_record();
        let config = GossipConfig {
            pretty: false,
            ..Default::default()
        };

        let path = save(&record, &dir.path().join("compact.gossip"), OutputFormat::Json, &config).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);

        // Compact form is the same canonical record
        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded, record);
    }

    #[test]
    fn test_save_txt_writes_rendered_view() {
        let dir = TempDir::new().unwrap();
        let record = sample_record();

        let path = save(&record, &dir.path().join("view.txt"), OutputFormat::Txt, &GossipConfig::default()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, crate::render::render(&record));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        save(&sample_record(), &dir.path().join("a.gossip"), OutputFormat::Json, &GossipConfig::default()).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["a.gossip"]);
    }

    #[test]
    fn test_save_invalid_record_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut record = sample_record();
        record.metadata.topic = String::new();

        let result = save(
            &record,
            &dir.path().join("bad.gossip"),
            OutputFormat::Json,
            &GossipConfig::default(),
        );
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load(&dir.path().join("nope.gossip")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_attach_and_extract_round_trip() {
        let dir = TempDir::new().unwrap();
        let payload = b"attachment payload bytes";
        let src = dir.path().join("input.txt");
        std::fs::write(&src, payload).unwrap();

        let mut record = sample_record();
        {
            let attached = attach_file(&mut record, &src).unwrap();
            assert_eq!(attached.name, "input.txt");
            assert_eq!(attached.mime_type, "text/plain");
            assert_eq!(attached.size_bytes, payload.len() as u64);
        }

        // Through a full save/load cycle, then back out to disk
        let path = save(&record, &dir.path().join("with-file.gossip"), OutputFormat::Json, &GossipConfig::default()).unwrap();
        let reloaded = load(&path).unwrap();

        let out = dir.path().join("extracted.txt");
        extract_file(&reloaded, "input.txt", Some(&out)).unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), payload);
    }

    #[test]
    fn test_extract_into_directory() {
        let dir = TempDir::new().unwrap();
        let mut record = sample_record();
        record.attach(crate::attachment::Attachment::encode(
            "report.txt",
            "text/plain",
            b"directory target",
        ));

        let out = extract_file(&record, "report.txt", Some(dir.path())).unwrap();
        assert_eq!(out, dir.path().join("report.txt"));
        assert_eq!(std::fs::read(&out).unwrap(), b"directory target");
    }

    #[test]
    fn test_extract_unknown_attachment() {
        let record = sample_record();
        assert!(matches!(
            extract_file(&record, "missing.txt", None),
            Err(Error::AttachmentNotFound(_))
        ));
    }
}
