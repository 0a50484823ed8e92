//! Gossip - portable conversation-context records for AI system interop
//!
//! Gossip defines a portable record format for moving conversational
//! context between independent AI systems. A [`Record`] captures the topic,
//! a human-written summary, key points, open questions, attachments and a
//! continuation instruction; from a validated record the crate derives two
//! representations: the canonical versioned JSON wire form and a
//! human-readable text view (optionally wrapped as a target-specific resume
//! prompt) meant to be pasted straight into another system's chat box.
//!
//! ```no_run
//! use gossip::{Record, SourceAi};
//!
//! let record = Record::builder("AI Ethics", "First.\n\nSecond.\n\nThird.")
//!     .source_ai(SourceAi::Claude)
//!     .key_point("Agreed on scope")
//!     .open_question("Timeline?")
//!     .build();
//!
//! let json = gossip::wire::serialize(&record)?;
//! let text = gossip::render::render(&record);
//! # Ok::<(), gossip::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`record`]: the canonical in-memory model and builder
//! - [`validate`]: well-formedness rules, fatal/warning split
//! - [`wire`]: canonical JSON serializer with version gating
//! - [`render`]: human-readable fixed-section view
//! - [`prompt`]: target-specific resume prompts
//! - [`attachment`]: embedded file model and base64 codec
//! - [`store`]: local-file persistence shell
//! - [`config`]: soft limits and creator stamping

pub mod attachment;
pub mod config;
pub mod error;
pub mod id;
pub mod prompt;
pub mod record;
pub mod render;
pub mod store;
pub mod validate;
pub mod wire;

pub use attachment::Attachment;
pub use config::GossipConfig;
pub use error::{Error, Result};
pub use prompt::{generate_prompt, PromptTarget};
pub use record::{Record, RecordBuilder, RecordStats, SourceAi, FORMAT_VERSION};
pub use render::render;
pub use validate::{validate, ValidationIssue};
