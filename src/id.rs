//! Gossip record identifier generation
//!
//! Identifiers are `gossip_` followed by the first 12 hex characters of a
//! random UUIDv4, which keeps them short enough to read aloud while still
//! unique with overwhelming probability across machines.

use uuid::Uuid;

/// Prefix shared by every generated record identifier
pub const ID_PREFIX: &str = "gossip_";

/// Generate a new record identifier.
pub fn generate() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", ID_PREFIX, &hex[..12])
}
