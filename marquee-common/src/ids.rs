//! Identifier utilities

use uuid::Uuid;

/// Generate a fallback identifier for a record that has not been
/// confirmed persisted by the server.
///
/// Fallback identifiers exist only so unsaved entities can be addressed
/// and displayed; the server assigns the durable identifier on create.
pub fn fallback_id() -> String {
    Uuid::new_v4().to_string()
}
