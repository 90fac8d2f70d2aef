//! Identifier generation.
//!
//! IDs are UUID v7 strings: a 48-bit millisecond timestamp followed by random
//! bits. They sort roughly by creation time and need no shared counter.
//!
//! IDs are kept as plain `String`s in the model so documents produced elsewhere
//! (with any id format) import unchanged.

use uuid::Uuid;

/// Returns a new unique identifier.
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}
