//! Errors raised while turning stored payloads into description dictionaries.
//!
//! An unknown event or action is not an error: lookups report it as `None`.
//! Load-time failures (I/O, malformed JSON) live in `wh-store`.

use thiserror::Error;

/// Errors from payload rehydration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// A deduplicated reference points past the end of the objects table.
    ///
    /// The schema tables are internally inconsistent; the request cannot be
    /// answered.
    #[error("Unknown object {index} in {event}/{action} (objects table has {len} entries)")]
    InvalidReference {
        event: String,
        action: String,
        index: usize,
        len: usize,
    },
}
