//! Schema store loading error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A `bodyParameters` entry that points past the end of the objects table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub event: String,
    pub action: String,
    /// Position of the entry within `bodyParameters`.
    pub position: usize,
    /// The out-of-range objects table index.
    pub index: usize,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} bodyParameters[{}] -> object {}",
            self.event, self.action, self.position, self.index
        )
    }
}

/// Errors from loading or checking the schema tables.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// A table did not pass JSON Schema validation.
    #[error("{table} table failed validation: {errors:?}")]
    SchemaViolation { table: String, errors: Vec<String> },

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),

    #[error("objects table has {len} entries but {} references point past it: {}", dangling.len(), join(dangling))]
    InvalidReferences {
        len: usize,
        dangling: Vec<DanglingReference>,
    },
}

fn join(dangling: &[DanglingReference]) -> String {
    dangling
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
