//! Load error taxonomy.
//!
//! Every failure mode of a load attempt maps to one variant with a specific
//! user-facing message. All variants are terminal for that attempt; nothing
//! here escalates past it.

use pv_schema::PresetReport;
use std::fmt;
use thiserror::Error;

/// Where the bytes came from; selects the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Url,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::File => write!(f, "File"),
            SourceKind::Url => write!(f, "URL"),
        }
    }
}

/// Result type alias for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors terminating one load attempt.
#[derive(Debug, Error)]
pub enum LoadError {
    /// URL unreachable or non-success HTTP status.
    #[error("Failed to load URL: {reason}")]
    Fetch { url: String, reason: String },

    /// Bytes are not syntactically valid JSON.
    #[error("{kind} is not valid JSON: {source}")]
    Parse {
        kind: SourceKind,
        #[source]
        source: serde_json::Error,
    },

    /// Parsed JSON does not satisfy preset validation.
    #[error("{kind} is not a valid preset")]
    Schema { kind: SourceKind, report: PresetReport },

    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// Stable numeric code for JSON output and exit status.
    pub fn code(&self) -> u32 {
        match self {
            LoadError::Fetch { .. } => 10,
            LoadError::Parse { .. } => 11,
            LoadError::Schema { .. } => 12,
            LoadError::Io(_) => 13,
        }
    }
}
