//! Exit codes for the pv-core CLI.
//!
//! Stable codes communicate the load outcome without output parsing.

use crate::error::LoadError;

/// Exit codes for pv-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Preset loaded and validated
    Clean = 0,

    /// Bad command-line arguments
    ArgsError = 2,

    /// URL unreachable or non-success HTTP status
    FetchError = 10,

    /// Source bytes are not valid JSON
    ParseError = 11,

    /// Document failed preset validation
    SchemaError = 12,

    /// File read failed
    IoError = 13,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }
}

impl From<&LoadError> for ExitCode {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::Fetch { .. } => ExitCode::FetchError,
            LoadError::Parse { .. } => ExitCode::ParseError,
            LoadError::Schema { .. } => ExitCode::SchemaError,
            LoadError::Io(_) => ExitCode::IoError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceKind;
    use pv_schema::PresetReport;

    #[test]
    fn exit_code_tracks_error_code() {
        let err = LoadError::Schema {
            kind: SourceKind::File,
            report: PresetReport::default(),
        };
        assert_eq!(ExitCode::from(&err).as_i32() as u32, err.code());
        assert!(!ExitCode::from(&err).is_success());
        assert!(ExitCode::Clean.is_success());
    }
}
