//! Preset loading and inspection.
//!
//! This crate provides:
//! - A loader that turns a file path or URL into a validated preset
//! - The load error taxonomy with stable codes
//! - CLI output rendering and exit codes

pub mod error;
pub mod exit_codes;
pub mod load;
pub mod output;

pub use error::{LoadError, Result, SourceKind};
pub use exit_codes::ExitCode;
pub use load::{load, load_file, load_url, LoadedPreset, Source};
pub use output::{render_json, OutputFormat, OUTPUT_SCHEMA_VERSION};
