//! Preset loading: file or URL → parsed, normalized, validated document.
//!
//! One load is a short-lived, complete-or-fail synchronous call. No partial
//! state survives a failure; callers keep whatever they loaded before.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{LoadError, Result, SourceKind};
use pv_schema::{
    normalize, validate_preset, OrderEntry, PresetReport, PromptOrder, BUILTIN_PROMPTS,
    CONVERTED_ADVISORY,
};

/// Request timeout for URL presets. Inputs are single small documents.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// A preset source: a local path or an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    /// Classify a CLI argument: URL scheme prefix, otherwise a path.
    pub fn parse(arg: &str) -> Source {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            Source::Url(arg.to_string())
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Source::File(_) => SourceKind::File,
            Source::Url(_) => SourceKind::Url,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}

/// A normalized, validated preset plus everything rendering needs.
#[derive(Debug, Clone)]
pub struct LoadedPreset {
    /// The document, in legacy shape, as accepted.
    pub document: Value,
    /// Validation findings (valid, possibly with data-quality warnings).
    pub report: PresetReport,
    /// `prompt_order` resolved into its tagged shape, once.
    pub order: Option<PromptOrder>,
    /// Whether v1 → legacy conversion ran.
    pub converted: bool,
    /// Advisory for display when conversion ran.
    pub advisory: Option<&'static str>,
    /// Display form of the source.
    pub source: String,
    /// When the load completed.
    pub loaded_at: DateTime<Utc>,
}

impl LoadedPreset {
    /// The canonical display order: the sentinel group's entries.
    pub fn canonical_order(&self) -> &[OrderEntry] {
        self.order
            .as_ref()
            .and_then(PromptOrder::canonical)
            .unwrap_or(&[])
    }

    /// Display name for an identifier: the document's prompt name, the
    /// builtin name, or the identifier itself.
    pub fn prompt_name<'a>(&'a self, identifier: &'a str) -> &'a str {
        if let Some(prompts) = self.document.get("prompts").and_then(Value::as_array) {
            for prompt in prompts {
                if prompt.get("identifier").and_then(Value::as_str) == Some(identifier) {
                    if let Some(name) = prompt.get("name").and_then(Value::as_str) {
                        return name;
                    }
                    break;
                }
            }
        }
        BUILTIN_PROMPTS
            .iter()
            .find(|p| p.identifier == identifier)
            .map(|p| p.name)
            .unwrap_or(identifier)
    }
}

/// Load a preset from either source.
pub fn load(source: &Source) -> Result<LoadedPreset> {
    match source {
        Source::File(path) => load_file(path),
        Source::Url(url) => load_url(url),
    }
}

/// Load a preset from a local file.
pub fn load_file(path: &Path) -> Result<LoadedPreset> {
    let text = std::fs::read_to_string(path)?;
    finish(SourceKind::File, path.display().to_string(), &text)
}

/// Fetch a preset over HTTP GET. A non-success status fails the load before
/// any body parse.
pub fn load_url(url: &str) -> Result<LoadedPreset> {
    let agent = ureq::AgentBuilder::new().timeout(FETCH_TIMEOUT).build();
    let response = match agent.get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => {
            return Err(LoadError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP status {code}"),
            })
        }
        Err(err) => {
            return Err(LoadError::Fetch {
                url: url.to_string(),
                reason: err.to_string(),
            })
        }
    };
    let text = response.into_string().map_err(|err| LoadError::Fetch {
        url: url.to_string(),
        reason: err.to_string(),
    })?;
    finish(SourceKind::Url, url.to_string(), &text)
}

/// Shared tail: parse → normalize → validate → resolve order.
fn finish(kind: SourceKind, source: String, text: &str) -> Result<LoadedPreset> {
    let raw: Value =
        serde_json::from_str(text).map_err(|err| LoadError::Parse { kind, source: err })?;

    let normalized = normalize(raw);
    let report = validate_preset(&normalized.document);
    if !report.is_valid() {
        return Err(LoadError::Schema { kind, report });
    }

    let order = normalized
        .document
        .get("prompt_order")
        .and_then(PromptOrder::resolve);

    debug!(
        %source,
        converted = normalized.converted,
        prompts = report.known_identifiers.len(),
        "preset accepted"
    );

    Ok(LoadedPreset {
        report,
        order,
        converted: normalized.converted,
        advisory: normalized.converted.then_some(CONVERTED_ADVISORY),
        source,
        loaded_at: Utc::now(),
        document: normalized.document,
    })
}
