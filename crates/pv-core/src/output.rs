//! Output rendering for the CLI.
//!
//! Two formats: a human-readable text summary and a JSON envelope for
//! scripting. stdout carries the result; diagnostics go to stderr.

use clap::ValueEnum;
use serde_json::{json, Value};

use crate::load::LoadedPreset;

/// Output format selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Schema version for JSON output envelopes.
pub const OUTPUT_SCHEMA_VERSION: &str = "1.0.0";

/// Print a loaded preset in the requested format.
pub fn print_summary(format: OutputFormat, loaded: &LoadedPreset) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&render_json(loaded)).unwrap()
            );
        }
        OutputFormat::Text => print_text(loaded),
    }
}

/// Render the JSON envelope for a loaded preset.
pub fn render_json(loaded: &LoadedPreset) -> Value {
    let order: Vec<Value> = loaded
        .canonical_order()
        .iter()
        .map(|entry| {
            json!({
                "identifier": entry.identifier,
                "name": loaded.prompt_name(&entry.identifier),
                "enabled": entry.enabled,
            })
        })
        .collect();

    json!({
        "schema_version": OUTPUT_SCHEMA_VERSION,
        "generated_at": loaded.loaded_at.to_rfc3339(),
        "command": "inspect",
        "source": loaded.source,
        "converted": loaded.converted,
        "advisory": loaded.advisory,
        "prompt_count": loaded.document["prompts"].as_array().map_or(0, Vec::len),
        "order": order,
        "skipped_prompts": loaded.report.skipped_prompts,
        "skipped_groups": loaded.report.skipped_groups,
        "unresolved_references": loaded.report.unresolved_references,
    })
}

fn print_text(loaded: &LoadedPreset) {
    println!("# Preset: {}", loaded.source);
    if let Some(advisory) = loaded.advisory {
        println!("  Note: {}", advisory);
    }
    println!();

    let entries = loaded.canonical_order();
    if entries.is_empty() {
        println!("  (empty prompt order)");
    }
    for entry in entries {
        let mark = if entry.enabled { "x" } else { " " };
        println!(
            "  [{}] {}  ({})",
            mark,
            loaded.prompt_name(&entry.identifier),
            entry.identifier
        );
    }

    if !loaded.report.skipped_prompts.is_empty() {
        println!();
        println!(
            "  Skipped {} malformed prompt(s)",
            loaded.report.skipped_prompts.len()
        );
    }
    if !loaded.report.unresolved_references.is_empty() {
        println!();
        println!("  Unresolved prompt references:");
        for reference in &loaded.report.unresolved_references {
            println!(
                "    {} (character {})",
                reference.identifier, reference.character_id
            );
        }
    }
}
