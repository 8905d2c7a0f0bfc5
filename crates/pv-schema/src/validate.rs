//! Shape validators for preset documents.
//!
//! These checks are defensive, not semantic: they establish that rendering
//! code can traverse the document without hitting a missing key or a wrong
//! type. Invalid prompts are skipped rather than fatal; a preset stands or
//! falls on its top-level fields and on the presence of a sentinel
//! prompt-order group.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::warn;

use crate::builtin::BUILTIN_PROMPTS;
use crate::order::is_sentinel_id;
use crate::schema::{
    check_rules, Problem, Violation, ORDER_ENTRY_RULES, ORDER_GROUP_RULES, PRESET_RULES,
    PROMPT_RULES,
};

/// Validate one prompt object.
pub fn validate_prompt(value: &Value) -> Vec<Violation> {
    check_rules(value, PROMPT_RULES)
}

/// Validate one order entry.
pub fn validate_order_entry(value: &Value) -> Vec<Violation> {
    check_rules(value, ORDER_ENTRY_RULES)
}

/// Validate a prompt-order group: its own fields plus every order entry.
/// Any failing entry invalidates the whole group.
pub fn validate_order_group(value: &Value) -> Vec<Violation> {
    let mut violations = check_rules(value, ORDER_GROUP_RULES);
    if let Some(entries) = value.get("order").and_then(Value::as_array) {
        for (idx, entry) in entries.iter().enumerate() {
            for v in validate_order_entry(entry) {
                let field = if v.field.is_empty() {
                    format!("order[{idx}]")
                } else {
                    format!("order[{idx}].{}", v.field)
                };
                violations.push(Violation {
                    field,
                    problem: v.problem,
                });
            }
        }
    }
    violations
}

/// An element of `prompts` or `prompt_order` that failed its shape check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedElement {
    /// Index in the source array.
    pub index: usize,
    pub violations: Vec<Violation>,
}

/// An order entry whose identifier resolves to no known prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedReference {
    /// Display form of the owning group's `character_id`.
    pub character_id: String,
    pub identifier: String,
}

/// Outcome of [`validate_preset`]: fatal violations plus data-quality
/// findings that rendering tolerates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PresetReport {
    /// Preset-level violations; any entry here makes the document invalid.
    pub violations: Vec<Violation>,
    /// `prompts` elements dropped for failing their shape check.
    pub skipped_prompts: Vec<SkippedElement>,
    /// `prompt_order` elements dropped for failing their shape check.
    pub skipped_groups: Vec<SkippedElement>,
    /// Identifiers of structurally-valid prompts plus the builtin set.
    pub known_identifiers: BTreeSet<String>,
    /// Order entries referencing prompts outside `known_identifiers`.
    /// Reported, never validity-gating.
    pub unresolved_references: Vec<UnresolvedReference>,
}

impl PresetReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validate a whole preset document.
///
/// Per-element failures in `prompts` and `prompt_order` are recorded and
/// skipped; the document is invalid only for top-level shape problems or
/// when no structurally-valid group carries a sentinel `character_id`.
pub fn validate_preset(value: &Value) -> PresetReport {
    let mut report = PresetReport {
        violations: check_rules(value, PRESET_RULES),
        ..PresetReport::default()
    };

    let mut known: BTreeSet<String> = BUILTIN_PROMPTS
        .iter()
        .map(|p| p.identifier.to_string())
        .collect();

    if let Some(prompts) = value.get("prompts").and_then(Value::as_array) {
        for (index, prompt) in prompts.iter().enumerate() {
            let violations = validate_prompt(prompt);
            if violations.is_empty() {
                if let Some(id) = prompt.get("identifier").and_then(Value::as_str) {
                    known.insert(id.to_string());
                }
            } else {
                report.skipped_prompts.push(SkippedElement { index, violations });
            }
        }
    }

    if let Some(groups) = value.get("prompt_order").and_then(Value::as_array) {
        let mut sentinel_seen = false;
        for (index, group) in groups.iter().enumerate() {
            let violations = validate_order_group(group);
            if !violations.is_empty() {
                report.skipped_groups.push(SkippedElement { index, violations });
                continue;
            }

            let character_id = group.get("character_id").unwrap_or(&Value::Null);
            if is_sentinel_id(character_id) {
                sentinel_seen = true;
            }

            let character_id = display_character_id(character_id);
            if let Some(entries) = group.get("order").and_then(Value::as_array) {
                for entry in entries {
                    if let Some(id) = entry.get("identifier").and_then(Value::as_str) {
                        if !known.contains(id) {
                            warn!(
                                identifier = id,
                                character_id = %character_id,
                                "order entry references an undeclared prompt"
                            );
                            report.unresolved_references.push(UnresolvedReference {
                                character_id: character_id.clone(),
                                identifier: id.to_string(),
                            });
                        }
                    }
                }
            }
        }
        if !sentinel_seen {
            report.violations.push(Violation {
                field: "prompt_order".to_string(),
                problem: Problem::NoSentinelGroup,
            });
        }
    }

    report.known_identifiers = known;
    report
}

fn display_character_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
