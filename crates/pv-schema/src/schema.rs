//! Data-driven structural schema tables.
//!
//! Validation here is deliberately shallow. It exists so that code walking a
//! document can index the checked keys without crashing, not to enforce the
//! host application's full semantics. Each shape is one const table of
//! [`FieldRule`]s interpreted by [`check_rules`]; unknown keys are ignored.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

// ── Field rules ─────────────────────────────────────────────────────────

/// Expected JSON type for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// JSON string.
    Str,
    /// JSON boolean.
    Bool,
    /// JSON integer.
    Int,
    /// Any JSON number, integer or floating.
    Real,
    /// JSON array.
    List,
    /// String, or integer in migrated documents (`character_id`).
    StrOrInt,
}

impl FieldType {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::Str => value.is_string(),
            FieldType::Bool => value.is_boolean(),
            FieldType::Int => value.is_i64() || value.is_u64(),
            FieldType::Real => value.is_number(),
            FieldType::List => value.is_array(),
            FieldType::StrOrInt => value.is_string() || value.is_i64() || value.is_u64(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Str => "string",
            FieldType::Bool => "boolean",
            FieldType::Int => "integer",
            FieldType::Real => "number",
            FieldType::List => "array",
            FieldType::StrOrInt => "string or integer",
        };
        write!(f, "{}", name)
    }
}

/// Whether a field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Required,
    Optional,
}

/// One row of a shape's schema table.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub presence: Presence,
    pub ty: FieldType,
}

const fn required(name: &'static str, ty: FieldType) -> FieldRule {
    FieldRule {
        name,
        presence: Presence::Required,
        ty,
    }
}

const fn optional(name: &'static str, ty: FieldType) -> FieldRule {
    FieldRule {
        name,
        presence: Presence::Optional,
        ty,
    }
}

// ── Shape tables ────────────────────────────────────────────────────────

/// Schema table for a prompt object.
pub const PROMPT_RULES: &[FieldRule] = &[
    required("identifier", FieldType::Str),
    optional("name", FieldType::Str),
    optional("role", FieldType::Str),
    optional("content", FieldType::Str),
    optional("injection_position", FieldType::Int),
    optional("injection_depth", FieldType::Int),
    optional("system_prompt", FieldType::Bool),
    optional("marker", FieldType::Bool),
    optional("forbid_overrides", FieldType::Bool),
];

/// Schema table for an order entry (a prompt reference plus enabled flag).
pub const ORDER_ENTRY_RULES: &[FieldRule] = &[
    required("identifier", FieldType::Str),
    required("enabled", FieldType::Bool),
];

/// Schema table for a prompt-order group scoped to one character.
pub const ORDER_GROUP_RULES: &[FieldRule] = &[
    required("character_id", FieldType::StrOrInt),
    required("order", FieldType::List),
];

/// Schema table for the preset document itself.
///
/// `prompts` and `prompt_order` carry per-element checks on top of the table
/// (see `validate::validate_preset`); the tuning fields are type-checked
/// only when present.
pub const PRESET_RULES: &[FieldRule] = &[
    required("prompts", FieldType::List),
    required("prompt_order", FieldType::List),
    optional("impersonation_prompt", FieldType::Str),
    optional("new_chat_prompt", FieldType::Str),
    optional("new_group_chat_prompt", FieldType::Str),
    optional("new_example_chat_prompt", FieldType::Str),
    optional("continue_nudge_prompt", FieldType::Str),
    optional("wi_format", FieldType::Str),
    optional("scenario_format", FieldType::Str),
    optional("personality_format", FieldType::Str),
    optional("group_nudge_prompt", FieldType::Str),
    optional("assistant_prefill", FieldType::Str),
    optional("human_sysprompt_message", FieldType::Str),
    optional("continue_postfix", FieldType::Str),
    optional("claude_use_sysprompt", FieldType::Bool),
    optional("squash_system_messages", FieldType::Bool),
    optional("continue_prefill", FieldType::Bool),
    optional("temperature", FieldType::Real),
    optional("frequency_penalty", FieldType::Real),
    optional("presence_penalty", FieldType::Real),
    optional("count_penalty", FieldType::Real),
    optional("top_p", FieldType::Real),
    optional("top_k", FieldType::Real),
    optional("top_a", FieldType::Real),
    optional("min_p", FieldType::Real),
    optional("repetition_penalty", FieldType::Real),
    optional("names_behavior", FieldType::Int),
];

// ── Violations ──────────────────────────────────────────────────────────

/// A single structural problem found while checking a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
    /// The value being checked is not a JSON object.
    NotAnObject,
    /// A required field is absent.
    Missing,
    /// The field is present but wrong-typed.
    WrongType {
        expected: FieldType,
        found: &'static str,
    },
    /// No prompt-order group carries a sentinel `character_id`.
    NoSentinelGroup,
}

/// A field-level violation: which field, and what was wrong with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Path of the offending field; empty for whole-value problems.
    pub field: String,
    #[serde(flatten)]
    pub problem: Problem,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            Problem::NotAnObject => write!(f, "value is not a JSON object"),
            Problem::Missing => write!(f, "missing required field `{}`", self.field),
            Problem::WrongType { expected, found } => {
                write!(f, "`{}` should be {}, got {}", self.field, expected, found)
            }
            Problem::NoSentinelGroup => {
                write!(f, "`{}` has no group with a sentinel character_id", self.field)
            }
        }
    }
}

/// Check `value` against a shape table, returning every violation found.
///
/// A non-object value yields a single `NotAnObject` violation; unknown keys
/// are ignored.
pub fn check_rules(value: &Value, rules: &[FieldRule]) -> Vec<Violation> {
    let Some(obj) = value.as_object() else {
        return vec![Violation {
            field: String::new(),
            problem: Problem::NotAnObject,
        }];
    };

    let mut violations = Vec::new();
    for rule in rules {
        match obj.get(rule.name) {
            None => {
                if rule.presence == Presence::Required {
                    violations.push(Violation {
                        field: rule.name.to_string(),
                        problem: Problem::Missing,
                    });
                }
            }
            Some(v) => {
                if !rule.ty.matches(v) {
                    violations.push(Violation {
                        field: rule.name.to_string(),
                        problem: Problem::WrongType {
                            expected: rule.ty,
                            found: json_type_name(v),
                        },
                    });
                }
            }
        }
    }
    violations
}

/// Human-readable JSON type name, for messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
