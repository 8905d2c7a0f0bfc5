//! Preset document schema: validation and version normalization.
//!
//! This crate provides:
//! - Data-driven schema tables for the four document shapes
//! - Pure structural validators returning violation lists
//! - v1 → legacy version normalization
//! - The builtin marker prompt set
//! - Prompt-order shape resolution for rendering

pub mod builtin;
pub mod normalize;
pub mod order;
pub mod schema;
pub mod validate;

pub use builtin::{is_builtin, BuiltinPrompt, BUILTIN_PROMPTS};
pub use normalize::{normalize, Normalized, CONVERTED_ADVISORY, V1_VERSION};
pub use order::{
    is_sentinel_id, CharacterId, OrderEntry, OrderGroup, PromptOrder,
    CONVERTED_SENTINEL_CHARACTER_ID, LEGACY_SENTINEL_CHARACTER_ID,
};
pub use schema::{check_rules, FieldRule, FieldType, Presence, Problem, Violation};
pub use validate::{
    validate_order_entry, validate_order_group, validate_preset, validate_prompt, PresetReport,
    SkippedElement, UnresolvedReference,
};
