//! Builtin marker prompts.
//!
//! The host chat application always provides a fixed set of prompts (chat
//! history, dialogue examples, and so on). Order entries may reference them
//! even when the document does not declare them.

use serde_json::{json, Value};

/// A compiled-in marker prompt: an injection slot the host application
/// always provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinPrompt {
    /// Identifier referenced by order entries.
    pub identifier: &'static str,
    /// Display name shown in place of prompt content.
    pub name: &'static str,
}

const fn builtin(identifier: &'static str, name: &'static str) -> BuiltinPrompt {
    BuiltinPrompt { identifier, name }
}

/// The 12 builtin marker prompts.
pub const BUILTIN_PROMPTS: [BuiltinPrompt; 12] = [
    builtin("main", "Main Prompt"),
    builtin("nsfw", "Auxiliary Prompt"),
    builtin("dialogueExamples", "Chat Examples"),
    builtin("chatHistory", "Chat History"),
    builtin("worldInfoBefore", "World Info (before)"),
    builtin("worldInfoAfter", "World Info (after)"),
    builtin("enhanceDefinitions", "Enhance Definitions"),
    builtin("charDescription", "Char Description"),
    builtin("charPersonality", "Char Personality"),
    builtin("scenario", "Scenario"),
    builtin("personaDescription", "Persona Description"),
    builtin("jailbreak", "Post-History Instructions"),
];

/// Whether `identifier` names a builtin marker prompt.
pub fn is_builtin(identifier: &str) -> bool {
    BUILTIN_PROMPTS.iter().any(|p| p.identifier == identifier)
}

/// The builtin set rendered as prompt objects in the legacy document shape.
///
/// A v1 export omits the builtins, so version normalization appends these to
/// the rewritten `prompts` array.
pub fn builtin_prompt_values() -> Vec<Value> {
    BUILTIN_PROMPTS
        .iter()
        .map(|p| {
            json!({
                "identifier": p.identifier,
                "name": p.name,
                "system_prompt": true,
                "marker": true,
            })
        })
        .collect()
}
