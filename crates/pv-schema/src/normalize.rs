//! Version normalization.
//!
//! Newer exports wrap the preset in a `{ version: 1, data: {...} }` envelope
//! with a flat order list and without the builtin prompts. The rest of the
//! tooling only understands the legacy shape, so the envelope is rewritten
//! on load: `data`'s fields carry over, the builtin prompts are appended to
//! `data.prompts`, and the flat order list is wrapped in a single group
//! under the converted sentinel id.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::builtin::builtin_prompt_values;
use crate::order::CONVERTED_SENTINEL_CHARACTER_ID;

/// `version` value identifying the new export format.
pub const V1_VERSION: u64 = 1;

/// Advisory attached to a load when conversion ran.
pub const CONVERTED_ADVISORY: &str =
    "Preset was converted from version 1 to the traditional format, there may be inconsistencies";

/// A document in the legacy shape, plus whether conversion happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub document: Value,
    pub converted: bool,
}

/// Rewrite a v1 document into the legacy shape; anything else passes through
/// unchanged.
///
/// Normalization is total: missing or mistyped `data` fields default to
/// empty, and schema validation always runs on the output.
pub fn normalize(document: Value) -> Normalized {
    if document.get("version").and_then(Value::as_u64) != Some(V1_VERSION) {
        return Normalized {
            document,
            converted: false,
        };
    }

    let data = match document.get("data").and_then(Value::as_object) {
        Some(map) => map.clone(),
        None => Map::new(),
    };

    let mut prompts = data
        .get("prompts")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    prompts.extend(builtin_prompt_values());

    let order = data
        .get("prompt_order")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut legacy = data;
    legacy.insert("prompts".to_string(), Value::Array(prompts));
    legacy.insert(
        "prompt_order".to_string(),
        json!([{ "character_id": CONVERTED_SENTINEL_CHARACTER_ID, "order": order }]),
    );

    debug!(
        prompts = legacy["prompts"].as_array().map_or(0, Vec::len),
        "converted v1 preset to legacy shape"
    );

    Normalized {
        document: Value::Object(legacy),
        converted: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_preset;
    use serde_json::json;

    #[test]
    fn v1_empty_data_yields_exactly_builtins() {
        let out = normalize(json!({"version": 1, "data": {"prompts": [], "prompt_order": []}}));
        assert!(out.converted);
        assert_eq!(
            out.document["prompts"],
            Value::Array(builtin_prompt_values())
        );
        assert_eq!(
            out.document["prompt_order"],
            json!([{"character_id": 100001, "order": []}])
        );
    }

    #[test]
    fn v1_user_prompts_precede_builtins() {
        let prompt = json!({"identifier": "greeting", "name": "Greeting", "content": "hi"});
        let out = normalize(json!({
            "version": 1,
            "data": {"prompts": [prompt], "prompt_order": []}
        }));
        let prompts = out.document["prompts"].as_array().unwrap();
        assert_eq!(prompts.len(), 13);
        assert_eq!(prompts[0]["identifier"], "greeting");
    }

    #[test]
    fn v1_flat_order_wrapped_in_sentinel_group() {
        let out = normalize(json!({
            "version": 1,
            "data": {
                "prompts": [],
                "prompt_order": [{"identifier": "main", "enabled": true}]
            }
        }));
        let groups = out.document["prompt_order"].as_array().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0]["character_id"], 100001);
        assert_eq!(groups[0]["order"][0]["identifier"], "main");
    }

    #[test]
    fn v1_tuning_fields_carry_over() {
        let out = normalize(json!({
            "version": 1,
            "data": {"prompts": [], "prompt_order": [], "temperature": 0.7}
        }));
        assert_eq!(out.document["temperature"], 0.7);
    }

    #[test]
    fn v1_result_passes_validation() {
        let out = normalize(json!({"version": 1, "data": {"prompts": [], "prompt_order": []}}));
        assert!(validate_preset(&out.document).is_valid());
    }

    #[test]
    fn legacy_document_passes_through_unchanged() {
        let doc = json!({"prompts": [], "prompt_order": [{"character_id": "0", "order": []}]});
        let out = normalize(doc.clone());
        assert!(!out.converted);
        assert_eq!(out.document, doc);
    }

    #[test]
    fn other_versions_pass_through() {
        let doc = json!({"version": 2, "data": {"prompts": []}});
        let out = normalize(doc.clone());
        assert!(!out.converted);
        assert_eq!(out.document, doc);

        let doc = json!({"version": "1", "data": {"prompts": []}});
        assert!(!normalize(doc).converted);
    }

    #[test]
    fn normalization_is_idempotent_on_legacy_shape() {
        let doc = json!({"prompts": [], "prompt_order": [{"character_id": "0", "order": []}]});
        let once = normalize(doc);
        let twice = normalize(once.document.clone());
        assert_eq!(once.document, twice.document);
        assert!(!twice.converted);
    }

    #[test]
    fn converted_output_is_stable_under_renormalization() {
        let once = normalize(json!({"version": 1, "data": {"prompts": [], "prompt_order": []}}));
        let twice = normalize(once.document.clone());
        assert!(!twice.converted);
        assert_eq!(once.document, twice.document);
    }

    #[test]
    fn v1_without_data_still_converts() {
        let out = normalize(json!({"version": 1}));
        assert!(out.converted);
        assert_eq!(
            out.document["prompts"].as_array().unwrap().len(),
            builtin_prompt_values().len()
        );
    }

    #[test]
    fn non_object_passes_through() {
        let out = normalize(json!(["not", "a", "preset"]));
        assert!(!out.converted);
    }
}
