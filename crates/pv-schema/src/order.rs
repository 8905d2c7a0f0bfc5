//! Prompt-order resolution.
//!
//! Legacy documents carry `prompt_order` as a list of per-character groups;
//! v1 exports carry a flat entry list that normalization wraps into a single
//! group. The shape is resolved into a tagged union once at load time so
//! rendering never has to re-sniff it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Legacy sentinel `character_id` marking the primary ordering group.
pub const LEGACY_SENTINEL_CHARACTER_ID: &str = "0";

/// Sentinel `character_id` synthesized when converting a v1 document.
pub const CONVERTED_SENTINEL_CHARACTER_ID: u64 = 100001;

/// A reference to a prompt plus its enabled flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub identifier: String,
    pub enabled: bool,
}

/// A group's character id: a string in legacy documents, an integer after
/// conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacterId {
    Text(String),
    Numeric(i64),
}

impl CharacterId {
    /// Whether this id marks the primary ordering group.
    pub fn is_sentinel(&self) -> bool {
        match self {
            CharacterId::Text(s) => s == LEGACY_SENTINEL_CHARACTER_ID,
            CharacterId::Numeric(n) => *n == CONVERTED_SENTINEL_CHARACTER_ID as i64,
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterId::Text(s) => write!(f, "{}", s),
            CharacterId::Numeric(n) => write!(f, "{}", n),
        }
    }
}

/// One character's prompt arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderGroup {
    pub character_id: CharacterId,
    pub order: Vec<OrderEntry>,
}

/// The two shapes `prompt_order` appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PromptOrder {
    /// Legacy shape: one group per character.
    Grouped(Vec<OrderGroup>),
    /// Bare entry list (a v1 `data.prompt_order` before conversion).
    Flat(Vec<OrderEntry>),
}

impl PromptOrder {
    /// Resolve a `prompt_order` value into its tagged shape.
    ///
    /// Elements that fit neither shape are dropped, mirroring the
    /// validator's skip semantics, so one malformed group does not hide the
    /// rest. Returns `None` when the value is not an array or no element is
    /// usable.
    pub fn resolve(prompt_order: &Value) -> Option<PromptOrder> {
        let items = prompt_order.as_array()?;

        let groups: Vec<OrderGroup> = items
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect();
        if !groups.is_empty() || items.is_empty() {
            return Some(PromptOrder::Grouped(groups));
        }

        let entries: Vec<OrderEntry> = items
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect();
        if entries.is_empty() {
            None
        } else {
            Some(PromptOrder::Flat(entries))
        }
    }

    /// The canonical display order: the sentinel group's entries in the
    /// grouped shape, the whole list in the flat shape.
    pub fn canonical(&self) -> Option<&[OrderEntry]> {
        match self {
            PromptOrder::Grouped(groups) => groups
                .iter()
                .find(|g| g.character_id.is_sentinel())
                .map(|g| g.order.as_slice()),
            PromptOrder::Flat(entries) => Some(entries.as_slice()),
        }
    }
}

/// Sentinel check on a raw JSON `character_id` value.
pub fn is_sentinel_id(character_id: &Value) -> bool {
    character_id.as_str() == Some(LEGACY_SENTINEL_CHARACTER_ID)
        || character_id.as_u64() == Some(CONVERTED_SENTINEL_CHARACTER_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn grouped_shape_resolved() {
        let value = json!([
            {"character_id": "0", "order": [{"identifier": "main", "enabled": true}]},
            {"character_id": "7", "order": []},
        ]);
        match PromptOrder::resolve(&value) {
            Some(PromptOrder::Grouped(groups)) => assert_eq!(groups.len(), 2),
            other => panic!("expected grouped shape, got {other:?}"),
        }
    }

    #[test]
    fn flat_shape_resolved() {
        let value = json!([
            {"identifier": "main", "enabled": true},
            {"identifier": "chatHistory", "enabled": false},
        ]);
        match PromptOrder::resolve(&value) {
            Some(PromptOrder::Flat(entries)) => assert_eq!(entries.len(), 2),
            other => panic!("expected flat shape, got {other:?}"),
        }
    }

    #[test]
    fn empty_array_is_grouped() {
        assert_eq!(
            PromptOrder::resolve(&json!([])),
            Some(PromptOrder::Grouped(vec![]))
        );
    }

    #[test]
    fn non_array_unresolvable() {
        assert_eq!(PromptOrder::resolve(&json!({"order": []})), None);
        assert_eq!(PromptOrder::resolve(&json!("order")), None);
    }

    #[test]
    fn malformed_group_dropped() {
        let value = json!([
            {"character_id": "0", "order": [{"identifier": "main", "enabled": true}]},
            {"character_id": "1"},
        ]);
        match PromptOrder::resolve(&value) {
            Some(PromptOrder::Grouped(groups)) => {
                assert_eq!(groups.len(), 1);
                assert!(groups[0].character_id.is_sentinel());
            }
            other => panic!("expected grouped shape, got {other:?}"),
        }
    }

    #[test]
    fn canonical_picks_sentinel_group() {
        let value = json!([
            {"character_id": "3", "order": [{"identifier": "scenario", "enabled": true}]},
            {"character_id": "0", "order": [{"identifier": "main", "enabled": true}]},
        ]);
        let order = PromptOrder::resolve(&value).unwrap();
        let canonical = order.canonical().unwrap();
        assert_eq!(canonical.len(), 1);
        assert_eq!(canonical[0].identifier, "main");
    }

    #[test]
    fn converted_sentinel_recognized() {
        let value = json!([{"character_id": 100001, "order": []}]);
        let order = PromptOrder::resolve(&value).unwrap();
        assert!(order.canonical().is_some());

        assert!(is_sentinel_id(&json!("0")));
        assert!(is_sentinel_id(&json!(100001)));
        assert!(!is_sentinel_id(&json!("100001")));
        assert!(!is_sentinel_id(&json!(0)));
    }

    #[test]
    fn canonical_flat_is_whole_list() {
        let value = json!([{"identifier": "main", "enabled": true}]);
        let order = PromptOrder::resolve(&value).unwrap();
        assert_eq!(order.canonical().unwrap().len(), 1);
    }

    #[test]
    fn canonical_missing_without_sentinel() {
        let value = json!([{"character_id": "9", "order": []}]);
        let order = PromptOrder::resolve(&value).unwrap();
        assert!(order.canonical().is_none());
    }

    #[test]
    fn character_id_display_forms() {
        assert_eq!(CharacterId::Text("0".into()).to_string(), "0");
        assert_eq!(CharacterId::Numeric(100001).to_string(), "100001");
    }
}
