//! Item Model
//!
//! Identifiers, list items and the reorder result emitted after a drag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a list item, as carried in the DOM and on the wire
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A list element in display order.
///
/// `index` is recomputed from display order on every read and never stored
/// by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub parent_id: Option<ItemId>,
    pub index: usize,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, parent_id: Option<ItemId>, index: usize) -> Self {
        Self {
            id: id.into(),
            parent_id,
            index,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Build indexed items from `(id, parent)` pairs in display order
pub fn index_items<I>(pairs: I) -> Vec<Item>
where
    I: IntoIterator<Item = (ItemId, Option<ItemId>)>,
{
    pairs
        .into_iter()
        .enumerate()
        .map(|(index, (id, parent_id))| Item { id, parent_id, index })
        .collect()
}

/// One entry of a reorder result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub id: ItemId,
    pub parent_id: Option<ItemId>,
}

/// Full ordered list after a completed gesture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderResult {
    pub items: Vec<ReorderEntry>,
}

impl ReorderResult {
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|e| e.id.clone()).collect()
    }

    pub fn parent_of(&self, id: &ItemId) -> Option<&ItemId> {
        self.items
            .iter()
            .find(|e| &e.id == id)
            .and_then(|e| e.parent_id.as_ref())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ========================
// DOM identity
// ========================

/// Maps between item ids and their DOM form (`items-<id>`).
///
/// One reserved id marks the empty-list placeholder; it never reaches the
/// engine through [`DomIdentity::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomIdentity {
    prefix: String,
    placeholder: String,
}

impl DomIdentity {
    pub fn new(prefix: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            placeholder: placeholder.into(),
        }
    }

    /// DOM element id for an item
    pub fn dom_id(&self, id: &ItemId) -> String {
        format!("{}{}", self.prefix, id)
    }

    /// DOM element id of the placeholder
    pub fn placeholder_dom_id(&self) -> String {
        format!("{}{}", self.prefix, self.placeholder)
    }

    /// Strip the prefix from a DOM id or wire id.
    ///
    /// Ids without the prefix are taken as-is. Returns `None` for empty ids
    /// and for the placeholder.
    pub fn parse(&self, raw: &str) -> Option<ItemId> {
        let raw = raw.trim();
        let id = raw.strip_prefix(self.prefix.as_str()).unwrap_or(raw);
        if id.is_empty() || self.is_placeholder(id) {
            return None;
        }
        Some(ItemId::new(id))
    }

    /// Parse a parent attribute value; absent or blank means top-level
    pub fn parse_parent(&self, raw: Option<&str>) -> Option<ItemId> {
        raw.and_then(|v| self.parse(v))
    }

    pub fn is_placeholder(&self, id: &str) -> bool {
        id == self.placeholder
    }
}

impl Default for DomIdentity {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ID_PREFIX, crate::config::DEFAULT_PLACEHOLDER_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_items_follows_display_order() {
        let items = index_items(vec![
            (ItemId::from("a"), None),
            (ItemId::from("b"), Some(ItemId::from("a"))),
        ]);
        assert_eq!(items[0].index, 0);
        assert_eq!(items[1].index, 1);
        assert!(items[0].is_top_level());
        assert!(!items[1].is_top_level());
    }

    #[test]
    fn test_dom_identity_strips_prefix() {
        let dom = DomIdentity::default();
        assert_eq!(dom.parse("items-42"), Some(ItemId::from("42")));
        assert_eq!(dom.parse("42"), Some(ItemId::from("42")));
        assert_eq!(dom.dom_id(&ItemId::from("42")), "items-42");
    }

    #[test]
    fn test_dom_identity_filters_placeholder() {
        let dom = DomIdentity::default();
        assert_eq!(dom.parse("items-empty"), None);
        assert_eq!(dom.parse("empty"), None);
        assert_eq!(dom.parse(""), None);
        assert_eq!(dom.parse("items-"), None);
    }

    #[test]
    fn test_parse_parent_blank_is_top_level() {
        let dom = DomIdentity::default();
        assert_eq!(dom.parse_parent(None), None);
        assert_eq!(dom.parse_parent(Some("")), None);
        assert_eq!(dom.parse_parent(Some("7")), Some(ItemId::from("7")));
    }

    #[test]
    fn test_reorder_result_serializes_wire_shape() {
        let result = ReorderResult {
            items: vec![
                ReorderEntry { id: "a".into(), parent_id: None },
                ReorderEntry { id: "b".into(), parent_id: Some("a".into()) },
            ],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "items": [
                { "id": "a", "parent_id": null },
                { "id": "b", "parent_id": "a" },
            ]})
        );
    }
}
