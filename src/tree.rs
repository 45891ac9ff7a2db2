//! Tree Utilities
//!
//! Two-tier display order for the task list.

use crate::models::Item;
use std::collections::HashMap;

/// Top-level items by position, each followed by its children by position.
///
/// Items whose parent is missing are shown top-level; deeper chains are
/// attached to their top-level ancestor so the list stays two-tier.
pub fn display_order(items: &[Item]) -> Vec<Item> {
    let by_id: HashMap<&str, &Item> = items.iter().map(|i| (i.id.as_str(), i)).collect();

    // Resolve each item's top-level ancestor (None = is top-level)
    let root_of = |item: &Item| -> Option<String> {
        let mut current = item;
        let mut seen = vec![item.id.as_str()];
        while let Some(parent) = current.parent_id.as_deref().and_then(|p| by_id.get(p).copied()) {
            if seen.contains(&parent.id.as_str()) {
                return None;
            }
            seen.push(parent.id.as_str());
            current = parent;
        }
        (current.id != item.id).then(|| current.id.clone())
    };

    let mut roots: Vec<&Item> = Vec::new();
    let mut children_map: HashMap<String, Vec<Item>> = HashMap::new();
    for item in items {
        match root_of(item) {
            Some(root) => {
                let mut child = item.clone();
                child.parent_id = Some(root.clone());
                children_map.entry(root).or_default().push(child);
            }
            None => roots.push(item),
        }
    }
    roots.sort_by_key(|i| i.position);

    let mut result = Vec::with_capacity(items.len());
    for root in roots {
        let mut top = root.clone();
        top.parent_id = None;
        result.push(top);
        if let Some(mut children) = children_map.remove(&root.id) {
            children.sort_by_key(|i| i.position);
            result.extend(children);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: &str, parent_id: Option<&str>, position: i32) -> Item {
        Item {
            id: id.to_string(),
            text: format!("Item {}", id),
            completed: false,
            parent_id: parent_id.map(str::to_string),
            position,
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_display_order() {
        let items = vec![
            make_item("2", None, 1),
            make_item("1", None, 0),
            make_item("4", Some("1"), 1),
            make_item("3", Some("1"), 0),
        ];
        assert_eq!(ids(&display_order(&items)), vec!["1", "3", "4", "2"]);
    }

    #[test]
    fn test_orphan_becomes_top_level() {
        let items = vec![make_item("1", None, 0), make_item("2", Some("gone"), 1)];
        let ordered = display_order(&items);
        assert_eq!(ids(&ordered), vec!["1", "2"]);
        assert_eq!(ordered[1].parent_id, None);
    }

    #[test]
    fn test_grandchild_flattened_to_root() {
        let items = vec![
            make_item("1", None, 0),
            make_item("3", Some("1"), 0),
            make_item("5", Some("3"), 1),
        ];
        let ordered = display_order(&items);
        assert_eq!(ids(&ordered), vec!["1", "3", "5"]);
        assert_eq!(ordered[2].parent_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let items = vec![make_item("a", Some("b"), 0), make_item("b", Some("a"), 1)];
        assert_eq!(display_order(&items).len(), 2);
    }
}
