// ============================================================================
// Portal Core - Navigation Layout Merger
// File: crates/portal-core/src/navigation_layout.rs
// ============================================================================
//! Reconciles a user's saved navigation order/visibility with the catalog.
//!
//! Saved entries are matched to catalog siblings by id in saved order.
//! Unknown ids are dropped, catalog entries the user never saved are appended
//! in catalog order and stay visible. The same rule is applied to children.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::domain::{NavigationEntry, NavigationLayout, SavedNavigationEntry};

/// Merge a raw persisted blob into the catalog.
///
/// Accepts `{"items": [...]}` or a bare array. Anything else, including
/// `None`, yields the catalog with every entry visible.
pub fn apply_layout(catalog: &[NavigationEntry], raw: Option<&Value>) -> Vec<NavigationEntry> {
    let saved = raw.map(parse_saved_layout).unwrap_or_default();
    apply_saved(catalog, &saved)
}

/// Merge an already decoded layout into the catalog
pub fn apply_saved(catalog: &[NavigationEntry], saved: &[SavedNavigationEntry]) -> Vec<NavigationEntry> {
    let defaults: Vec<NavigationEntry> = catalog.iter().map(NavigationEntry::reset_visibility).collect();
    reconcile(defaults, saved)
}

/// Project a live tree to its persisted `{id, hidden, children}` shape
pub fn serialize_layout(tree: &[NavigationEntry]) -> NavigationLayout {
    NavigationLayout {
        items: tree.iter().map(to_saved).collect(),
    }
}

/// Render-only view without hidden entries
pub fn visible_subset(tree: &[NavigationEntry]) -> Vec<NavigationEntry> {
    tree.iter()
        .filter(|entry| !entry.hidden)
        .map(|entry| NavigationEntry {
            children: visible_subset(&entry.children),
            ..entry.clone()
        })
        .collect()
}

/// Lenient decode of a persisted blob.
///
/// Entries without a string id are skipped; a non-boolean `hidden` reads as
/// `false`; non-array `children` reads as empty.
pub fn parse_saved_layout(raw: &Value) -> Vec<SavedNavigationEntry> {
    let items = match raw {
        Value::Object(map) => map.get("items"),
        Value::Array(_) => Some(raw),
        _ => None,
    };

    match items {
        Some(Value::Array(items)) => items.iter().filter_map(parse_saved_entry).collect(),
        _ => {
            debug!("Saved navigation layout is not a list, using defaults");
            Vec::new()
        }
    }
}

fn parse_saved_entry(value: &Value) -> Option<SavedNavigationEntry> {
    let obj = value.as_object()?;
    let id = obj.get("id")?.as_str()?.to_string();
    let hidden = obj.get("hidden").and_then(Value::as_bool).unwrap_or(false);
    let children = match obj.get("children") {
        Some(Value::Array(children)) => children.iter().filter_map(parse_saved_entry).collect(),
        _ => Vec::new(),
    };
    Some(SavedNavigationEntry { id, hidden, children })
}

fn reconcile(defaults: Vec<NavigationEntry>, saved: &[SavedNavigationEntry]) -> Vec<NavigationEntry> {
    let mut pending: Vec<Option<NavigationEntry>> = defaults.into_iter().map(Some).collect();
    let by_id: HashMap<String, usize> = pending
        .iter()
        .enumerate()
        .filter_map(|(pos, entry)| entry.as_ref().map(|e| (e.id.clone(), pos)))
        .collect();

    let mut merged = Vec::with_capacity(pending.len());

    for saved_entry in saved {
        let Some(&pos) = by_id.get(&saved_entry.id) else {
            debug!("Dropping unknown navigation entry: {}", saved_entry.id);
            continue;
        };
        // already consumed by an earlier duplicate
        let Some(mut entry) = pending[pos].take() else {
            continue;
        };

        entry.hidden = saved_entry.hidden;
        if entry.has_children() {
            let children = std::mem::take(&mut entry.children);
            entry.children = reconcile(children, &saved_entry.children);
        }
        merged.push(entry);
    }

    // catalog entries the saved layout never mentioned
    merged.extend(pending.into_iter().flatten());
    merged
}

fn to_saved(entry: &NavigationEntry) -> SavedNavigationEntry {
    SavedNavigationEntry {
        id: entry.id.clone(),
        hidden: entry.hidden,
        children: entry.children.iter().map(to_saved).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_catalog;
    use serde_json::json;

    fn entry(id: &str, children: Vec<NavigationEntry>) -> NavigationEntry {
        NavigationEntry {
            id: id.to_string(),
            label: id.to_uppercase(),
            path: format!("/{}", id),
            icon: None,
            hidden: false,
            children,
        }
    }

    fn ids(tree: &[NavigationEntry]) -> Vec<&str> {
        tree.iter().map(|e| e.id.as_str()).collect()
    }

    fn nested_catalog() -> Vec<NavigationEntry> {
        vec![
            entry("home", vec![]),
            entry("content", vec![entry("articles", vec![]), entry("topics", vec![])]),
            entry("admin", vec![]),
        ]
    }

    #[test]
    fn test_scenario_drop_unknown_append_missing() {
        let catalog = vec![entry("home", vec![]), entry("admin", vec![])];
        let raw = json!({"items": [
            {"id": "home", "hidden": true},
            {"id": "legacy", "hidden": false}
        ]});
        let tree = apply_layout(&catalog, Some(&raw));
        assert_eq!(ids(&tree), vec!["home", "admin"]);
        assert!(tree[0].hidden);
        assert!(!tree[1].hidden);
        assert_eq!(tree[1].label, "ADMIN");
    }

    #[test]
    fn test_missing_or_malformed_layout_yields_defaults() {
        let catalog = nested_catalog();
        let defaults = apply_layout(&catalog, None);
        assert_eq!(defaults, catalog);

        for raw in [
            json!(null),
            json!("items"),
            json!(42),
            json!({"items": "nope"}),
            json!({"other": []}),
            json!([]),
        ] {
            assert_eq!(apply_layout(&catalog, Some(&raw)), defaults, "raw = {}", raw);
        }
    }

    #[test]
    fn test_catalog_hidden_flags_are_reset() {
        let mut catalog = nested_catalog();
        catalog[0].hidden = true;
        catalog[1].children[0].hidden = true;
        let tree = apply_layout(&catalog, None);
        assert!(!tree[0].hidden);
        assert!(!tree[1].children[0].hidden);
    }

    #[test]
    fn test_bare_array_and_partial_entries() {
        let raw = json!([
            {"id": "admin", "hidden": "yes"},
            {"hidden": true},
            17,
            {"id": 5},
            {"id": "home", "hidden": true, "children": "bad"}
        ]);
        let tree = apply_layout(&nested_catalog(), Some(&raw));
        assert_eq!(ids(&tree), vec!["admin", "home", "content"]);
        assert!(!tree[0].hidden);
        assert!(tree[1].hidden);
    }

    #[test]
    fn test_saved_order_is_respected_with_children() {
        let raw = json!({"items": [
            {"id": "admin"},
            {"id": "content", "hidden": false, "children": [
                {"id": "topics", "hidden": true},
                {"id": "ghost", "hidden": true}
            ]},
            {"id": "home"}
        ]});
        let tree = apply_layout(&nested_catalog(), Some(&raw));
        assert_eq!(ids(&tree), vec!["admin", "content", "home"]);
        assert_eq!(ids(&tree[1].children), vec!["topics", "articles"]);
        assert!(tree[1].children[0].hidden);
        assert!(!tree[1].children[1].hidden);
    }

    #[test]
    fn test_duplicate_saved_ids_use_first() {
        let raw = json!([{"id": "home", "hidden": true}, {"id": "home", "hidden": false}]);
        let tree = apply_layout(&nested_catalog(), Some(&raw));
        assert_eq!(ids(&tree), vec!["home", "content", "admin"]);
        assert!(tree[0].hidden);
    }

    #[test]
    fn test_child_id_at_top_level_is_dropped() {
        let raw = json!([{"id": "articles", "hidden": true}]);
        let tree = apply_layout(&nested_catalog(), Some(&raw));
        assert_eq!(ids(&tree), vec!["home", "content", "admin"]);
        assert!(tree.iter().all(|e| !e.hidden));
    }

    #[test]
    fn test_new_catalog_item_surfaces_in_default_position() {
        let old_layout = json!([{"id": "admin"}, {"id": "home", "hidden": true}]);
        let catalog = vec![
            entry("home", vec![]),
            entry("new-a", vec![]),
            entry("admin", vec![]),
            entry("new-b", vec![]),
        ];
        let tree = apply_layout(&catalog, Some(&old_layout));
        assert_eq!(ids(&tree), vec!["admin", "home", "new-a", "new-b"]);
        assert!(!tree[2].hidden && !tree[3].hidden);
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let catalog = default_catalog();
        let raw = json!({"items": [
            {"id": "notes", "hidden": true},
            {"id": "admin", "children": [{"id": "admin-settings"}, {"id": "admin-users", "hidden": true}]},
            {"id": "retired-page"}
        ]});
        let first = apply_layout(&catalog, Some(&raw));
        let saved = serde_json::to_value(serialize_layout(&first)).unwrap();
        let second = apply_layout(&catalog, Some(&saved));
        assert_eq!(first, second);
        assert_eq!(visible_subset(&first), visible_subset(&second));
    }

    #[test]
    fn test_serialize_drops_display_fields() {
        let mut tree = nested_catalog();
        tree[1].children[1].hidden = true;
        let value = serde_json::to_value(serialize_layout(&tree)).unwrap();
        assert_eq!(
            value,
            json!({"items": [
                {"id": "home", "hidden": false},
                {"id": "content", "hidden": false, "children": [
                    {"id": "articles", "hidden": false},
                    {"id": "topics", "hidden": true}
                ]},
                {"id": "admin", "hidden": false}
            ]})
        );
    }

    #[test]
    fn test_visible_subset_filters_recursively() {
        let mut tree = nested_catalog();
        tree[0].hidden = true;
        tree[1].children[0].hidden = true;
        let visible = visible_subset(&tree);
        assert_eq!(ids(&visible), vec!["content", "admin"]);
        assert_eq!(ids(&visible[0].children), vec!["topics"]);
    }

    #[test]
    fn test_grandchildren_state_is_kept() {
        let catalog = vec![entry(
            "a",
            vec![entry("b", vec![entry("c1", vec![]), entry("c2", vec![])])],
        )];
        let raw = json!([{"id": "a", "children": [{"id": "b", "children": [
            {"id": "c2", "hidden": true}
        ]}]}]);
        let tree = apply_layout(&catalog, Some(&raw));
        let grandchildren = &tree[0].children[0].children;
        assert_eq!(ids(grandchildren), vec!["c2", "c1"]);
        assert!(grandchildren[0].hidden);
    }
}
