// ============================================================================
// Portal Core - Navigation Entities
// File: crates/portal-core/src/domain/navigation.rs
// Description: Rendered navigation tree and its persisted projection
// ============================================================================

use serde::{Deserialize, Serialize};

/// Menu entry as rendered by the UI.
///
/// `label`, `path` and `icon` always come from the catalog; only `hidden`
/// and sibling order are user state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub id: String,
    pub label: String,
    pub path: String,
    pub icon: Option<String>,
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavigationEntry>,
}

impl NavigationEntry {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Copy of this entry with `hidden` cleared at every depth
    pub fn reset_visibility(&self) -> Self {
        Self {
            hidden: false,
            children: self.children.iter().map(NavigationEntry::reset_visibility).collect(),
            ..self.clone()
        }
    }
}

/// Persisted `{id, hidden, children}` triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedNavigationEntry {
    pub id: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SavedNavigationEntry>,
}

/// Persisted navigation preference blob
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLayout {
    pub items: Vec<SavedNavigationEntry>,
}
