//! Navigation preference payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use portal_core::domain::{NavigationEntry, SavedNavigationEntry};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SavedEntryDto {
    #[validate(length(min = 1, max = 100, message = "Entry id must be between 1 and 100 characters"))]
    pub id: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    #[validate(nested)]
    pub children: Vec<SavedEntryDto>,
}

impl From<SavedEntryDto> for SavedNavigationEntry {
    fn from(dto: SavedEntryDto) -> Self {
        SavedNavigationEntry {
            id: dto.id,
            hidden: dto.hidden,
            children: dto.children.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveNavigationRequest {
    #[validate(nested)]
    pub items: Vec<SavedEntryDto>,
}

impl SaveNavigationRequest {
    pub fn into_entries(self) -> Vec<SavedNavigationEntry> {
        self.items.into_iter().map(Into::into).collect()
    }
}

/// Full rehydrated tree plus the render-only subset
#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub items: Vec<NavigationEntry>,
    pub visible: Vec<NavigationEntry>,
}

impl NavigationResponse {
    pub fn from_tree(items: Vec<NavigationEntry>) -> Self {
        let visible = portal_core::visible_subset(&items);
        Self { items, visible }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_entries_are_validated() {
        let req: SaveNavigationRequest = serde_json::from_value(json!({
            "items": [{"id": "admin", "children": [{"id": ""}]}]
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_defaults_for_hidden_and_children() {
        let req: SaveNavigationRequest = serde_json::from_value(json!({
            "items": [{"id": "notes"}]
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        let entries = req.into_entries();
        assert_eq!(entries[0].id, "notes");
        assert!(!entries[0].hidden);
        assert!(entries[0].children.is_empty());
    }
}
