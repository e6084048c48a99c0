//! Static navigation catalog shipped with the application

use super::navigation::NavigationEntry;

struct CatalogItem {
    id: &'static str,
    label: &'static str,
    path: &'static str,
    icon: Option<&'static str>,
    children: &'static [CatalogItem],
}

const fn item(id: &'static str, label: &'static str, path: &'static str, icon: &'static str) -> CatalogItem {
    CatalogItem { id, label, path, icon: Some(icon), children: &[] }
}

const fn child(id: &'static str, label: &'static str, path: &'static str) -> CatalogItem {
    CatalogItem { id, label, path, icon: None, children: &[] }
}

static CATALOG: &[CatalogItem] = &[
    item("dashboard", "Dashboard", "/", "home"),
    item("plants", "Plant Care", "/plants", "leaf"),
    CatalogItem {
        id: "analytics",
        label: "Analytics",
        path: "/analytics",
        icon: Some("chart"),
        children: &[
            child("analytics-articles", "Articles", "/analytics/articles"),
            child("analytics-topics", "Topics", "/analytics/topics"),
        ],
    },
    item("notes", "Notes", "/notes", "notebook"),
    item("career", "Career", "/career", "briefcase"),
    item("vpn", "VPN Keys", "/vpn", "key"),
    CatalogItem {
        id: "admin",
        label: "Administration",
        path: "/admin",
        icon: Some("shield"),
        children: &[
            child("admin-users", "Users", "/admin/users"),
            child("admin-settings", "Settings", "/admin/settings"),
        ],
    },
];

impl CatalogItem {
    fn to_entry(&self) -> NavigationEntry {
        NavigationEntry {
            id: self.id.to_string(),
            label: self.label.to_string(),
            path: self.path.to_string(),
            icon: self.icon.map(str::to_string),
            hidden: false,
            children: self.children.iter().map(CatalogItem::to_entry).collect(),
        }
    }
}

/// Canonical navigation tree with every entry visible
pub fn default_catalog() -> Vec<NavigationEntry> {
    CATALOG.iter().map(CatalogItem::to_entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn collect_ids(entries: &[NavigationEntry], ids: &mut Vec<String>) {
        for entry in entries {
            ids.push(entry.id.clone());
            collect_ids(&entry.children, ids);
        }
    }

    #[test]
    fn test_catalog_ids_unique() {
        let mut ids = Vec::new();
        collect_ids(&default_catalog(), &mut ids);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_catalog_depth_and_visibility() {
        for entry in default_catalog() {
            assert!(!entry.hidden);
            for child in &entry.children {
                assert!(!child.hidden);
                assert!(child.children.is_empty());
            }
        }
    }
}
