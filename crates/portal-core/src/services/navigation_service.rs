// ============================================================================
// Portal Core - Navigation Service
// File: crates/portal-core/src/services/navigation_service.rs
// ============================================================================
//! Loads, saves and resets per-user navigation preferences

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use portal_shared::constants::NAVIGATION_PREFERENCE_KEY;

use crate::domain::{default_catalog, NavigationEntry, SavedNavigationEntry};
use crate::error::DomainError;
use crate::navigation_layout::{apply_layout, apply_saved, serialize_layout};
use crate::repositories::PreferenceRepository;

pub struct NavigationService<R: PreferenceRepository + ?Sized> {
    repo: Arc<R>,
    catalog: Vec<NavigationEntry>,
}

impl<R: PreferenceRepository + ?Sized> NavigationService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_catalog(repo, default_catalog())
    }

    pub fn with_catalog(repo: Arc<R>, catalog: Vec<NavigationEntry>) -> Self {
        Self { repo, catalog }
    }

    /// The user's navigation tree; unreadable stored state falls back to defaults
    pub async fn load(&self, user_id: &Uuid) -> Result<Vec<NavigationEntry>, DomainError> {
        let raw = self.repo.get(user_id, NAVIGATION_PREFERENCE_KEY).await?;
        debug!("Loaded navigation preferences for {} (stored: {})", user_id, raw.is_some());
        Ok(apply_layout(&self.catalog, raw.as_ref()))
    }

    /// Reconcile, persist the sanitized layout and return the rehydrated tree
    pub async fn save(
        &self,
        user_id: &Uuid,
        saved: &[SavedNavigationEntry],
    ) -> Result<Vec<NavigationEntry>, DomainError> {
        let tree = apply_saved(&self.catalog, saved);
        let layout = serialize_layout(&tree);
        let value = serde_json::to_value(&layout)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        self.repo.put(user_id, NAVIGATION_PREFERENCE_KEY, &value).await?;
        info!("Saved navigation preferences for {}", user_id);
        Ok(tree)
    }

    pub async fn reset(&self, user_id: &Uuid) -> Result<Vec<NavigationEntry>, DomainError> {
        self.repo.delete(user_id, NAVIGATION_PREFERENCE_KEY).await?;
        info!("Reset navigation preferences for {}", user_id);
        Ok(apply_layout(&self.catalog, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockPreferenceRepository;
    use serde_json::json;

    fn saved(id: &str, hidden: bool) -> SavedNavigationEntry {
        SavedNavigationEntry { id: id.to_string(), hidden, children: vec![] }
    }

    #[tokio::test]
    async fn test_load_without_stored_state() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_get().returning(|_, _| Ok(None));

        let service = NavigationService::new(Arc::new(repo));
        let tree = service.load(&Uuid::new_v4()).await.unwrap();
        assert_eq!(tree, default_catalog());
    }

    #[tokio::test]
    async fn test_load_corrupt_state_uses_defaults() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_get().returning(|_, _| Ok(Some(json!("garbage"))));

        let service = NavigationService::new(Arc::new(repo));
        let tree = service.load(&Uuid::new_v4()).await.unwrap();
        assert_eq!(tree, default_catalog());
    }

    #[tokio::test]
    async fn test_save_persists_sanitized_layout() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_put()
            .withf(|_, key, value| {
                let items = value["items"].as_array().cloned().unwrap_or_default();
                key == NAVIGATION_PREFERENCE_KEY
                    && items.first().map(|i| i["id"] == "notes" && i["hidden"] == true).unwrap_or(false)
                    && items.iter().all(|i| i["id"] != "legacy")
                    && items.len() == default_catalog().len()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = NavigationService::new(Arc::new(repo));
        let tree = service
            .save(&Uuid::new_v4(), &[saved("notes", true), saved("legacy", false)])
            .await
            .unwrap();
        assert_eq!(tree[0].id, "notes");
        assert!(tree[0].hidden);
        assert_eq!(tree[0].label, "Notes");
    }

    #[tokio::test]
    async fn test_save_propagates_store_failure() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_put()
            .returning(|_, _, _| Err(DomainError::DatabaseError("down".into())));

        let service = NavigationService::new(Arc::new(repo));
        let result = service.save(&Uuid::new_v4(), &[]).await;
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_reset_restores_catalog() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_delete().times(1).returning(|_, _| Ok(()));

        let service = NavigationService::new(Arc::new(repo));
        let tree = service.reset(&Uuid::new_v4()).await.unwrap();
        assert_eq!(tree, default_catalog());
    }
}
