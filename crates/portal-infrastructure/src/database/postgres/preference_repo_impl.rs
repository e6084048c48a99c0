// ============================================================================
// Portal Infrastructure - PostgreSQL Preference Repository
// File: crates/portal-infrastructure/src/database/postgres/preference_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, error};
use uuid::Uuid;

use portal_core::error::DomainError;
use portal_core::repositories::PreferenceRepository;

pub struct PgPreferenceRepository {
    pool: PgPool,
}

impl PgPreferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceRepository for PgPreferenceRepository {
    async fn get(&self, user_id: &Uuid, key: &str) -> Result<Option<Value>, DomainError> {
        sqlx::query_scalar::<_, Value>(
            r#"
            SELECT pref_value
            FROM user_preferences
            WHERE user_id = $1 AND pref_key = $2
            "#
        )
        .bind(user_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error reading preference {}: {}", key, e);
            DomainError::DatabaseError(e.to_string())
        })
    }

    async fn put(&self, user_id: &Uuid, key: &str, value: &Value) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, pref_key, pref_value, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, pref_key)
            DO UPDATE SET pref_value = EXCLUDED.pref_value, updated_at = NOW()
            "#
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error writing preference {}: {}", key, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!("Stored preference {} for {}", key, user_id);
        Ok(())
    }

    async fn delete(&self, user_id: &Uuid, key: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM user_preferences WHERE user_id = $1 AND pref_key = $2")
            .bind(user_id)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting preference {}: {}", key, e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
