// ============================================================================
// Portal Infrastructure - PostgreSQL User Repository
// File: crates/portal-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, warn};
use uuid::Uuid;

use portal_core::domain::{User, UserRole};
use portal_core::error::DomainError;
use portal_core::repositories::UserRepository;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let role = UserRole::parse(&row.role).unwrap_or_else(|| {
            warn!("Unknown role '{}' for user {}, treating as viewer", row.role, row.id);
            UserRole::Viewer
        });
        User {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            password_hash: row.password_hash,
            role,
            is_active: row.is_active,
            last_login_at: row.last_login_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT
                id, email, display_name, password_hash,
                role, is_active, last_login_at, created_at
            FROM users
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT
                id, email, display_name, password_hash,
                role, is_active, last_login_at, created_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by email: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn record_login(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET last_login_at = $2 WHERE id = $1")
            .bind(user.id)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error recording login: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
