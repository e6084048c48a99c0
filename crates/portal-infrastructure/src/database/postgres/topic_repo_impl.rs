// ============================================================================
// Portal Infrastructure - PostgreSQL Topic Repository
// File: crates/portal-infrastructure/src/database/postgres/topic_repo_impl.rs
// ============================================================================

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info};

use portal_core::domain::{TopicDraft, TopicRow};
use portal_core::error::DomainError;
use portal_core::repositories::TopicRepository;
use portal_shared::TopicId;

pub struct PgTopicRepository {
    pool: PgPool,
}

impl PgTopicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TopicDbRow {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub parent_topic_id: Option<i32>,
    pub article_count: i64,
}

impl From<TopicDbRow> for TopicRow {
    fn from(row: TopicDbRow) -> Self {
        TopicRow {
            id: row.id,
            slug: row.slug,
            title: row.title,
            description: row.description,
            tags: row.tags,
            parent_topic_id: row.parent_topic_id,
            article_count: row.article_count,
        }
    }
}

const TOPIC_COLUMNS: &str = r#"
    t.id, t.slug, t.title,
    COALESCE(t.description, '') AS description,
    t.tags, t.parent_topic_id,
    (SELECT COUNT(*) FROM articles a WHERE a.topic_id = t.id) AS article_count
"#;

/// `%term%` for ILIKE with the pattern metacharacters escaped
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl TopicRepository for PgTopicRepository {
    async fn list_topics(&self) -> Result<Vec<TopicRow>, DomainError> {
        let rows: Vec<TopicDbRow> = sqlx::query_as(&format!(
            "SELECT {} FROM topics t ORDER BY t.id",
            TOPIC_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing topics", e))?;

        debug!("Loaded {} topic rows", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn search_article_topic_ids(&self, term: &str) -> Result<HashSet<TopicId>, DomainError> {
        let ids: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT topic_id
            FROM articles
            WHERE to_tsvector('simple', title || ' ' || content) @@ plainto_tsquery('simple', $1)
               OR title ILIKE $2
            "#
        )
        .bind(term)
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("searching articles", e))?;

        debug!("Article search '{}' matched {} topics", term, ids.len());
        Ok(ids.into_iter().collect())
    }

    async fn find_by_id(&self, id: TopicId) -> Result<Option<TopicRow>, DomainError> {
        let row: Option<TopicDbRow> = sqlx::query_as(&format!(
            "SELECT {} FROM topics t WHERE t.id = $1",
            TOPIC_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding topic by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<TopicRow>, DomainError> {
        let row: Option<TopicDbRow> = sqlx::query_as(&format!(
            "SELECT {} FROM topics t WHERE LOWER(t.slug) = LOWER($1)",
            TOPIC_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding topic by slug", e))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, draft: &TopicDraft) -> Result<TopicRow, DomainError> {
        info!("Creating topic with slug: {}", draft.slug);

        let row: TopicDbRow = sqlx::query_as(
            r#"
            INSERT INTO topics (slug, title, description, tags, parent_topic_id)
            VALUES ($1, $2, NULLIF($3, ''), $4, $5)
            RETURNING
                id, slug, title,
                COALESCE(description, '') AS description,
                tags, parent_topic_id,
                0::BIGINT AS article_count
            "#
        )
        .bind(&draft.slug)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.tags)
        .bind(draft.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique = e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);
            if unique {
                DomainError::TopicSlugAlreadyExists(draft.slug.clone())
            } else {
                db_error("creating topic", e)
            }
        })?;

        info!("Topic created successfully: {}", row.id);
        Ok(row.into())
    }
}
