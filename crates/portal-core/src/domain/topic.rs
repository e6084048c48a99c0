// ============================================================================
// Portal Core - Topic Entity
// File: crates/portal-core/src/domain/topic.rs
// Description: Topic taxonomy rows and nested tree nodes
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use portal_shared::constants::{MAX_TAG_LENGTH, MAX_TOPIC_TAGS};
use portal_shared::TopicId;

/// Flat topic row as returned by the storage query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRow {
    pub id: TopicId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub parent_topic_id: Option<TopicId>,
    pub article_count: i64,
}

/// Topic node in an assembled forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicNode {
    pub id: TopicId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub parent_id: Option<TopicId>,
    pub article_count: i64,
    pub children: Vec<TopicNode>,
}

impl From<TopicRow> for TopicNode {
    fn from(row: TopicRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            description: row.description,
            tags: row.tags,
            parent_id: row.parent_topic_id,
            article_count: row.article_count.max(0),
            children: Vec::new(),
        }
    }
}

impl TopicNode {
    /// Number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TopicNode::node_count).sum::<usize>()
    }
}

/// Input for creating a topic
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TopicDraft {
    #[validate(
        length(min = 1, max = 100, message = "Slug must be between 1 and 100 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: String,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description too long"))]
    pub description: String,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,

    pub parent_id: Option<TopicId>,
}

impl TopicDraft {
    pub fn new(
        slug: String,
        title: String,
        description: Option<String>,
        tags: Vec<String>,
        parent_id: Option<TopicId>,
    ) -> Result<Self, validator::ValidationErrors> {
        let mut seen = std::collections::HashSet::new();
        let tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
            .collect();

        let draft = Self {
            slug: slug.trim().to_lowercase(),
            title: title.trim().to_string(),
            description: description.map(|d| d.trim().to_string()).unwrap_or_default(),
            tags,
            parent_id,
        };

        draft.validate()?;
        Ok(draft)
    }
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("slug")
            .with_message("Slug may only contain lowercase letters, digits and inner hyphens".into()))
    }
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TOPIC_TAGS {
        return Err(ValidationError::new("tags").with_message("Too many tags".into()));
    }
    if tags.iter().any(|t| t.chars().count() > MAX_TAG_LENGTH) {
        return Err(ValidationError::new("tags").with_message("Tag too long".into()));
    }
    Ok(())
}
