//! Topic payloads

use serde::Deserialize;
use validator::Validate;

use portal_core::domain::TopicDraft;
use portal_shared::TopicId;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct TopicTreeQuery {
    #[validate(length(max = 200, message = "Search term too long"))]
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub parent_id: Option<TopicId>,
}

impl CreateTopicRequest {
    /// Normalize and validate into a draft
    pub fn into_draft(self) -> Result<TopicDraft, validator::ValidationErrors> {
        TopicDraft::new(self.slug, self.title, self.description, self.tags, self.parent_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_camel_case() {
        let req: CreateTopicRequest = serde_json::from_value(serde_json::json!({
            "slug": " Ferns ",
            "title": "Ferns",
            "parentId": 3
        }))
        .unwrap();
        let draft = req.into_draft().unwrap();
        assert_eq!(draft.slug, "ferns");
        assert_eq!(draft.parent_id, Some(3));
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn test_search_length_limit() {
        let query = TopicTreeQuery { search: Some("x".repeat(201)) };
        assert!(query.validate().is_err());
        assert!(TopicTreeQuery::default().validate().is_ok());
    }
}
