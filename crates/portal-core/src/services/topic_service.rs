// ============================================================================
// Portal Core - Topic Service
// File: crates/portal-core/src/services/topic_service.rs
// ============================================================================
//! Topic tree queries and topic creation

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use portal_shared::constants::MAX_TOPIC_DEPTH;
use portal_shared::utils::normalize_search;
use portal_shared::TopicId;

use crate::domain::{TopicDraft, TopicNode};
use crate::error::DomainError;
use crate::repositories::TopicRepository;
use crate::topic_tree::build_topic_tree;

pub struct TopicService<R: TopicRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: TopicRepository + ?Sized> TopicService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Load every topic and assemble the filtered forest
    pub async fn tree(&self, search: Option<&str>) -> Result<Vec<TopicNode>, DomainError> {
        let rows = self.repo.list_topics().await?;

        let article_matches = match normalize_search(search) {
            Some(term) => self.repo.search_article_topic_ids(&term).await?,
            None => HashSet::new(),
        };

        Ok(build_topic_tree(rows, search, &article_matches))
    }

    pub async fn create(&self, draft: TopicDraft) -> Result<TopicNode, DomainError> {
        draft.validate()?;

        if self.repo.find_by_slug(&draft.slug).await?.is_some() {
            warn!("Topic creation failed: slug already exists: {}", draft.slug);
            return Err(DomainError::TopicSlugAlreadyExists(draft.slug));
        }

        if let Some(parent_id) = draft.parent_id {
            let depth = self.depth_below(parent_id).await?;
            if depth >= MAX_TOPIC_DEPTH {
                warn!("Topic creation failed: parent {} is nested too deep", parent_id);
                return Err(DomainError::ValidationError(format!(
                    "Topics may be nested at most {} levels deep",
                    MAX_TOPIC_DEPTH
                )));
            }
        }

        let row = self.repo.create(&draft).await?;
        info!("Topic created: {} ({})", row.slug, row.id);
        Ok(row.into())
    }

    /// Depth a new child of `parent_id` would sit at, counting up to the cap
    async fn depth_below(&self, parent_id: TopicId) -> Result<usize, DomainError> {
        let mut depth = 0;
        let mut current = Some(parent_id);

        while let Some(id) = current {
            let Some(row) = self.repo.find_by_id(id).await? else {
                if depth == 0 {
                    warn!("Topic creation failed: parent {} not found", id);
                    return Err(DomainError::ParentTopicNotFound(id));
                }
                // dangling ancestor, rendered as a root
                break;
            };
            depth += 1;
            if depth >= MAX_TOPIC_DEPTH {
                break;
            }
            current = row.parent_topic_id;
        }

        Ok(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TopicRow;
    use crate::repositories::MockTopicRepository;

    fn row(id: i32, title: &str, parent: Option<i32>) -> TopicRow {
        TopicRow {
            id,
            slug: title.to_lowercase(),
            title: title.to_string(),
            description: String::new(),
            tags: vec![],
            parent_topic_id: parent,
            article_count: 1,
        }
    }

    #[tokio::test]
    async fn test_tree_without_search_skips_article_lookup() {
        let mut repo = MockTopicRepository::new();
        repo.expect_list_topics()
            .returning(|| Ok(vec![row(1, "B", None), row(2, "A", None), row(3, "C", Some(1))]));
        repo.expect_search_article_topic_ids().never();

        let service = TopicService::new(Arc::new(repo));
        let tree = service.tree(Some("  ")).await.unwrap();
        assert_eq!(tree.iter().map(|n| n.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_tree_with_search_uses_article_hits() {
        let mut repo = MockTopicRepository::new();
        repo.expect_list_topics()
            .returning(|| Ok(vec![row(1, "Care", None), row(2, "Light", Some(1)), row(3, "Soil", None)]));
        repo.expect_search_article_topic_ids()
            .withf(|term| term == "repotting")
            .times(1)
            .returning(|_| Ok([3].into_iter().collect()));

        let service = TopicService::new(Arc::new(repo));
        let tree = service.tree(Some(" Repotting ")).await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 3);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_slug() {
        let mut repo = MockTopicRepository::new();
        repo.expect_find_by_slug()
            .returning(|_| Ok(Some(row(9, "ferns", None))));
        repo.expect_create().never();

        let service = TopicService::new(Arc::new(repo));
        let draft = TopicDraft::new("ferns".into(), "Ferns".into(), None, vec![], None).unwrap();
        let err = service.create(draft).await.unwrap_err();
        assert!(matches!(err, DomainError::TopicSlugAlreadyExists(slug) if slug == "ferns"));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_parent() {
        let mut repo = MockTopicRepository::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_create().never();

        let service = TopicService::new(Arc::new(repo));
        let draft = TopicDraft::new("ferns".into(), "Ferns".into(), None, vec![], Some(77)).unwrap();
        let err = service.create(draft).await.unwrap_err();
        assert!(matches!(err, DomainError::ParentTopicNotFound(77)));
    }

    #[tokio::test]
    async fn test_create_rejects_parent_at_depth_limit() {
        let mut repo = MockTopicRepository::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));
        // every topic hangs below the one with the next lower id
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(row(id, "Level", if id > 1 { Some(id - 1) } else { None }))));
        repo.expect_create().never();

        let service = TopicService::new(Arc::new(repo));
        let too_deep = TopicDraft::new("leaf".into(), "Leaf".into(), None, vec![], Some(500)).unwrap();
        let err = service.create(too_deep).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_allows_last_level() {
        let mut repo = MockTopicRepository::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(row(id, "Level", if id > 1 { Some(id - 1) } else { None }))));
        repo.expect_create().times(1).returning(|draft| {
            Ok(TopicRow {
                id: 1000,
                slug: draft.slug.clone(),
                title: draft.title.clone(),
                description: String::new(),
                tags: vec![],
                parent_topic_id: draft.parent_id,
                article_count: 0,
            })
        });

        let service = TopicService::new(Arc::new(repo));
        // parent at depth MAX - 2 puts the new topic on the last allowed level
        let parent = (MAX_TOPIC_DEPTH - 1) as i32;
        let draft = TopicDraft::new("leaf".into(), "Leaf".into(), None, vec![], Some(parent)).unwrap();
        assert_eq!(service.create(draft).await.unwrap().parent_id, Some(parent));
    }

    #[tokio::test]
    async fn test_create_inserts() {
        let mut repo = MockTopicRepository::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));
        repo.expect_find_by_id().returning(|id| Ok(Some(row(id, "Parent", None))));
        repo.expect_create().times(1).returning(|draft| {
            Ok(TopicRow {
                id: 10,
                slug: draft.slug.clone(),
                title: draft.title.clone(),
                description: draft.description.clone(),
                tags: draft.tags.clone(),
                parent_topic_id: draft.parent_id,
                article_count: 0,
            })
        });

        let service = TopicService::new(Arc::new(repo));
        let draft = TopicDraft::new("ferns".into(), "Ferns".into(), None, vec!["shade".into()], Some(1)).unwrap();
        let node = service.create(draft).await.unwrap();
        assert_eq!(node.id, 10);
        assert_eq!(node.parent_id, Some(1));
        assert!(node.children.is_empty());
    }
}
