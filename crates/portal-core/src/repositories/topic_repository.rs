//! Topic repository trait (port)

use std::collections::HashSet;

use async_trait::async_trait;
use portal_shared::TopicId;
use crate::domain::{TopicDraft, TopicRow};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// All topics with their article counts, in storage order
    async fn list_topics(&self) -> Result<Vec<TopicRow>, DomainError>;

    /// Ids of topics owning at least one article whose text matches `term`
    async fn search_article_topic_ids(&self, term: &str) -> Result<HashSet<TopicId>, DomainError>;

    async fn find_by_id(&self, id: TopicId) -> Result<Option<TopicRow>, DomainError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<TopicRow>, DomainError>;
    async fn create(&self, draft: &TopicDraft) -> Result<TopicRow, DomainError>;
}
