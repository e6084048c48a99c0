//! Per-user preference store (port)
//!
//! A key-value collaborator: values are opaque JSON blobs, interpretation is
//! left to the owning service.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn get(&self, user_id: &Uuid, key: &str) -> Result<Option<Value>, DomainError>;
    async fn put(&self, user_id: &Uuid, key: &str, value: &Value) -> Result<(), DomainError>;
    async fn delete(&self, user_id: &Uuid, key: &str) -> Result<(), DomainError>;
}
