use async_trait::async_trait;

use crate::error::TagResult;
use crate::models::{ListTags, NewTag, Tag, UpdateTag};

/// Repository trait for Tag persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Insert a new tag, enforcing name/slug uniqueness
    async fn create(&self, input: NewTag) -> TagResult<Tag>;

    /// Get a tag by id
    async fn get_by_id(&self, id: i64) -> TagResult<Option<Tag>>;

    /// List tags matching the filters; returns the page and the total count
    async fn list(&self, params: ListTags) -> TagResult<(Vec<Tag>, u64)>;

    /// Apply a partial update, enforcing uniqueness on changed fields
    async fn update(&self, id: i64, changes: UpdateTag) -> TagResult<Tag>;

    /// Delete a tag by id; returns whether a row was removed
    async fn delete(&self, id: i64) -> TagResult<bool>;
}
