use std::sync::Arc;
use validator::Validate;

use crate::error::{TagError, TagResult};
use crate::models::{CreateTag, Tag, TagListQuery, UpdateTag};
use crate::repository::TagRepository;

/// Service layer for Tag business logic.
#[derive(Clone)]
pub struct TagService<R: TagRepository> {
    repository: Arc<R>,
}

impl<R: TagRepository> TagService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a tag, deriving the slug from the name when absent.
    pub async fn create_tag(&self, input: CreateTag) -> TagResult<Tag> {
        input.validate()?;
        self.repository.create(input.into_new()).await
    }

    pub async fn get_tag(&self, id: i64) -> TagResult<Tag> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TagError::NotFound(id))
    }

    /// List tags; returns the page of tags and the total match count.
    pub async fn list_tags(&self, query: TagListQuery) -> TagResult<(Vec<Tag>, u64)> {
        self.repository.list(query.into()).await
    }

    pub async fn update_tag(&self, id: i64, input: UpdateTag) -> TagResult<Tag> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    pub async fn delete_tag(&self, id: i64) -> TagResult<()> {
        if !self.repository.delete(id).await? {
            return Err(TagError::NotFound(id));
        }
        Ok(())
    }
}
