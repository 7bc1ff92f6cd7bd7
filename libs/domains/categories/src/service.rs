use domain_products::{Product, ProductScopeQuery};
use std::sync::Arc;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryListQuery, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Service layer for Category business logic.
#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a category, deriving the slug from the name when absent.
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        input.validate()?;
        self.repository.create(input.into_new()).await
    }

    pub async fn get_category(&self, id: i64) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    pub async fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> CategoryResult<(Vec<Category>, u64)> {
        self.repository.list(query.into()).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    pub async fn delete_category(&self, id: i64) -> CategoryResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CategoryError::NotFound(id));
        }
        Ok(())
    }

    /// Products of a category; a missing category is a 404.
    pub async fn list_products(
        &self,
        id: i64,
        query: ProductScopeQuery,
    ) -> CategoryResult<(Vec<Product>, u64)> {
        self.get_category(id).await?;
        self.repository.list_products(id, query.into()).await
    }
}
