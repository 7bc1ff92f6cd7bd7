use async_trait::async_trait;
use domain_products::{ListScopedProducts, Product};

use crate::error::CategoryResult;
use crate::models::{Category, ListCategories, NewCategory, UpdateCategory};

/// Repository trait for Category persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category, enforcing name/slug uniqueness
    async fn create(&self, input: NewCategory) -> CategoryResult<Category>;

    async fn get_by_id(&self, id: i64) -> CategoryResult<Option<Category>>;

    /// List categories matching the filters; returns the page and the total
    async fn list(&self, params: ListCategories) -> CategoryResult<(Vec<Category>, u64)>;

    /// Apply a partial update, enforcing uniqueness on changed fields
    async fn update(&self, id: i64, changes: UpdateCategory) -> CategoryResult<Category>;

    /// Delete a category; its products keep existing with a null category
    async fn delete(&self, id: i64) -> CategoryResult<bool>;

    /// Products belonging to a category, filtered and paginated
    async fn list_products(
        &self,
        category_id: i64,
        params: ListScopedProducts,
    ) -> CategoryResult<(Vec<Product>, u64)>;
}
