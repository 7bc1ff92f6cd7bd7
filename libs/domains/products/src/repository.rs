use async_trait::async_trait;
use domain_tags::{ListTags, Tag};

use crate::error::ProductResult;
use crate::models::{
    ListImages, ListScopedProducts, NewImage, NewProduct, Product, ProductImage, SortEntry,
    UpdateProduct, UpdateProductImage,
};

/// Repository trait for Product persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product, verifying the referenced category exists
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Newest-first page of all products
    async fn list(&self, page: u64, per_page: u64) -> ProductResult<(Vec<Product>, u64)>;

    async fn update(&self, id: i64, changes: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product; images cascade at the database level
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

/// Repository trait for ProductImage persistence.
///
/// Every write that promotes an image to primary demotes its siblings in
/// the same transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductImageRepository: Send + Sync {
    /// Insert a new image, verifying the owning product exists
    async fn create(&self, input: NewImage) -> ProductResult<ProductImage>;

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<ProductImage>>;

    async fn list(&self, params: ListImages) -> ProductResult<(Vec<ProductImage>, u64)>;

    async fn update(&self, id: i64, changes: UpdateProductImage) -> ProductResult<ProductImage>;

    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// Force an image to be its product's primary
    async fn make_primary(&self, id: i64) -> ProductResult<ProductImage>;

    /// Apply sort-order updates scoped to one product.
    ///
    /// Ids missing from the table entirely are an error; ids belonging to a
    /// different product are skipped.
    async fn batch_sort(&self, product_id: i64, entries: Vec<SortEntry>) -> ProductResult<()>;

    async fn product_exists(&self, product_id: i64) -> ProductResult<bool>;
}

/// Repository trait for product↔tag associations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductTagRepository: Send + Sync {
    /// Tags attached to a product, filtered and paginated
    async fn list_tags(&self, product_id: i64, params: ListTags)
    -> ProductResult<(Vec<Tag>, u64)>;

    /// Products carrying a tag, filtered and paginated
    async fn list_products(
        &self,
        tag_id: i64,
        params: ListScopedProducts,
    ) -> ProductResult<(Vec<Product>, u64)>;

    /// All tags attached to a product, ordered by id
    async fn all_tags(&self, product_id: i64) -> ProductResult<Vec<Tag>>;

    /// Replace the product's tag set, preserving associations that stay.
    /// Every id must reference an existing tag.
    async fn sync(&self, product_id: i64, tag_ids: Vec<i64>) -> ProductResult<()>;

    /// Attach a tag; no-op when already attached
    async fn attach(&self, product_id: i64, tag_id: i64) -> ProductResult<()>;

    /// Detach a tag; no-op when not attached
    async fn detach(&self, product_id: i64, tag_id: i64) -> ProductResult<()>;

    async fn product_exists(&self, product_id: i64) -> ProductResult<bool>;

    async fn tag_exists(&self, tag_id: i64) -> ProductResult<bool>;
}
