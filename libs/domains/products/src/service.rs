use axum_helpers::query::{SortSpec, default_per_page};
use domain_tags::{Tag, TagListQuery};
use std::sync::Arc;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    BatchSortRequest, CreateNestedImage, CreateProduct, CreateProductImage, ImageListQuery,
    ListImages, NESTED_IMAGE_SORTABLE_COLUMNS, NestedImageQuery, Product, ProductImage,
    ProductListQuery, ProductScopeQuery, SyncTagsRequest, UpdateProduct, UpdateProductImage,
};
use crate::repository::{ProductImageRepository, ProductRepository, ProductTagRepository};

/// Service layer for Product business logic.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input.into_new()).await
    }

    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::ProductNotFound(id))
    }

    pub async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> ProductResult<(Vec<Product>, u64)> {
        self.repository.list(query.page, query.per_page).await
    }

    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::ProductNotFound(id));
        }
        Ok(())
    }
}

/// Service layer for ProductImage business logic.
#[derive(Clone)]
pub struct ProductImageService<R: ProductImageRepository> {
    repository: Arc<R>,
}

impl<R: ProductImageRepository> ProductImageService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create an image; a true `is_primary` demotes sibling primaries.
    pub async fn create_image(&self, input: CreateProductImage) -> ProductResult<ProductImage> {
        input.validate()?;
        self.repository.create(input.into_new()).await
    }

    /// Create an image under `POST /products/{id}/images`; an unknown
    /// product id is a 404 here, not a field error.
    pub async fn create_for_product(
        &self,
        product_id: i64,
        input: CreateNestedImage,
    ) -> ProductResult<ProductImage> {
        input.validate()?;
        if !self.repository.product_exists(product_id).await? {
            return Err(ProductError::ProductNotFound(product_id));
        }
        self.repository.create(input.into_new(product_id)).await
    }

    pub async fn get_image(&self, id: i64) -> ProductResult<ProductImage> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::ImageNotFound(id))
    }

    pub async fn list_images(
        &self,
        query: ImageListQuery,
    ) -> ProductResult<(Vec<ProductImage>, u64)> {
        self.repository.list(query.into()).await
    }

    pub async fn list_for_product(
        &self,
        product_id: i64,
        query: NestedImageQuery,
    ) -> ProductResult<(Vec<ProductImage>, u64)> {
        if !self.repository.product_exists(product_id).await? {
            return Err(ProductError::ProductNotFound(product_id));
        }

        let params = ListImages {
            product_id: Some(product_id),
            is_active: query.is_active,
            sort: SortSpec::parse(query.sort.as_deref(), NESTED_IMAGE_SORTABLE_COLUMNS),
            page: query.page,
            per_page: query.per_page,
        };
        self.repository.list(params).await
    }

    pub async fn update_image(
        &self,
        id: i64,
        input: UpdateProductImage,
    ) -> ProductResult<ProductImage> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    pub async fn delete_image(&self, id: i64) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::ImageNotFound(id));
        }
        Ok(())
    }

    pub async fn make_primary(&self, id: i64) -> ProductResult<ProductImage> {
        self.repository.make_primary(id).await
    }

    /// Apply a batch of sort-order updates, then return the product's
    /// images ordered by sort_order.
    pub async fn batch_sort(
        &self,
        product_id: i64,
        request: BatchSortRequest,
    ) -> ProductResult<(Vec<ProductImage>, u64)> {
        request.validate()?;
        if !self.repository.product_exists(product_id).await? {
            return Err(ProductError::ProductNotFound(product_id));
        }

        self.repository
            .batch_sort(product_id, request.into_entries())
            .await?;

        let params = ListImages {
            product_id: Some(product_id),
            is_active: None,
            sort: SortSpec {
                column: "sort_order".to_string(),
                descending: false,
            },
            page: 1,
            per_page: default_per_page(),
        };
        self.repository.list(params).await
    }
}

/// Service layer for product↔tag association logic.
#[derive(Clone)]
pub struct ProductTagService<R: ProductTagRepository> {
    repository: Arc<R>,
}

impl<R: ProductTagRepository> ProductTagService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_tags(
        &self,
        product_id: i64,
        query: TagListQuery,
    ) -> ProductResult<(Vec<Tag>, u64)> {
        if !self.repository.product_exists(product_id).await? {
            return Err(ProductError::ProductNotFound(product_id));
        }
        self.repository.list_tags(product_id, query.into()).await
    }

    pub async fn list_products_for_tag(
        &self,
        tag_id: i64,
        query: ProductScopeQuery,
    ) -> ProductResult<(Vec<Product>, u64)> {
        if !self.repository.tag_exists(tag_id).await? {
            return Err(ProductError::TagNotFound(tag_id));
        }
        self.repository.list_products(tag_id, query.into()).await
    }

    /// Replace the product's tag set and return the resulting tags.
    pub async fn sync(
        &self,
        product_id: i64,
        request: SyncTagsRequest,
    ) -> ProductResult<Vec<Tag>> {
        request.validate()?;
        if !self.repository.product_exists(product_id).await? {
            return Err(ProductError::ProductNotFound(product_id));
        }

        self.repository
            .sync(product_id, request.tag_ids.unwrap_or_default())
            .await?;
        self.repository.all_tags(product_id).await
    }

    pub async fn attach(&self, product_id: i64, tag_id: i64) -> ProductResult<()> {
        if !self.repository.product_exists(product_id).await? {
            return Err(ProductError::ProductNotFound(product_id));
        }
        if !self.repository.tag_exists(tag_id).await? {
            return Err(ProductError::TagNotFound(tag_id));
        }
        self.repository.attach(product_id, tag_id).await
    }

    pub async fn detach(&self, product_id: i64, tag_id: i64) -> ProductResult<()> {
        if !self.repository.product_exists(product_id).await? {
            return Err(ProductError::ProductNotFound(product_id));
        }
        if !self.repository.tag_exists(tag_id).await? {
            return Err(ProductError::TagNotFound(tag_id));
        }
        self.repository.detach(product_id, tag_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        MockProductImageRepository, MockProductRepository, MockProductTagRepository,
    };
    use chrono::Utc;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sample_image(id: i64, product_id: i64, sort_order: i32) -> ProductImage {
        let now = Utc::now();
        ProductImage {
            id,
            product_id,
            url: format!("https://cdn.example.com/{id}.jpg"),
            alt: None,
            is_primary: false,
            sort_order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_product_rounds_price() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .withf(|input| input.price == Decimal::from_str("10.56").unwrap())
            .returning(|input| {
                let now = Utc::now();
                Ok(Product {
                    id: 1,
                    category_id: input.category_id,
                    name: input.name,
                    description: input.description,
                    price: input.price,
                    stock: input.stock,
                    is_active: input.is_active,
                    created_at: now,
                    updated_at: now,
                })
            });

        let service = ProductService::new(mock_repo);
        let product = service
            .create_product(CreateProduct {
                category_id: None,
                name: Some("Mug".to_string()),
                description: None,
                price: Some(Decimal::from_str("10.555").unwrap()),
                stock: None,
                is_active: None,
            })
            .await
            .unwrap();

        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn test_create_product_missing_fields() {
        let service = ProductService::new(MockProductRepository::new());

        let result = service
            .create_product(CreateProduct {
                category_id: None,
                name: None,
                description: None,
                price: None,
                stock: None,
                is_active: None,
            })
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .with(eq(9))
            .returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.delete_product(9).await,
            Err(ProductError::ProductNotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_batch_sort_returns_reordered_images() {
        let mut mock_repo = MockProductImageRepository::new();
        mock_repo
            .expect_product_exists()
            .with(eq(5))
            .returning(|_| Ok(true));
        mock_repo
            .expect_batch_sort()
            .withf(|product_id, entries| {
                *product_id == 5
                    && entries
                        == &[
                            crate::models::SortEntry {
                                id: 11,
                                sort_order: 2,
                            },
                            crate::models::SortEntry {
                                id: 12,
                                sort_order: 1,
                            },
                        ]
            })
            .returning(|_, _| Ok(()));
        mock_repo
            .expect_list()
            .withf(|params| {
                params.product_id == Some(5)
                    && params.sort.column == "sort_order"
                    && !params.sort.descending
            })
            .returning(|_| Ok((vec![sample_image(12, 5, 1), sample_image(11, 5, 2)], 2)));

        let service = ProductImageService::new(mock_repo);
        let (images, total) = service
            .batch_sort(
                5,
                BatchSortRequest {
                    items: Some(vec![
                        crate::models::SortItem {
                            id: Some(11),
                            sort_order: Some(2),
                        },
                        crate::models::SortItem {
                            id: Some(12),
                            sort_order: Some(1),
                        },
                    ]),
                },
            )
            .await
            .unwrap();

        assert_eq!(total, 2);
        assert_eq!(images[0].id, 12);
    }

    #[tokio::test]
    async fn test_batch_sort_on_missing_product() {
        let mut mock_repo = MockProductImageRepository::new();
        mock_repo
            .expect_product_exists()
            .with(eq(404))
            .returning(|_| Ok(false));

        let service = ProductImageService::new(mock_repo);
        let result = service
            .batch_sort(
                404,
                BatchSortRequest {
                    items: Some(vec![crate::models::SortItem {
                        id: Some(1),
                        sort_order: Some(0),
                    }]),
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::ProductNotFound(404))));
    }

    #[tokio::test]
    async fn test_nested_image_create_checks_product() {
        let mut mock_repo = MockProductImageRepository::new();
        mock_repo
            .expect_product_exists()
            .with(eq(2))
            .returning(|_| Ok(false));

        let service = ProductImageService::new(mock_repo);
        let result = service
            .create_for_product(
                2,
                CreateNestedImage {
                    url: Some("https://cdn.example.com/a.jpg".to_string()),
                    alt: None,
                    is_primary: None,
                    sort_order: None,
                    is_active: None,
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::ProductNotFound(2))));
    }

    #[tokio::test]
    async fn test_sync_requires_tag_ids_field() {
        let service = ProductTagService::new(MockProductTagRepository::new());

        let result = service.sync(1, SyncTagsRequest { tag_ids: None }).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_sync_returns_resulting_tags() {
        let mut mock_repo = MockProductTagRepository::new();
        mock_repo
            .expect_product_exists()
            .with(eq(1))
            .returning(|_| Ok(true));
        mock_repo
            .expect_sync()
            .with(eq(1), eq(vec![3, 4]))
            .returning(|_, _| Ok(()));
        mock_repo.expect_all_tags().with(eq(1)).returning(|_| {
            let now = Utc::now();
            Ok(vec![Tag {
                id: 3,
                name: "sale".to_string(),
                slug: "sale".to_string(),
                description: None,
                is_active: true,
                created_at: now,
                updated_at: now,
            }])
        });

        let service = ProductTagService::new(mock_repo);
        let tags = service
            .sync(
                1,
                SyncTagsRequest {
                    tag_ids: Some(vec![3, 4]),
                },
            )
            .await
            .unwrap();

        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, 3);
    }

    #[tokio::test]
    async fn test_attach_missing_tag_is_not_found() {
        let mut mock_repo = MockProductTagRepository::new();
        mock_repo
            .expect_product_exists()
            .with(eq(1))
            .returning(|_| Ok(true));
        mock_repo
            .expect_tag_exists()
            .with(eq(99))
            .returning(|_| Ok(false));

        let service = ProductTagService::new(mock_repo);
        assert!(matches!(
            service.attach(1, 99).await,
            Err(ProductError::TagNotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_detach_is_idempotent() {
        let mut mock_repo = MockProductTagRepository::new();
        mock_repo
            .expect_product_exists()
            .returning(|_| Ok(true));
        mock_repo.expect_tag_exists().returning(|_| Ok(true));
        mock_repo
            .expect_detach()
            .with(eq(1), eq(2))
            .times(2)
            .returning(|_, _| Ok(()));

        let service = ProductTagService::new(mock_repo);
        service.detach(1, 2).await.unwrap();
        service.detach(1, 2).await.unwrap();
    }
}
