//! Products Domain
//!
//! Product CRUD, product image management with the single-primary-image
//! invariant, batch sort-order updates, and product↔tag association
//! management. Layered as handlers → services → repository traits →
//! sea-orm entities, with Postgres implementations for production and
//! mockall mocks for service unit tests.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     postgres::{PgProductImageRepository, PgProductRepository, PgProductTagRepository},
//!     service::{ProductImageService, ProductService, ProductTagService},
//! };
//! # let db: sea_orm::DatabaseConnection = unimplemented!();
//!
//! let products = handlers::products_router(ProductService::new(PgProductRepository::new(db.clone())))
//!     .merge(handlers::nested_images_router(ProductImageService::new(
//!         PgProductImageRepository::new(db.clone()),
//!     )))
//!     .merge(handlers::product_tags_router(ProductTagService::new(
//!         PgProductTagRepository::new(db),
//!     )));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{
    BatchSortRequest, CreateNestedImage, CreateProduct, CreateProductImage, ImageListQuery,
    ListImages, ListScopedProducts, NestedImageQuery, NewImage, NewProduct, Product, ProductImage,
    ProductListQuery, ProductScopeQuery, SortEntry, SortItem, SyncTagsRequest, UpdateProduct,
    UpdateProductImage,
};
pub use postgres::{PgProductImageRepository, PgProductRepository, PgProductTagRepository};
pub use repository::{ProductImageRepository, ProductRepository, ProductTagRepository};
pub use service::{ProductImageService, ProductService, ProductTagService};
