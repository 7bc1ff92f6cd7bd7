//! Categories Domain
//!
//! Category CRUD plus the nested product listing. Layered as
//! handlers → service → repository trait → sea-orm entities; the Postgres
//! repository is the production implementation, the mockall mock backs the
//! service unit tests.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_categories::{handlers, postgres::PgCategoryRepository, service::CategoryService};
//! # let db: sea_orm::DatabaseConnection = unimplemented!();
//!
//! let repository = PgCategoryRepository::new(db);
//! let service = CategoryService::new(repository);
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use models::{Category, CategoryListQuery, CreateCategory, ListCategories, NewCategory, UpdateCategory};
pub use postgres::PgCategoryRepository;
pub use repository::CategoryRepository;
pub use service::CategoryService;
