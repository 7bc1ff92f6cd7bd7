//! Tags Domain
//!
//! Tag CRUD with slug derivation and list filtering. Layered as
//! handlers → service → repository trait → sea-orm entities; the Postgres
//! repository is the production implementation, the mockall mock backs the
//! service unit tests.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tags::{handlers, postgres::PgTagRepository, service::TagService};
//! # let db: sea_orm::DatabaseConnection = unimplemented!();
//!
//! let repository = PgTagRepository::new(db);
//! let service = TagService::new(repository);
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{TagError, TagResult};
pub use models::{CreateTag, ListTags, NewTag, Tag, TagListQuery, UpdateTag};
pub use postgres::PgTagRepository;
pub use repository::TagRepository;
pub use service::TagService;
