//! Postgres implementations of the product repositories.

pub mod images;
pub mod products;
pub mod tags;

pub use images::PgProductImageRepository;
pub use products::PgProductRepository;
pub use tags::PgProductTagRepository;
