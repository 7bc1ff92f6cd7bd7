//! HTTP endpoints for products, product images, and tag associations.
//!
//! Three routers are exposed:
//! - [`products::router`] plus the nested image/tag routes, mounted at
//!   `/products`
//! - [`images::router`], mounted at `/product-images`
//! - [`tags::tag_products_router`], merged into the `/tags` mount

pub mod images;
pub mod products;
pub mod tags;

pub use images::{nested_router as nested_images_router, router as images_router};
pub use products::router as products_router;
pub use tags::{product_tags_router, tag_products_router};
