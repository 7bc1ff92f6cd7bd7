//! SeaORM entities for the catalog schema.
//!
//! Shared by the domain crates so cross-resource listings (products of a
//! category, products carrying a tag) can join without tying the domain
//! crates to each other.

pub mod categories;
pub mod product_images;
pub mod product_tags;
pub mod products;
pub mod tags;

pub mod prelude {
    pub use super::categories::Entity as Categories;
    pub use super::product_images::Entity as ProductImages;
    pub use super::product_tags::Entity as ProductTags;
    pub use super::products::Entity as Products;
    pub use super::tags::Entity as Tags;
}
