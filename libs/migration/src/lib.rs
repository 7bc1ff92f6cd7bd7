pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_categories;
mod m20260105_000002_create_tags;
mod m20260105_000003_create_products;
mod m20260105_000004_create_product_images;
mod m20260105_000005_create_product_tag;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_categories::Migration),
            Box::new(m20260105_000002_create_tags::Migration),
            Box::new(m20260105_000003_create_products::Migration),
            Box::new(m20260105_000004_create_product_images::Migration),
            Box::new(m20260105_000005_create_product_tag::Migration),
        ]
    }
}
