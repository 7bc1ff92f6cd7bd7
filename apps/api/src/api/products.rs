use axum::Router;
use domain_products::{
    PgProductImageRepository, PgProductRepository, PgProductTagRepository, ProductImageService,
    ProductService, ProductTagService,
    handlers::{nested_images_router, product_tags_router, products_router},
};

/// Product CRUD plus the nested `/products/{id}/images` and
/// `/products/{id}/tags` routes.
pub fn router(state: &crate::state::AppState) -> Router {
    let product_service = ProductService::new(PgProductRepository::new(state.db.clone()));
    let image_service = ProductImageService::new(PgProductImageRepository::new(state.db.clone()));
    let tag_service = ProductTagService::new(PgProductTagRepository::new(state.db.clone()));

    products_router(product_service)
        .merge(nested_images_router(image_service))
        .merge(product_tags_router(tag_service))
}
