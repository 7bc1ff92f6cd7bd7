use axum::Router;
use domain_products::{PgProductImageRepository, ProductImageService, handlers::images_router};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgProductImageRepository::new(state.db.clone());
    let service = ProductImageService::new(repository);
    images_router(service)
}
