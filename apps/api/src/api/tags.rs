use axum::Router;
use domain_products::{PgProductTagRepository, ProductTagService, handlers::tag_products_router};
use domain_tags::{PgTagRepository, TagService, handlers};

/// Tag CRUD plus the `/tags/{id}/products` association listing, which is
/// served by the products domain.
pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgTagRepository::new(state.db.clone());
    let service = TagService::new(repository);

    let association_repository = PgProductTagRepository::new(state.db.clone());
    let association_service = ProductTagService::new(association_repository);

    handlers::router(service).merge(tag_products_router(association_service))
}
