use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, Page, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, InternalServerErrorResponse, NotFoundResponse,
        ValidationErrorResponse,
    },
};
use domain_tags::{Tag, TagListQuery};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{Product, ProductScopeQuery, SyncTagsRequest};
use crate::repository::ProductTagRepository;
use crate::service::ProductTagService;

/// OpenAPI documentation for tag routes nested under `/products`
#[derive(OpenApi)]
#[openapi(
    paths(list_product_tags, sync_tags, attach_tag, detach_tag),
    components(schemas(SyncTagsRequest)),
    tags(
        (name = "product-tags", description = "Product tag association endpoints")
    )
)]
pub struct ProductTagsApiDoc;

/// OpenAPI documentation for the `/tags/{id}/products` route
#[derive(OpenApi)]
#[openapi(
    paths(list_tag_products),
    tags(
        (name = "product-tags", description = "Product tag association endpoints")
    )
)]
pub struct TagProductsApiDoc;

/// Tag association routes mounted under `/products`
pub fn product_tags_router<R: ProductTagRepository + 'static>(
    service: ProductTagService<R>,
) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/{id}/tags", get(list_product_tags).put(sync_tags))
        .route(
            "/{id}/tags/{tag_id}",
            axum::routing::post(attach_tag).delete(detach_tag),
        )
        .with_state(shared_service)
}

/// Products-of-a-tag route, merged into the `/tags` mount
pub fn tag_products_router<R: ProductTagRepository + 'static>(
    service: ProductTagService<R>,
) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/{id}/products", get(list_tag_products))
        .with_state(shared_service)
}

/// List a product's tags
#[utoipa::path(
    get,
    path = "/{id}/tags",
    tag = "product-tags",
    params(
        ("id" = i64, Path, description = "Product id"),
        TagListQuery
    ),
    responses(
        (status = 200, description = "Page of the product's tags", body = Page<Tag>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_product_tags<R: ProductTagRepository>(
    State(service): State<Arc<ProductTagService<R>>>,
    IdPath(id): IdPath,
    Query(query): Query<TagListQuery>,
) -> ProductResult<Json<Page<Tag>>> {
    let (page, per_page) = (query.page, query.per_page);
    let (tags, total) = service.list_tags(id, query).await?;
    let base_path = format!("/api/products/{}/tags", id);
    Ok(Json(Page::new(tags, total, page, per_page, &base_path)))
}

/// Replace the product's tag set
#[utoipa::path(
    put,
    path = "/{id}/tags",
    tag = "product-tags",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = SyncTagsRequest,
    responses(
        (status = 200, description = "Resulting tag set", body = Vec<Tag>),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn sync_tags<R: ProductTagRepository>(
    State(service): State<Arc<ProductTagService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<SyncTagsRequest>,
) -> ProductResult<Json<Vec<Tag>>> {
    let tags = service.sync(id, request).await?;
    Ok(Json(tags))
}

/// Attach a tag to a product; attaching twice is a no-op
#[utoipa::path(
    post,
    path = "/{id}/tags/{tag_id}",
    tag = "product-tags",
    params(
        ("id" = i64, Path, description = "Product id"),
        ("tag_id" = i64, Path, description = "Tag id")
    ),
    responses(
        (status = 204, description = "Tag attached"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn attach_tag<R: ProductTagRepository>(
    State(service): State<Arc<ProductTagService<R>>>,
    Path((id, tag_id)): Path<(i64, i64)>,
) -> ProductResult<impl IntoResponse> {
    service.attach(id, tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Detach a tag from a product; detaching an absent association still
/// returns 204
#[utoipa::path(
    delete,
    path = "/{id}/tags/{tag_id}",
    tag = "product-tags",
    params(
        ("id" = i64, Path, description = "Product id"),
        ("tag_id" = i64, Path, description = "Tag id")
    ),
    responses(
        (status = 204, description = "Tag detached"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn detach_tag<R: ProductTagRepository>(
    State(service): State<Arc<ProductTagService<R>>>,
    Path((id, tag_id)): Path<(i64, i64)>,
) -> ProductResult<impl IntoResponse> {
    service.detach(id, tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List products carrying a tag
#[utoipa::path(
    get,
    path = "/{id}/products",
    tag = "product-tags",
    params(
        ("id" = i64, Path, description = "Tag id"),
        ProductScopeQuery
    ),
    responses(
        (status = 200, description = "Page of products carrying the tag", body = Page<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tag_products<R: ProductTagRepository>(
    State(service): State<Arc<ProductTagService<R>>>,
    IdPath(id): IdPath,
    Query(query): Query<ProductScopeQuery>,
) -> ProductResult<Json<Page<Product>>> {
    let (page, per_page) = (query.page, query.per_page);
    let (products, total) = service.list_products_for_tag(id, query).await?;
    let base_path = format!("/api/tags/{}/products", id);
    Ok(Json(Page::new(products, total, page, per_page, &base_path)))
}
