use axum::{
    Json, Router,
    extract::{Query, State},
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
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TagResult;
use crate::models::{CreateTag, Tag, TagListQuery, UpdateTag};
use crate::repository::TagRepository;
use crate::service::TagService;

const BASE_PATH: &str = "/api/tags";

/// OpenAPI documentation for the Tags API
#[derive(OpenApi)]
#[openapi(
    paths(list_tags, create_tag, get_tag, update_tag, delete_tag),
    components(
        schemas(Tag, CreateTag, UpdateTag, Page<Tag>),
        responses(
            NotFoundResponse,
            ValidationErrorResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "tags", description = "Tag management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the tag router with all HTTP endpoints
pub fn router<R: TagRepository + 'static>(service: TagService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route(
            "/{id}",
            get(get_tag)
                .put(update_tag)
                .patch(update_tag)
                .delete(delete_tag),
        )
        .with_state(shared_service)
}

/// List tags with search, is_active and sort filters
#[utoipa::path(
    get,
    path = "",
    tag = "tags",
    params(TagListQuery),
    responses(
        (status = 200, description = "Page of tags", body = Page<Tag>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tags<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    Query(query): Query<TagListQuery>,
) -> TagResult<Json<Page<Tag>>> {
    let (page, per_page) = (query.page, query.per_page);
    let (tags, total) = service.list_tags(query).await?;
    Ok(Json(Page::new(tags, total, page, per_page, BASE_PATH)))
}

/// Create a new tag
#[utoipa::path(
    post,
    path = "",
    tag = "tags",
    request_body = CreateTag,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTag>,
) -> TagResult<impl IntoResponse> {
    let tag = service.create_tag(input).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Get a tag by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tags",
    params(
        ("id" = i64, Path, description = "Tag id")
    ),
    responses(
        (status = 200, description = "Tag found", body = Tag),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    IdPath(id): IdPath,
) -> TagResult<Json<Tag>> {
    let tag = service.get_tag(id).await?;
    Ok(Json(tag))
}

/// Partially update a tag (accepts PUT and PATCH)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tags",
    params(
        ("id" = i64, Path, description = "Tag id")
    ),
    request_body = UpdateTag,
    responses(
        (status = 200, description = "Tag updated", body = Tag),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateTag>,
) -> TagResult<Json<Tag>> {
    let tag = service.update_tag(id, input).await?;
    Ok(Json(tag))
}

/// Delete a tag
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tags",
    params(
        ("id" = i64, Path, description = "Tag id")
    ),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    IdPath(id): IdPath,
) -> TagResult<impl IntoResponse> {
    service.delete_tag(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
