use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, put},
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

use crate::error::ProductResult;
use crate::models::{
    BatchSortRequest, CreateNestedImage, CreateProductImage, ImageListQuery, NestedImageQuery,
    ProductImage, SortItem, UpdateProductImage,
};
use crate::repository::ProductImageRepository;
use crate::service::ProductImageService;

const BASE_PATH: &str = "/api/product-images";

/// OpenAPI documentation for the top-level Product Images API
#[derive(OpenApi)]
#[openapi(
    paths(list_images, create_image, get_image, update_image, delete_image, make_primary),
    components(
        schemas(
            ProductImage,
            CreateProductImage,
            UpdateProductImage,
            Page<ProductImage>
        ),
        responses(
            NotFoundResponse,
            ValidationErrorResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "product-images", description = "Product image management endpoints")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for image routes nested under `/products`
#[derive(OpenApi)]
#[openapi(
    paths(list_product_images, create_product_image, batch_sort),
    components(schemas(CreateNestedImage, BatchSortRequest, SortItem)),
    tags(
        (name = "product-images", description = "Product image management endpoints")
    )
)]
pub struct NestedApiDoc;

/// Router for `/product-images`
pub fn router<R: ProductImageRepository + 'static>(service: ProductImageService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_images).post(create_image))
        .route(
            "/{id}",
            get(get_image)
                .put(update_image)
                .patch(update_image)
                .delete(delete_image),
        )
        .route("/{id}/make-primary", put(make_primary))
        .with_state(shared_service)
}

/// Image routes mounted under `/products`
pub fn nested_router<R: ProductImageRepository + 'static>(
    service: ProductImageService<R>,
) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/{id}/images",
            get(list_product_images).post(create_product_image),
        )
        .route("/{id}/images/sort", patch(batch_sort))
        .with_state(shared_service)
}

/// List product images with product_id, is_active and sort filters
#[utoipa::path(
    get,
    path = "",
    tag = "product-images",
    params(ImageListQuery),
    responses(
        (status = 200, description = "Page of product images", body = Page<ProductImage>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_images<R: ProductImageRepository>(
    State(service): State<Arc<ProductImageService<R>>>,
    Query(query): Query<ImageListQuery>,
) -> ProductResult<Json<Page<ProductImage>>> {
    let (page, per_page) = (query.page, query.per_page);
    let (images, total) = service.list_images(query).await?;
    Ok(Json(Page::new(images, total, page, per_page, BASE_PATH)))
}

/// Create a product image
#[utoipa::path(
    post,
    path = "",
    tag = "product-images",
    request_body = CreateProductImage,
    responses(
        (status = 201, description = "Image created", body = ProductImage),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_image<R: ProductImageRepository>(
    State(service): State<Arc<ProductImageService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProductImage>,
) -> ProductResult<impl IntoResponse> {
    let image = service.create_image(input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// Get a product image by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "product-images",
    params(
        ("id" = i64, Path, description = "Image id")
    ),
    responses(
        (status = 200, description = "Image found", body = ProductImage),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_image<R: ProductImageRepository>(
    State(service): State<Arc<ProductImageService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductImage>> {
    let image = service.get_image(id).await?;
    Ok(Json(image))
}

/// Partially update a product image (accepts PUT and PATCH)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "product-images",
    params(
        ("id" = i64, Path, description = "Image id")
    ),
    request_body = UpdateProductImage,
    responses(
        (status = 200, description = "Image updated", body = ProductImage),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_image<R: ProductImageRepository>(
    State(service): State<Arc<ProductImageService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProductImage>,
) -> ProductResult<Json<ProductImage>> {
    let image = service.update_image(id, input).await?;
    Ok(Json(image))
}

/// Delete a product image
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "product-images",
    params(
        ("id" = i64, Path, description = "Image id")
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_image<R: ProductImageRepository>(
    State(service): State<Arc<ProductImageService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_image(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Force an image to be its product's primary; any request body is ignored
#[utoipa::path(
    put,
    path = "/{id}/make-primary",
    tag = "product-images",
    params(
        ("id" = i64, Path, description = "Image id")
    ),
    responses(
        (status = 200, description = "Image promoted to primary", body = ProductImage),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn make_primary<R: ProductImageRepository>(
    State(service): State<Arc<ProductImageService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductImage>> {
    let image = service.make_primary(id).await?;
    Ok(Json(image))
}

/// List a product's images
#[utoipa::path(
    get,
    path = "/{id}/images",
    tag = "product-images",
    params(
        ("id" = i64, Path, description = "Product id"),
        NestedImageQuery
    ),
    responses(
        (status = 200, description = "Page of the product's images", body = Page<ProductImage>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_product_images<R: ProductImageRepository>(
    State(service): State<Arc<ProductImageService<R>>>,
    IdPath(id): IdPath,
    Query(query): Query<NestedImageQuery>,
) -> ProductResult<Json<Page<ProductImage>>> {
    let (page, per_page) = (query.page, query.per_page);
    let (images, total) = service.list_for_product(id, query).await?;
    let base_path = format!("/api/products/{}/images", id);
    Ok(Json(Page::new(images, total, page, per_page, &base_path)))
}

/// Create an image for a product; the owning product comes from the path
#[utoipa::path(
    post,
    path = "/{id}/images",
    tag = "product-images",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = CreateNestedImage,
    responses(
        (status = 201, description = "Image created", body = ProductImage),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product_image<R: ProductImageRepository>(
    State(service): State<Arc<ProductImageService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateNestedImage>,
) -> ProductResult<impl IntoResponse> {
    let image = service.create_for_product(id, input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// Batch-update sort order for a product's images.
///
/// Unknown image ids are a validation error; ids owned by another product
/// are skipped. Returns the product's images ordered by sort_order.
#[utoipa::path(
    patch,
    path = "/{id}/images/sort",
    tag = "product-images",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = BatchSortRequest,
    responses(
        (status = 200, description = "Images reordered", body = Page<ProductImage>),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn batch_sort<R: ProductImageRepository>(
    State(service): State<Arc<ProductImageService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<BatchSortRequest>,
) -> ProductResult<Json<Page<ProductImage>>> {
    let (images, total) = service.batch_sort(id, request).await?;
    let base_path = format!("/api/products/{}/images", id);
    Ok(Json(Page::new(images, total, 1, 15, &base_path)))
}
