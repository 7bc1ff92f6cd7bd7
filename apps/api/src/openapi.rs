//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog management API: categories, tags, products and product images",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/categories", api = domain_categories::handlers::ApiDoc),
        (path = "/api/tags", api = domain_tags::handlers::ApiDoc),
        (path = "/api/tags", api = domain_products::handlers::tags::TagProductsApiDoc),
        (path = "/api/products", api = domain_products::handlers::products::ApiDoc),
        (path = "/api/products", api = domain_products::handlers::images::NestedApiDoc),
        (path = "/api/products", api = domain_products::handlers::tags::ProductTagsApiDoc),
        (path = "/api/product-images", api = domain_products::handlers::images::ApiDoc)
    ),
    tags(
        (name = "categories", description = "Category management endpoints"),
        (name = "tags", description = "Tag management endpoints"),
        (name = "products", description = "Product management endpoints"),
        (name = "product-images", description = "Product image management endpoints")
    )
)]
pub struct ApiDoc;
