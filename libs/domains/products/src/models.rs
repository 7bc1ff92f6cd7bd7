use axum_helpers::query::{SortSpec, default_page, default_per_page, tri_state_bool};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Sort whitelist for product lists nested under a category or tag.
pub const PRODUCT_SORTABLE_COLUMNS: &[&str] = &["id", "name", "price", "created_at"];

/// Sort whitelist for the top-level product image list.
pub const IMAGE_SORTABLE_COLUMNS: &[&str] =
    &["id", "product_id", "sort_order", "created_at", "updated_at"];

/// Sort whitelist for images nested under a product.
pub const NESTED_IMAGE_SORTABLE_COLUMNS: &[&str] = &["id", "sort_order", "created_at"];

/// DECIMAL(10,2) ceiling.
fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() || *price > max_price() {
        return Err(validator::ValidationError::new("range"));
    }
    Ok(())
}

/// Product entity as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    /// Unit price, two decimal places
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub stock: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entities::products::Model> for Product {
    fn from(model: entities::products::Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            name: model.name,
            description: model.description,
            price: model.price,
            stock: model.stock,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// DTO for creating a product.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    /// Must reference an existing category when present
    pub category_id: Option<i64>,
    #[validate(required, length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(required, custom(function = "validate_price"))]
    #[schema(value_type = Option<String>, example = "19.99")]
    pub price: Option<Decimal>,
    /// Defaults to 0
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    /// Defaults to true
    pub is_active: Option<bool>,
}

impl CreateProduct {
    /// Resolve defaults into the repository input. Call after validation.
    pub fn into_new(self) -> NewProduct {
        NewProduct {
            category_id: self.category_id,
            name: self.name.unwrap_or_default(),
            description: self.description,
            price: self.price.unwrap_or_default().round_dp(2),
            stock: self.stock.unwrap_or(0),
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

/// Fully resolved product ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub is_active: bool,
}

/// DTO for partially updating a product. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    pub category_id: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<String>, example = "24.50")]
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
}

/// Query params for `GET /products`: no filters, pagination only.
/// The list is always ordered newest-first.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProductListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

/// Query params for product lists scoped to a category or tag.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProductScopeQuery {
    /// Case-insensitive substring match over name
    pub search: Option<String>,
    #[serde(default, deserialize_with = "tri_state_bool")]
    #[param(value_type = Option<String>)]
    pub is_active: Option<bool>,
    /// Sort column, `-` prefix for descending (default `-id`)
    pub sort: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

/// Resolved scoped-list parameters handed to repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListScopedProducts {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub sort: SortSpec,
    pub page: u64,
    pub per_page: u64,
}

impl From<ProductScopeQuery> for ListScopedProducts {
    fn from(query: ProductScopeQuery) -> Self {
        Self {
            sort: SortSpec::parse(query.sort.as_deref(), PRODUCT_SORTABLE_COLUMNS),
            search: query.search,
            is_active: query.is_active,
            page: query.page,
            per_page: query.per_page,
        }
    }
}

/// Product image entity as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductImage {
    pub id: i64,
    pub product_id: i64,
    pub url: String,
    pub alt: Option<String>,
    /// At most one image per product carries this flag
    pub is_primary: bool,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entities::product_images::Model> for ProductImage {
    fn from(model: entities::product_images::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            url: model.url,
            alt: model.alt,
            is_primary: model.is_primary,
            sort_order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// DTO for creating an image through `POST /product-images`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductImage {
    /// Must reference an existing product
    #[validate(required)]
    pub product_id: Option<i64>,
    #[validate(required, length(min = 1, max = 2048))]
    pub url: Option<String>,
    #[validate(length(max = 255))]
    pub alt: Option<String>,
    /// Defaults to false; setting true demotes sibling primaries
    pub is_primary: Option<bool>,
    /// Defaults to 0
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
    /// Defaults to true
    pub is_active: Option<bool>,
}

impl CreateProductImage {
    pub fn into_new(self) -> NewImage {
        NewImage {
            product_id: self.product_id.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            alt: self.alt,
            is_primary: self.is_primary.unwrap_or(false),
            sort_order: self.sort_order.unwrap_or(0),
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

/// DTO for creating an image through `POST /products/{id}/images`; the
/// product id comes from the path.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateNestedImage {
    #[validate(required, length(min = 1, max = 2048))]
    pub url: Option<String>,
    #[validate(length(max = 255))]
    pub alt: Option<String>,
    pub is_primary: Option<bool>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl CreateNestedImage {
    pub fn into_new(self, product_id: i64) -> NewImage {
        NewImage {
            product_id,
            url: self.url.unwrap_or_default(),
            alt: self.alt,
            is_primary: self.is_primary.unwrap_or(false),
            sort_order: self.sort_order.unwrap_or(0),
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

/// Fully resolved image ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub product_id: i64,
    pub url: String,
    pub alt: Option<String>,
    pub is_primary: bool,
    pub sort_order: i32,
    pub is_active: bool,
}

/// DTO for partially updating an image. The owning product is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UpdateProductImage {
    #[validate(length(min = 1, max = 2048))]
    pub url: Option<String>,
    #[validate(length(max = 255))]
    pub alt: Option<String>,
    pub is_primary: Option<bool>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Query params for `GET /product-images`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ImageListQuery {
    /// Restrict to one product's images
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "tri_state_bool")]
    #[param(value_type = Option<String>)]
    pub is_active: Option<bool>,
    pub sort: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

/// Query params for `GET /products/{id}/images`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NestedImageQuery {
    #[serde(default, deserialize_with = "tri_state_bool")]
    #[param(value_type = Option<String>)]
    pub is_active: Option<bool>,
    pub sort: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

/// Resolved image-list parameters handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListImages {
    pub product_id: Option<i64>,
    pub is_active: Option<bool>,
    pub sort: SortSpec,
    pub page: u64,
    pub per_page: u64,
}

impl From<ImageListQuery> for ListImages {
    fn from(query: ImageListQuery) -> Self {
        Self {
            sort: SortSpec::parse(query.sort.as_deref(), IMAGE_SORTABLE_COLUMNS),
            product_id: query.product_id,
            is_active: query.is_active,
            page: query.page,
            per_page: query.per_page,
        }
    }
}

/// Batch sort-order update for a product's images.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BatchSortRequest {
    #[validate(required, length(min = 1), nested)]
    pub items: Option<Vec<SortItem>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SortItem {
    /// Must be an existing product image id
    #[validate(required)]
    pub id: Option<i64>,
    #[validate(required, range(min = 0))]
    pub sort_order: Option<i32>,
}

impl BatchSortRequest {
    /// Resolve into `(image_id, sort_order)` pairs. Call after validation.
    pub fn into_entries(self) -> Vec<SortEntry> {
        self.items
            .unwrap_or_default()
            .into_iter()
            .map(|item| SortEntry {
                id: item.id.unwrap_or_default(),
                sort_order: item.sort_order.unwrap_or_default(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortEntry {
    pub id: i64,
    pub sort_order: i32,
}

/// Replace-set of tag associations for `PUT /products/{id}/tags`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SyncTagsRequest {
    /// Every id must reference an existing tag
    #[validate(required)]
    pub tag_ids: Option<Vec<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_create_product_defaults() {
        let input = CreateProduct {
            category_id: None,
            name: Some("Keyboard".to_string()),
            description: None,
            price: Some(Decimal::from_str("19.999").unwrap()),
            stock: None,
            is_active: None,
        };

        let new_product = input.into_new();
        assert_eq!(new_product.price, Decimal::from_str("20.00").unwrap());
        assert_eq!(new_product.stock, 0);
        assert!(new_product.is_active);
    }

    #[test]
    fn test_negative_price_fails_validation() {
        let input = CreateProduct {
            category_id: None,
            name: Some("Keyboard".to_string()),
            description: None,
            price: Some(Decimal::from_str("-1").unwrap()),
            stock: None,
            is_active: None,
        };

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_missing_name_and_price_report_both_fields() {
        let input = CreateProduct {
            category_id: None,
            name: None,
            description: None,
            price: None,
            stock: None,
            is_active: None,
        };

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("price"));
    }

    #[test]
    fn test_price_over_decimal_capacity_fails() {
        let input = CreateProduct {
            category_id: None,
            name: Some("Yacht".to_string()),
            description: None,
            price: Some(Decimal::from_str("100000000.00").unwrap()),
            stock: None,
            is_active: None,
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_batch_sort_requires_items() {
        let request = BatchSortRequest { items: None };
        assert!(request.validate().is_err());

        let request = BatchSortRequest { items: Some(vec![]) };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_batch_sort_rejects_negative_sort_order() {
        let request = BatchSortRequest {
            items: Some(vec![SortItem {
                id: Some(1),
                sort_order: Some(-1),
            }]),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_scope_query_sort_whitelist_includes_price() {
        let params: ListScopedProducts = ProductScopeQuery {
            search: None,
            is_active: None,
            sort: Some("-price".to_string()),
            page: 1,
            per_page: 15,
        }
        .into();

        assert_eq!(params.sort.column, "price");
        assert!(params.sort.descending);
    }
}
