use axum_helpers::query::{SortSpec, default_page, default_per_page, tri_state_bool};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Columns accepted by the `sort` query param.
pub const SORTABLE_COLUMNS: &[&str] = &["id", "name", "created_at", "updated_at"];

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    if !SLUG_PATTERN.is_match(slug) {
        return Err(validator::ValidationError::new("slug_format"));
    }
    Ok(())
}

/// Category entity as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    /// Category name (unique)
    pub name: String,
    /// URL-safe identifier (unique, derived from name when absent)
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entities::categories::Model> for Category {
    fn from(model: entities::categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// DTO for creating a category.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(required, length(min = 1, max = 50))]
    pub name: Option<String>,
    /// Derived from `name` when absent
    #[validate(length(min = 1, max = 50), custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    /// Defaults to true
    pub is_active: Option<bool>,
}

impl CreateCategory {
    /// Resolve defaults into the repository input. Call after validation.
    pub fn into_new(self) -> NewCategory {
        let name = self.name.unwrap_or_default();
        let slug = match self.slug {
            Some(slug) => slug,
            None => slug::slugify(&name),
        };
        NewCategory {
            name,
            slug,
            description: self.description,
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

/// Fully resolved category ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// DTO for partially updating a category. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50), custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Query params for `GET /categories`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CategoryListQuery {
    /// Case-insensitive substring match over name and slug
    pub search: Option<String>,
    /// Tri-state filter; unrecognized values mean "no filter"
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

/// Resolved list parameters handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCategories {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub sort: SortSpec,
    pub page: u64,
    pub per_page: u64,
}

impl From<CategoryListQuery> for ListCategories {
    fn from(query: CategoryListQuery) -> Self {
        Self {
            sort: SortSpec::parse(query.sort.as_deref(), SORTABLE_COLUMNS),
            search: query.search,
            is_active: query.is_active,
            page: query.page,
            per_page: query.per_page,
        }
    }
}
