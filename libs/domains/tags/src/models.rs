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

/// Tag entity as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: i64,
    /// Tag name (unique)
    pub name: String,
    /// URL-safe identifier (unique, derived from name when absent)
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entities::tags::Model> for Tag {
    fn from(model: entities::tags::Model) -> Self {
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

/// DTO for creating a new tag.
///
/// `name` is modeled as `Option` so a missing field surfaces as a per-field
/// `required` validation error instead of a body-level deserialization error.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTag {
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

impl CreateTag {
    /// Resolve defaults into the repository input. Call after validation.
    pub fn into_new(self) -> NewTag {
        let name = self.name.unwrap_or_default();
        let slug = match self.slug {
            Some(slug) => slug,
            None => slug::slugify(&name),
        };
        NewTag {
            name,
            slug,
            description: self.description,
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

/// Fully resolved tag ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// DTO for partially updating a tag. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UpdateTag {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50), custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Query params for `GET /tags`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct TagListQuery {
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
pub struct ListTags {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub sort: SortSpec,
    pub page: u64,
    pub per_page: u64,
}

impl From<TagListQuery> for ListTags {
    fn from(query: TagListQuery) -> Self {
        Self {
            sort: SortSpec::parse(query.sort.as_deref(), SORTABLE_COLUMNS),
            search: query.search,
            is_active: query.is_active,
            page: query.page,
            per_page: query.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_derives_slug_from_name() {
        let input = CreateTag {
            name: Some("Summer Sale 2026".to_string()),
            slug: None,
            description: None,
            is_active: None,
        };

        let new_tag = input.into_new();
        assert_eq!(new_tag.slug, "summer-sale-2026");
        assert!(new_tag.is_active);
    }

    #[test]
    fn test_create_keeps_explicit_slug() {
        let input = CreateTag {
            name: Some("Summer Sale".to_string()),
            slug: Some("promo".to_string()),
            description: None,
            is_active: Some(false),
        };

        let new_tag = input.into_new();
        assert_eq!(new_tag.slug, "promo");
        assert!(!new_tag.is_active);
    }

    #[test]
    fn test_missing_name_is_a_required_error() {
        let input = CreateTag {
            name: None,
            slug: None,
            description: None,
            is_active: None,
        };

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_slug_format_rejects_uppercase_and_spaces() {
        for bad in ["Promo", "summer sale", "sale_", "-sale"] {
            let input = CreateTag {
                name: Some("ok".to_string()),
                slug: Some(bad.to_string()),
                description: None,
                is_active: None,
            };
            assert!(input.validate().is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn test_list_query_resolves_sort_whitelist() {
        let params: ListTags = TagListQuery {
            search: None,
            is_active: None,
            sort: Some("-password".to_string()),
            page: 1,
            per_page: 15,
        }
        .into();

        assert_eq!(params.sort.column, "id");
        assert!(params.sort.descending);
    }
}
