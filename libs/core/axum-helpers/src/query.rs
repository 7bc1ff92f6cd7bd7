//! Query-string parsing for list endpoints.
//!
//! List endpoints share three conventions:
//! - `sort` tokens: a leading `-` means descending, the remainder names a
//!   column checked against a per-entity whitelist; unknown columns fall
//!   back to `id` while keeping the requested direction.
//! - `is_active` is tri-state and parsed permissively: recognized truthy
//!   and falsy spellings filter, anything else means "no filter".
//! - `page`/`per_page` default to 1 and 15.

use serde::{Deserialize, Deserializer};

/// A parsed `sort` token: target column plus direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub descending: bool,
}

impl SortSpec {
    /// Parse a sort token against a column whitelist.
    ///
    /// `None` means the caller's default of `-id`. A token whose column is
    /// not in `allowed` falls back to `id`, keeping the direction encoded in
    /// the token. Never fails.
    pub fn parse(raw: Option<&str>, allowed: &[&str]) -> Self {
        let token = raw.unwrap_or("-id");
        let descending = token.starts_with('-');
        let column = token.trim_start_matches('-');

        let column = if allowed.contains(&column) {
            column.to_string()
        } else {
            "id".to_string()
        };

        SortSpec { column, descending }
    }
}

/// Permissive boolean parsing for filter params.
///
/// `1/true/on/yes` are true; `0/false/off/no` and the empty string are
/// false; anything else is `None` (filter absent).
pub fn parse_bool_param(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "" | "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Serde deserializer for tri-state boolean query params.
///
/// Use with `#[serde(default, deserialize_with = "tri_state_bool")]` on an
/// `Option<bool>` field. Unrecognized values degrade to `None` instead of
/// rejecting the request.
pub fn tri_state_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_bool_param))
}

/// Default page number for list endpoints.
pub fn default_page() -> u64 {
    1
}

/// Default page size for list endpoints.
pub fn default_per_page() -> u64 {
    15
}
