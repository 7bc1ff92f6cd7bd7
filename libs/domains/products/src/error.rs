use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Product image not found: {0}")]
    ImageNotFound(i64),

    #[error("Tag not found: {0}")]
    TagNotFound(i64),

    #[error("Unknown category: {0}")]
    UnknownCategory(i64),

    #[error("Unknown product referenced: {0}")]
    UnknownProduct(i64),

    #[error("Unknown tags referenced: {0:?}")]
    UnknownTagIds(Vec<i64>),

    #[error("Unknown image ids referenced: {0:?}")]
    UnknownImageIds(Vec<i64>),

    #[error("Invalid input")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            ProductError::ImageNotFound(id) => {
                AppError::NotFound(format!("Product image {} not found", id))
            }
            ProductError::TagNotFound(id) => AppError::NotFound(format!("Tag {} not found", id)),
            ProductError::UnknownCategory(_) => AppError::single_field_error(
                "category_id",
                "exists",
                "The selected category_id is invalid.",
            ),
            ProductError::UnknownProduct(_) => AppError::single_field_error(
                "product_id",
                "exists",
                "The selected product_id is invalid.",
            ),
            ProductError::UnknownTagIds(_) => AppError::single_field_error(
                "tag_ids",
                "exists",
                "The selected tag_ids are invalid.",
            ),
            ProductError::UnknownImageIds(_) => AppError::single_field_error(
                "items",
                "exists",
                "The selected image ids are invalid.",
            ),
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::Database(DbErr::RecordNotFound(msg)) => AppError::NotFound(msg),
            ProductError::Database(e) => {
                AppError::InternalServerError(format!("Database error: {}", e))
            }
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
