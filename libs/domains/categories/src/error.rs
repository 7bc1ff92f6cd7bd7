use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(i64),

    #[error("Category {0} already taken")]
    Duplicate(&'static str),

    #[error("Invalid input")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => AppError::NotFound(format!("Category {} not found", id)),
            CategoryError::Duplicate(field) => AppError::single_field_error(
                field,
                "unique",
                &format!("The {} has already been taken.", field),
            ),
            CategoryError::Validation(errors) => AppError::ValidationError(errors),
            CategoryError::Database(DbErr::RecordNotFound(msg)) => AppError::NotFound(msg),
            CategoryError::Database(e) => {
                AppError::InternalServerError(format!("Database error: {}", e))
            }
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
