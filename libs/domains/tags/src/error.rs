use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("Tag not found: {0}")]
    NotFound(i64),

    #[error("Tag {0} already taken")]
    Duplicate(&'static str),

    #[error("Invalid input")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type TagResult<T> = Result<T, TagError>;

impl From<TagError> for AppError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::NotFound(id) => AppError::NotFound(format!("Tag {} not found", id)),
            TagError::Duplicate(field) => AppError::single_field_error(
                field,
                "unique",
                &format!("The {} has already been taken.", field),
            ),
            TagError::Validation(errors) => AppError::ValidationError(errors),
            TagError::Database(DbErr::RecordNotFound(msg)) => AppError::NotFound(msg),
            TagError::Database(e) => AppError::InternalServerError(format!("Database error: {}", e)),
        }
    }
}

impl IntoResponse for TagError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
