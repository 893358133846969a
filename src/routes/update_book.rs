use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde_json::json;
use tracing::info;

use crate::domain::entities::book_update::BookUpdate;
use crate::helper::error_chain_fmt;
use crate::repositories::book_mongo_repository::{
    BookMongoRepository, BookMongoRepositoryError,
};

/// Merges the payload's fields into the book matching the `isbn` path
/// parameter.
///
/// A partial update: fields present in the payload overwrite the stored ones,
/// fields absent from it are left untouched. If several records share the
/// `isbn`, exactly one arbitrary match is updated.
#[tracing::instrument(name = "Update book", skip(book_repository, body))]
pub async fn update_book(
    book_repository: web::Data<BookMongoRepository>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, UpdateBookError> {
    let isbn = path.into_inner();

    let payload = serde_json::from_slice(&body)
        .map_err(|_| UpdateBookError::InvalidPayload("No data provided for update".into()))?;

    let update = BookUpdate::parse(payload)
        .map_err(|error| UpdateBookError::InvalidPayload(error.to_string()))?;

    info!(isbn, "Updating book");

    let fields = update
        .into_document()
        .context("Failed to convert the update payload into a BSON document")?;

    book_repository
        .update_book(&isbn, fields)
        .await
        .map_err(|error| match error {
            BookMongoRepositoryError::BookDoesNotExist(_) => UpdateBookError::BookNotFound,
            other => UpdateBookError::RepositoryError(other),
        })?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Book updated successfully!" })))
}

#[derive(thiserror::Error)]
pub enum UpdateBookError {
    #[error("{0}")]
    InvalidPayload(String),
    #[error("Book not found")]
    BookNotFound,
    #[error(transparent)]
    RepositoryError(#[from] BookMongoRepositoryError),
    #[error(transparent)]
    InternalError(#[from] anyhow::Error),
}

impl std::fmt::Debug for UpdateBookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UpdateBookError {
    fn status_code(&self) -> StatusCode {
        match self {
            UpdateBookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            UpdateBookError::BookNotFound => StatusCode::NOT_FOUND,
            UpdateBookError::RepositoryError(_) => StatusCode::SERVICE_UNAVAILABLE,
            UpdateBookError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from update_book handler", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
