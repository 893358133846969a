use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde_json::json;
use tracing::info;

use crate::domain::entities::book::Book;
use crate::helper::error_chain_fmt;
use crate::repositories::book_mongo_repository::{
    BookMongoRepository, BookMongoRepositoryError,
};

/// Inserts a new book record.
///
/// The payload is any JSON object carrying an `isbn` string; every other field
/// is stored verbatim. Validation happens before any store access. A record
/// with the same `isbn` may already exist: duplicates are not rejected here.
#[tracing::instrument(name = "Create book", skip(book_repository, body))]
pub async fn create_book(
    book_repository: web::Data<BookMongoRepository>,
    body: web::Bytes,
) -> Result<HttpResponse, CreateBookError> {
    let payload = serde_json::from_slice(&body)
        .map_err(|_| CreateBookError::InvalidPayload("Invalid data or missing 'isbn'".into()))?;

    let book =
        Book::parse(payload).map_err(|error| CreateBookError::InvalidPayload(error.to_string()))?;

    info!(isbn = book.isbn(), "Adding book");

    let document = book
        .into_document()
        .context("Failed to convert the book payload into a BSON document")?;

    book_repository.add_book(document).await?;

    Ok(HttpResponse::Created().json(json!({ "message": "Book added successfully!" })))
}

#[derive(thiserror::Error)]
pub enum CreateBookError {
    #[error("{0}")]
    InvalidPayload(String),
    #[error(transparent)]
    RepositoryError(#[from] BookMongoRepositoryError),
    #[error(transparent)]
    InternalError(#[from] anyhow::Error),
}

impl std::fmt::Debug for CreateBookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for CreateBookError {
    fn status_code(&self) -> StatusCode {
        match self {
            CreateBookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            CreateBookError::RepositoryError(_) => StatusCode::SERVICE_UNAVAILABLE,
            CreateBookError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from create_book handler", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
