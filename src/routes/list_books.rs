use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde_json::json;

use crate::helper::error_chain_fmt;
use crate::repositories::book_mongo_repository::{
    BookMongoRepository, BookMongoRepositoryError,
};

/// Returns every stored book as a bare JSON array, in the store's natural
/// retrieval order. The internal `_id` field is stripped; an empty collection
/// yields an empty array.
#[tracing::instrument(name = "List books", skip(book_repository))]
pub async fn list_books(
    book_repository: web::Data<BookMongoRepository>,
) -> Result<HttpResponse, ListBooksError> {
    let documents = book_repository.find_all().await?;

    let books = documents
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to serialize stored books as JSON")?;

    Ok(HttpResponse::Ok().json(books))
}

#[derive(thiserror::Error)]
pub enum ListBooksError {
    #[error(transparent)]
    RepositoryError(#[from] BookMongoRepositoryError),
    #[error(transparent)]
    InternalError(#[from] anyhow::Error),
}

impl std::fmt::Debug for ListBooksError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ListBooksError {
    fn status_code(&self) -> StatusCode {
        match self {
            ListBooksError::RepositoryError(_) => StatusCode::SERVICE_UNAVAILABLE,
            ListBooksError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from list_books handler", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
