use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde_json::json;
use tracing::info;

use crate::helper::error_chain_fmt;
use crate::repositories::book_mongo_repository::{
    BookMongoRepository, BookMongoRepositoryError,
};

/// Deletes the book matching the `isbn` path parameter (first/only match).
#[tracing::instrument(name = "Delete book", skip(book_repository))]
pub async fn delete_book(
    book_repository: web::Data<BookMongoRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, DeleteBookError> {
    let isbn = path.into_inner();

    info!(isbn, "Deleting book");

    book_repository
        .delete_book(&isbn)
        .await
        .map_err(|error| match error {
            BookMongoRepositoryError::BookDoesNotExist(_) => DeleteBookError::BookNotFound,
            other => DeleteBookError::RepositoryError(other),
        })?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Book deleted successfully!" })))
}

#[derive(thiserror::Error)]
pub enum DeleteBookError {
    #[error("Book not found")]
    BookNotFound,
    #[error(transparent)]
    RepositoryError(#[from] BookMongoRepositoryError),
}

impl std::fmt::Debug for DeleteBookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for DeleteBookError {
    fn status_code(&self) -> StatusCode {
        match self {
            DeleteBookError::BookNotFound => StatusCode::NOT_FOUND,
            DeleteBookError::RepositoryError(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    #[tracing::instrument(name = "Response error from delete_book handler", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
