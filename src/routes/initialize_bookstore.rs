use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use mongodb::bson::Document;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::configuration::Settings;
use crate::helper::error_chain_fmt;
use crate::repositories::book_mongo_repository::{
    BookMongoRepository, BookMongoRepositoryError,
};

/// Resets the books collection from the seed file.
///
/// Destructive, not a merge: every record present before the call is dropped,
/// then the seed records are inserted in file order. Calling it twice in a row
/// leaves the collection containing exactly the seed records.
#[tracing::instrument(name = "Initialize bookstore", skip(settings, book_repository))]
pub async fn initialize_bookstore(
    settings: web::Data<Settings>,
    book_repository: web::Data<BookMongoRepository>,
) -> Result<HttpResponse, InitializeBookstoreError> {
    let seed_file = &settings.application.seed_file;

    let content = tokio::fs::read(seed_file).await.map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            InitializeBookstoreError::SeedFileNotFound(seed_file.clone())
        } else {
            InitializeBookstoreError::InternalError(
                anyhow::Error::from(error)
                    .context(format!("Failed to read the seed file {}", seed_file)),
            )
        }
    })?;

    // The seed dataset is a JSON array of book objects. It is replayed into
    // the store and discarded, not kept in memory afterwards.
    let records: Vec<Map<String, Value>> = serde_json::from_slice(&content)
        .map_err(|error| InitializeBookstoreError::MalformedSeedData(error.into()))?;

    let books = records
        .iter()
        .map(mongodb::bson::to_document)
        .collect::<Result<Vec<Document>, _>>()
        .map_err(|error| InitializeBookstoreError::MalformedSeedData(error.into()))?;

    info!(seed_file, nb_books = books.len(), "Resetting bookstore from seed");

    book_repository.reset(books).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Database initialized successfully" })))
}

#[derive(thiserror::Error)]
pub enum InitializeBookstoreError {
    #[error("Seed file not found: {0}")]
    SeedFileNotFound(String),
    #[error("Seed file is not a valid JSON array of book records")]
    MalformedSeedData(#[source] anyhow::Error),
    #[error(transparent)]
    RepositoryError(#[from] BookMongoRepositoryError),
    #[error(transparent)]
    InternalError(#[from] anyhow::Error),
}

impl std::fmt::Debug for InitializeBookstoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for InitializeBookstoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            InitializeBookstoreError::SeedFileNotFound(_) => StatusCode::NOT_FOUND,
            // Malformed seed data is grouped with store unavailability: both
            // mean the reset cannot be served right now, through no fault of
            // the client.
            InitializeBookstoreError::MalformedSeedData(_)
            | InitializeBookstoreError::RepositoryError(_) => StatusCode::SERVICE_UNAVAILABLE,
            InitializeBookstoreError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from initialize_bookstore handler", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
