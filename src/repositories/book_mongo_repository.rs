use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Client, Collection,
};

use crate::configuration::DatabaseSettings;
use crate::helper::error_chain_fmt;

/// Book repository implemented using MongoDB
///
/// Holds a handle on the books collection. The handle is cheap to clone and
/// safe to share between actix-web workers: pooling and reconnection are
/// handled internally by the driver.
#[derive(Clone)]
pub struct BookMongoRepository {
    collection: Collection<Document>,
}

impl BookMongoRepository {
    pub fn new(client: &Client, settings: &DatabaseSettings) -> Self {
        let collection = client
            .database(&settings.database_name)
            .collection::<Document>(&settings.collection_name);

        Self { collection }
    }

    /// Drops every stored book, then inserts the given records in order.
    ///
    /// Destructive: whatever was in the collection before the call is lost.
    #[tracing::instrument(name = "Resetting books collection", skip(self, books), fields(nb_books = books.len()))]
    pub async fn reset(&self, books: Vec<Document>) -> Result<(), BookMongoRepositoryError> {
        self.collection.drop(None).await?;

        // `insert_many` rejects an empty batch
        if !books.is_empty() {
            self.collection.insert_many(books, None).await?;
        }

        Ok(())
    }

    /// Fetches every stored book, in the store's natural retrieval order.
    ///
    /// The internal `_id` field is stripped by projection; every other field
    /// is returned verbatim.
    #[tracing::instrument(name = "Fetching all books from database", skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Document>, BookMongoRepositoryError> {
        let options = FindOptions::builder()
            .projection(doc! { "_id": 0 })
            .build();

        let cursor = self.collection.find(doc! {}, options).await?;
        let books = cursor.try_collect().await?;

        Ok(books)
    }

    /// Inserts a new book record.
    ///
    /// No duplicate check is done on `isbn`: uniqueness is advisory only.
    #[tracing::instrument(name = "Saving new book in database", skip(self, book))]
    pub async fn add_book(&self, book: Document) -> Result<(), BookMongoRepositoryError> {
        self.collection.insert_one(book, None).await?;

        Ok(())
    }

    /// Merges the given fields into the book matching `isbn`.
    ///
    /// If several records share the `isbn`, exactly one arbitrary match is
    /// updated, following the store's update-first-match semantics.
    #[tracing::instrument(name = "Updating book in database", skip(self, fields))]
    pub async fn update_book(
        &self,
        isbn: &str,
        fields: Document,
    ) -> Result<(), BookMongoRepositoryError> {
        let result = self
            .collection
            .update_one(doc! { "isbn": isbn }, doc! { "$set": fields }, None)
            .await?;

        if result.matched_count == 0 {
            return Err(BookMongoRepositoryError::BookDoesNotExist(isbn.to_string()));
        }

        Ok(())
    }

    /// Deletes the book matching `isbn` (first/only match).
    #[tracing::instrument(name = "Deleting book from database", skip(self))]
    pub async fn delete_book(&self, isbn: &str) -> Result<(), BookMongoRepositoryError> {
        let result = self
            .collection
            .delete_one(doc! { "isbn": isbn }, None)
            .await?;

        if result.deleted_count == 0 {
            return Err(BookMongoRepositoryError::BookDoesNotExist(isbn.to_string()));
        }

        Ok(())
    }
}

#[derive(thiserror::Error)]
pub enum BookMongoRepositoryError {
    #[error(transparent)]
    DBError(#[from] mongodb::error::Error),
    #[error("No book found with isbn {0}")]
    BookDoesNotExist(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for BookMongoRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
