use mongodb::bson::Document;
use serde_json::{Map, Value};

use crate::helper::error_chain_fmt;

/// A book record as accepted by the create endpoint.
///
/// The store is schemaless: apart from the `isbn` identifier field, which must
/// be present and a string, every field is opaque and passed through verbatim.
#[derive(Debug, Clone)]
pub struct Book {
    isbn: String,
    fields: Map<String, Value>,
}

impl Book {
    /// Validates an incoming JSON payload as a book record.
    ///
    /// The payload must be a non-empty JSON object carrying an `isbn` string.
    /// No other field is checked.
    pub fn parse(value: Value) -> Result<Book, BookParseError> {
        let fields = match value {
            Value::Object(fields) => fields,
            _ => return Err(BookParseError::NotAnObject),
        };

        if fields.is_empty() {
            return Err(BookParseError::NoData);
        }

        let isbn = match fields.get("isbn") {
            Some(Value::String(isbn)) => isbn.clone(),
            _ => return Err(BookParseError::MissingIsbn),
        };

        Ok(Self { isbn, fields })
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Converts the record into a BSON document ready to be inserted.
    pub fn into_document(self) -> Result<Document, mongodb::bson::ser::Error> {
        mongodb::bson::to_document(&self.fields)
    }
}

#[derive(thiserror::Error)]
pub enum BookParseError {
    #[error("Payload is not a JSON object")]
    NotAnObject,
    #[error("No data provided")]
    NoData,
    #[error("Invalid data or missing 'isbn'")]
    MissingIsbn,
}

impl std::fmt::Debug for BookParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
