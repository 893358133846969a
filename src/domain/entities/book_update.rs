use mongodb::bson::Document;
use serde_json::{Map, Value};

use crate::helper::error_chain_fmt;

/// A partial update for a book record: the fields it carries overwrite the
/// stored ones, fields it does not mention are left untouched.
#[derive(Debug, Clone)]
pub struct BookUpdate(Map<String, Value>);

impl BookUpdate {
    /// Validates an incoming JSON payload as a partial update.
    ///
    /// Any non-empty JSON object is accepted; an empty object would translate
    /// into an empty `$set`, which the store rejects.
    pub fn parse(value: Value) -> Result<BookUpdate, BookUpdateParseError> {
        let fields = match value {
            Value::Object(fields) => fields,
            _ => return Err(BookUpdateParseError::NotAnObject),
        };

        if fields.is_empty() {
            return Err(BookUpdateParseError::NoData);
        }

        Ok(Self(fields))
    }

    /// Converts the update into the BSON document given to `$set`.
    pub fn into_document(self) -> Result<Document, mongodb::bson::ser::Error> {
        mongodb::bson::to_document(&self.0)
    }
}

#[derive(thiserror::Error)]
pub enum BookUpdateParseError {
    #[error("Payload is not a JSON object")]
    NotAnObject,
    #[error("No data provided for update")]
    NoData,
}

impl std::fmt::Debug for BookUpdateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
