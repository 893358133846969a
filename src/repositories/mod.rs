pub mod book_mongo_repository;

pub use book_mongo_repository::*;
