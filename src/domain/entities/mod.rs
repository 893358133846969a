pub mod book;
pub mod book_update;
