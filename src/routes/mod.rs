pub mod create_book;
pub mod delete_book;
pub mod health_check;
pub mod initialize_bookstore;
pub mod list_books;
pub mod update_book;

pub use create_book::*;
pub use delete_book::*;
pub use health_check::*;
pub use initialize_bookstore::*;
pub use list_books::*;
pub use update_book::*;
