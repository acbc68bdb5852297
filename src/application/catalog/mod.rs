mod catalog_service;
mod errors;
mod snapshot;

pub use catalog_service::{
    ServiceDependencies, add_book, borrow_book, return_book, view_available_books,
};
pub use errors::{CatalogError, Result};
pub use snapshot::BookSnapshot;
