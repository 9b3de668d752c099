//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the book repository contract shared by every catalog store.
//! - Isolate SQLite, MySQL and MongoDB query details from the service and
//!   console layers.
//!
//! # Invariants
//! - Repository writes must enforce `NewBook::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `InvalidId`) in
//!   addition to store transport errors.

pub mod book_repo;
pub mod mongo_repo;
pub mod mysql_repo;
pub mod sqlite_repo;

pub(crate) fn build_runtime() -> book_repo::StoreResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(book_repo::StoreError::Runtime)
}
