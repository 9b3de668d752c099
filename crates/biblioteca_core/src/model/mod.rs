//! Domain model for the library catalog and the adventure world demo.
//!
//! # Responsibility
//! - Define the records shared by every store implementation.
//! - Own the creation-time invariants of a book.
//!
//! # Invariants
//! - A book is identified by a store-assigned `BookId`; callers never invent one.
//! - Title and author are non-empty at creation time.

pub mod book;
pub mod world;
