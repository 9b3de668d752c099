//! MongoDB implementation of the book repository.
//!
//! # Responsibility
//! - Map `books` documents to domain records through serde.
//! - Resolve the short id suffixes typed by users to full object ids.
//!
//! # Invariants
//! - A suffix resolves only when exactly one stored id ends with it; any
//!   ambiguity is reported and nothing is written.
//! - Connecting fails fast after `SERVER_SELECTION_TIMEOUT`.

use crate::model::book::{Book, BookId, NewBook};
use crate::repo::book_repo::{BookRepository, MarkReadOutcome, StoreError, StoreKind, StoreResult};
use crate::repo::build_runtime;
use log::info;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::Runtime;

pub const COLLECTION_NAME: &str = "books";
pub const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);
const OBJECT_ID_HEX_LEN: usize = 24;

static HEX_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{1,24}$").expect("valid hex suffix regex"));

/// Stored shape of one book document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    author: String,
    publication_year: Option<i32>,
    genre: Option<String>,
    #[serde(default)]
    is_read: bool,
}

impl BookDocument {
    fn from_new(book: &NewBook) -> Self {
        Self {
            id: None,
            title: book.title.clone(),
            author: book.author.clone(),
            publication_year: book.publication_year,
            genre: book.genre.clone(),
            is_read: false,
        }
    }

    fn into_book(self) -> StoreResult<Book> {
        let id = self.id.ok_or_else(|| {
            StoreError::InvalidData("book document without `_id`".to_string())
        })?;
        Ok(Book {
            id: BookId::Object(id.to_hex()),
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
            genre: self.genre,
            is_read: self.is_read,
        })
    }
}

/// MongoDB-backed book repository owning its collection handle and runtime.
pub struct MongoBookRepository {
    runtime: Runtime,
    collection: Collection<BookDocument>,
}

impl MongoBookRepository {
    /// Connects to `uri`, verifies reachability with `ping`, and selects the
    /// `books` collection of `database`. The collection is created lazily by
    /// the first insert.
    pub fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let runtime = build_runtime()?;
        let collection = runtime.block_on(connect_collection(uri, database))?;
        info!("event=store_connect module=repo status=ok store=mongodb database={database}");
        Ok(Self {
            runtime,
            collection,
        })
    }

    fn find_document(&self, oid: ObjectId) -> StoreResult<Option<BookDocument>> {
        let found = self
            .runtime
            .block_on(self.collection.find_one(doc! { "_id": oid }, None))?;
        Ok(found)
    }

    fn all_ids(&self) -> StoreResult<Vec<String>> {
        let ids_only = self.collection.clone_with_type::<Document>();
        let options = FindOptions::builder()
            .projection(doc! { "_id": 1 })
            .build();

        self.runtime.block_on(async {
            let mut cursor = ids_only.find(None, options).await?;
            let mut ids = Vec::new();
            while cursor.advance().await? {
                let document = cursor.deserialize_current()?;
                if let Ok(oid) = document.get_object_id("_id") {
                    ids.push(oid.to_hex());
                }
            }
            Ok::<_, StoreError>(ids)
        })
    }
}

impl BookRepository for MongoBookRepository {
    fn kind(&self) -> StoreKind {
        StoreKind::MongoDb
    }

    fn create_book(&mut self, book: &NewBook) -> StoreResult<Book> {
        book.validate()?;

        let result = self
            .runtime
            .block_on(self.collection.insert_one(BookDocument::from_new(book), None))?;
        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::InvalidData(format!("unexpected inserted id {}", result.inserted_id))
        })?;

        Ok(Book::from_new(BookId::Object(oid.to_hex()), book))
    }

    fn list_books(&mut self) -> StoreResult<Vec<Book>> {
        let options = FindOptions::builder().sort(doc! { "_id": -1 }).build();
        let collection = &self.collection;

        self.runtime.block_on(async {
            let mut cursor = collection.find(None, options).await?;
            let mut books = Vec::new();
            while cursor.advance().await? {
                books.push(cursor.deserialize_current()?.into_book()?);
            }
            Ok::<_, StoreError>(books)
        })
    }

    fn get_book(&mut self, id: &BookId) -> StoreResult<Option<Book>> {
        let oid = expect_object_id(id)?;
        self.find_document(oid)?
            .map(BookDocument::into_book)
            .transpose()
    }

    fn mark_read(&mut self, id: &BookId) -> StoreResult<MarkReadOutcome> {
        let oid = expect_object_id(id)?;
        let Some(document) = self.find_document(oid)? else {
            return Err(StoreError::NotFound(id.clone()));
        };
        let book = document.into_book()?;
        if book.is_read {
            return Ok(MarkReadOutcome::AlreadyRead(book));
        }

        let result = self.runtime.block_on(self.collection.update_one(
            doc! { "_id": oid, "is_read": { "$ne": true } },
            doc! { "$set": { "is_read": true } },
            None,
        ))?;
        if result.modified_count == 0 {
            return Ok(MarkReadOutcome::AlreadyRead(book));
        }

        Ok(MarkReadOutcome::Marked(Book {
            is_read: true,
            ..book
        }))
    }

    fn delete_book(&mut self, id: &BookId) -> StoreResult<Book> {
        let oid = expect_object_id(id)?;
        let Some(document) = self.find_document(oid)? else {
            return Err(StoreError::NotFound(id.clone()));
        };

        let result = self
            .runtime
            .block_on(self.collection.delete_one(doc! { "_id": oid }, None))?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }

        document.into_book()
    }

    fn resolve_id(&mut self, input: &str) -> StoreResult<BookId> {
        let suffix = normalize_suffix(input)?;
        let ids = self.all_ids()?;
        resolve_suffix(ids, &suffix).map(BookId::Object)
    }
}

async fn connect_collection(uri: &str, database: &str) -> StoreResult<Collection<BookDocument>> {
    let mut options = ClientOptions::parse(uri).await?;
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
    options.app_name = Some("biblioteca".to_string());

    let client = Client::with_options(options)?;
    client
        .database("admin")
        .run_command(doc! { "ping": 1 }, None)
        .await?;

    Ok(client.database(database).collection(COLLECTION_NAME))
}

fn expect_object_id(id: &BookId) -> StoreResult<ObjectId> {
    match id {
        BookId::Object(hex) => {
            ObjectId::parse_str(hex).map_err(|_| StoreError::InvalidId(hex.clone()))
        }
        BookId::Row(value) => Err(StoreError::InvalidId(value.to_string())),
    }
}

/// Validates a typed id suffix and lowercases it.
///
/// # Errors
/// - `InvalidId` when the input is empty, longer than an object id, or not
///   hexadecimal.
pub fn normalize_suffix(input: &str) -> StoreResult<String> {
    let trimmed = input.trim();
    if !HEX_SUFFIX_RE.is_match(trimmed) {
        return Err(StoreError::InvalidId(trimmed.to_string()));
    }
    Ok(trimmed.to_ascii_lowercase())
}

/// Picks the single id ending in `suffix`.
///
/// A full-length suffix must match an id exactly.
///
/// # Errors
/// - `NoSuffixMatch` when no id ends in `suffix`.
/// - `AmbiguousId` when several do.
pub fn resolve_suffix(
    ids: impl IntoIterator<Item = String>,
    suffix: &str,
) -> StoreResult<String> {
    let mut matches: Vec<String> = ids
        .into_iter()
        .filter(|id| {
            if suffix.len() == OBJECT_ID_HEX_LEN {
                id == suffix
            } else {
                id.ends_with(suffix)
            }
        })
        .collect();

    match matches.len() {
        0 => Err(StoreError::NoSuffixMatch(suffix.to_string())),
        1 => Ok(matches.remove(0)),
        count => Err(StoreError::AmbiguousId {
            suffix: suffix.to_string(),
            matches: count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_suffix, resolve_suffix, BookDocument};
    use crate::model::book::{BookId, NewBook};
    use crate::repo::book_repo::StoreError;
    use mongodb::bson::oid::ObjectId;
    use mongodb::bson::{self, doc};

    fn ids() -> Vec<String> {
        vec![
            "65f1c2a9e4b0a1b2c3d4e5f6".to_string(),
            "65f1c2a9e4b0a1b2c3d40000".to_string(),
            "65f1c2a9e4b0a1b2c3d41000".to_string(),
        ]
    }

    #[test]
    fn unique_suffix_resolves_to_full_id() {
        let resolved = resolve_suffix(ids(), "4e5f6").unwrap();
        assert_eq!(resolved, "65f1c2a9e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn shared_suffix_is_ambiguous() {
        let err = resolve_suffix(ids(), "000").unwrap_err();
        assert!(matches!(err, StoreError::AmbiguousId { matches: 2, .. }));
    }

    #[test]
    fn unknown_suffix_is_reported() {
        let err = resolve_suffix(ids(), "abcde").unwrap_err();
        assert!(matches!(err, StoreError::NoSuffixMatch(ref s) if s == "abcde"));
        assert!(err.is_lookup_miss());
    }

    #[test]
    fn full_id_matches_exactly() {
        let resolved = resolve_suffix(ids(), "65f1c2a9e4b0a1b2c3d40000").unwrap();
        assert_eq!(resolved, "65f1c2a9e4b0a1b2c3d40000");
    }

    #[test]
    fn suffix_must_be_hex_and_not_empty() {
        assert_eq!(normalize_suffix(" 4E5F6 ").unwrap(), "4e5f6");
        assert!(matches!(
            normalize_suffix(""),
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            normalize_suffix("xyz12"),
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            normalize_suffix(&"a".repeat(25)),
            Err(StoreError::InvalidId(_))
        ));
    }

    #[test]
    fn new_document_omits_id_and_starts_unread() {
        let book = NewBook::new("Dune", "Herbert").with_year(Some(1965));
        let document = bson::to_document(&BookDocument::from_new(&book)).unwrap();
        assert!(!document.contains_key("_id"));
        assert!(!document.get_bool("is_read").unwrap());
        assert_eq!(document.get_i32("publication_year").unwrap(), 1965);
    }

    #[test]
    fn stored_document_maps_to_domain_book() {
        let oid = ObjectId::parse_str("65f1c2a9e4b0a1b2c3d4e5f6").unwrap();
        let stored = doc! {
            "_id": oid,
            "title": "Dune",
            "author": "Herbert",
            "publication_year": bson::Bson::Null,
            "genre": "Sci-Fi",
        };

        let book = bson::from_document::<BookDocument>(stored)
            .unwrap()
            .into_book()
            .unwrap();
        assert_eq!(book.id, BookId::Object(oid.to_hex()));
        assert_eq!(book.publication_year, None);
        assert_eq!(book.genre.as_deref(), Some("Sci-Fi"));
        assert!(!book.is_read);
    }
}
