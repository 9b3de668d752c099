use biblioteca_core::db::{open_db_in_memory, Schema};
use biblioteca_core::{
    BookId, BookRepository, BookValidationError, CatalogService, MarkReadOutcome, NewBook,
    SqliteBookRepository, StoreError,
};
use rusqlite::Connection;

fn repo() -> SqliteBookRepository {
    SqliteBookRepository::open_in_memory().unwrap()
}

fn count_books(repo: &SqliteBookRepository) -> i64 {
    repo.connection()
        .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let mut repo = repo();

    let new = NewBook::new("Dune", "Herbert")
        .with_year(Some(1965))
        .with_genre(Some("Sci-Fi"));
    let created = repo.create_book(&new).unwrap();
    assert_eq!(created.id, BookId::Row(1));
    assert!(!created.is_read);

    let loaded = repo.get_book(&created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn empty_title_or_author_is_rejected_without_writing() {
    let mut repo = repo();

    let err = repo.create_book(&NewBook::new("", "Herbert")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(BookValidationError::EmptyTitle)
    ));
    let err = repo.create_book(&NewBook::new("Dune", "  ")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(BookValidationError::EmptyAuthor)
    ));

    assert_eq!(count_books(&repo), 0);
}

#[test]
fn list_is_empty_then_newest_first() {
    let mut repo = repo();
    assert!(repo.list_books().unwrap().is_empty());

    for title in ["First", "Second", "Third"] {
        repo.create_book(&NewBook::new(title, "Author")).unwrap();
    }

    let titles: Vec<String> = repo
        .list_books()
        .unwrap()
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
}

#[test]
fn mark_read_flips_flag_once() {
    let mut repo = repo();
    let created = repo.create_book(&NewBook::new("Dune", "Herbert")).unwrap();

    let outcome = repo.mark_read(&created.id).unwrap();
    assert!(matches!(outcome, MarkReadOutcome::Marked(ref book) if book.is_read));

    let outcome = repo.mark_read(&created.id).unwrap();
    assert!(matches!(outcome, MarkReadOutcome::AlreadyRead(_)));
    assert!(repo.get_book(&created.id).unwrap().unwrap().is_read);
}

#[test]
fn already_read_book_is_not_written_again() {
    let mut repo = repo();
    let created = repo.create_book(&NewBook::new("Dune", "Herbert")).unwrap();
    repo.mark_read(&created.id).unwrap();

    let before = total_changes(&repo);
    repo.mark_read(&created.id).unwrap();
    assert_eq!(total_changes(&repo), before);
}

fn total_changes(repo: &SqliteBookRepository) -> i64 {
    repo.connection()
        .query_row("SELECT total_changes();", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn mark_read_missing_book_returns_not_found() {
    let mut repo = repo();
    repo.create_book(&NewBook::new("Dune", "Herbert")).unwrap();

    let err = repo.mark_read(&BookId::Row(99)).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(BookId::Row(99))));
    assert!(!repo.list_books().unwrap()[0].is_read);
}

#[test]
fn delete_removes_exactly_one_book_and_warns_second_time() {
    let mut repo = repo();
    let keep_a = repo.create_book(&NewBook::new("Keep A", "Author")).unwrap();
    let target = repo.create_book(&NewBook::new("Target", "Author")).unwrap();
    let keep_b = repo.create_book(&NewBook::new("Keep B", "Author")).unwrap();

    let deleted = repo.delete_book(&target.id).unwrap();
    assert_eq!(deleted.title, "Target");

    let remaining: Vec<BookId> = repo
        .list_books()
        .unwrap()
        .into_iter()
        .map(|book| book.id)
        .collect();
    assert_eq!(remaining, vec![keep_b.id, keep_a.id]);

    let err = repo.delete_book(&target.id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(count_books(&repo), 2);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut repo = repo();
    let first = repo.create_book(&NewBook::new("First", "Author")).unwrap();
    repo.delete_book(&first.id).unwrap();

    let second = repo.create_book(&NewBook::new("Second", "Author")).unwrap();
    assert_ne!(second.id, first.id);
}

#[test]
fn object_ids_are_rejected_by_sqlite_store() {
    let mut repo = repo();
    let err = repo
        .get_book(&BookId::Object("65f1c2a9e4b0a1b2c3d4e5f6".to_string()))
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidId(_)));
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let result = SqliteBookRepository::try_new(conn);
    assert!(matches!(result, Err(StoreError::InvalidData(_))));
}

#[test]
fn repository_rejects_world_schema_connection() {
    let conn = open_db_in_memory(Schema::World).unwrap();
    let result = SqliteBookRepository::try_new(conn);
    assert!(matches!(result, Err(StoreError::InvalidData(ref message)) if message.contains("books")));
}

#[test]
fn service_resolves_typed_ids() {
    let mut service = CatalogService::new(repo());
    let created = service.add_book(&NewBook::new("Dune", "Herbert")).unwrap();

    let err = service.mark_read("abc").unwrap_err();
    assert!(matches!(err, StoreError::InvalidId(_)));

    let outcome = service.mark_read(&format!(" {} ", created.id)).unwrap();
    assert!(matches!(outcome, MarkReadOutcome::Marked(_)));

    let deleted = service.delete_book(&created.id.to_string()).unwrap();
    assert_eq!(deleted.id, created.id);
    assert!(service.list_books().unwrap().is_empty());
}
