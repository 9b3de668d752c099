use biblioteca_core::db::migrations::latest_version;
use biblioteca_core::db::{open_db, open_db_in_memory, DbError, Schema};
use rusqlite::Connection;

#[test]
fn open_catalog_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory(Schema::Catalog).unwrap();

    assert_eq!(schema_version(&conn), latest_version(Schema::Catalog));
    assert_table_exists(&conn, "books");
}

#[test]
fn open_world_in_memory_creates_all_five_tables() {
    let conn = open_db_in_memory(Schema::World).unwrap();

    assert_eq!(schema_version(&conn), latest_version(Schema::World));
    for table in [
        "missions",
        "heroes",
        "monsters",
        "participations",
        "encounters",
    ] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("biblioteca.db");

    let conn_first = open_db(&path, Schema::Catalog).unwrap();
    conn_first
        .execute(
            "INSERT INTO books (title, author) VALUES ('Dune', 'Herbert');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path, Schema::Catalog).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version(Schema::Catalog));
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path, Schema::Catalog).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version(Schema::Catalog));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn connections_enforce_foreign_keys() {
    let conn = open_db_in_memory(Schema::World).unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
