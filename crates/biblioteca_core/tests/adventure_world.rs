use biblioteca_core::console::render_mission_report;
use biblioteca_core::db::{open_db, open_db_in_memory, Schema};
use biblioteca_core::world::{mission_report, seed_world};
use rusqlite::Connection;

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn seed_inserts_all_sample_rows() {
    let mut conn = open_db_in_memory(Schema::World).unwrap();

    let summary = seed_world(&mut conn).unwrap();
    assert_eq!(summary.cleared_rows, 0);
    assert_eq!(summary.inserted_rows, 15);
    assert_eq!(count(&conn, "heroes"), 3);
    assert_eq!(count(&conn, "monsters"), 3);
    assert_eq!(count(&conn, "missions"), 2);
    assert_eq!(count(&conn, "participations"), 4);
    assert_eq!(count(&conn, "encounters"), 3);
}

#[test]
fn reseeding_replaces_rows_instead_of_duplicating() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mundo.db");

    let mut conn = open_db(&path, Schema::World).unwrap();
    seed_world(&mut conn).unwrap();
    drop(conn);

    let mut conn = open_db(&path, Schema::World).unwrap();
    let summary = seed_world(&mut conn).unwrap();
    assert_eq!(summary.cleared_rows, 15);
    assert_eq!(count(&conn, "heroes"), 3);
}

#[test]
fn report_joins_heroes_and_monsters_per_mission_in_order() {
    let mut conn = open_db_in_memory(Schema::World).unwrap();
    seed_world(&mut conn).unwrap();

    let rows = mission_report(&conn).unwrap();
    let keys: Vec<(&str, &str, &str, i64)> = rows
        .iter()
        .map(|row| {
            (
                row.mission.as_str(),
                row.hero.as_str(),
                row.monster.as_str(),
                row.quantity,
            )
        })
        .collect();

    assert_eq!(
        keys,
        vec![
            ("Amulet Rescue", "Aura", "Great Goblin", 5),
            ("Amulet Rescue", "Gimli", "Great Goblin", 5),
            ("Dragon Hunt", "Aura", "Skeleton King", 1),
            ("Dragon Hunt", "Aura", "Winged Shadow", 10),
            ("Dragon Hunt", "Lyra", "Skeleton King", 1),
            ("Dragon Hunt", "Lyra", "Winged Shadow", 10),
        ]
    );
    assert_eq!(rows[4].role, "Magic Support");

    let rendered = render_mission_report(&rows);
    assert_eq!(rendered.matches("Dragon Hunt").count(), 4);
}

#[test]
fn deleting_a_mission_cascades_to_join_tables() {
    let mut conn = open_db_in_memory(Schema::World).unwrap();
    seed_world(&mut conn).unwrap();

    conn.execute("DELETE FROM missions WHERE mission_id = 501;", [])
        .unwrap();

    assert_eq!(count(&conn, "participations"), 2);
    assert_eq!(count(&conn, "encounters"), 2);
    assert_eq!(count(&conn, "heroes"), 3);
}

#[test]
fn check_constraints_reject_unknown_values() {
    let conn = open_db_in_memory(Schema::World).unwrap();

    let err = conn.execute(
        "INSERT INTO missions (mission_id, name, difficulty) VALUES (1, 'Nap', 'Trivial');",
        [],
    );
    assert!(err.is_err());

    let err = conn.execute(
        "INSERT INTO heroes (hero_id, name, level) VALUES (1, 'Novice', 0);",
        [],
    );
    assert!(err.is_err());
}

#[test]
fn report_is_empty_before_seeding() {
    let conn = open_db_in_memory(Schema::World).unwrap();
    assert!(mission_report(&conn).unwrap().is_empty());
}
