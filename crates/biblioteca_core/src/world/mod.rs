//! Adventure world demo over the five-table world schema.
//!
//! # Responsibility
//! - Replace all world rows with the fixed sample data.
//! - Run the read-only mission report join.
//!
//! # Invariants
//! - Seeding is all-or-nothing: clearing and inserting share one transaction.
//! - The report is ordered by mission, hero, then monster name.

use crate::db::DbResult;
use crate::model::world::{
    MissionReportRow, SAMPLE_ENCOUNTERS, SAMPLE_HEROES, SAMPLE_MISSIONS, SAMPLE_MONSTERS,
    SAMPLE_PARTICIPATIONS,
};
use log::info;
use rusqlite::{params, Connection};

const MISSION_REPORT_SQL: &str = "SELECT
    m.name AS mission,
    h.name AS hero,
    p.role AS role,
    mo.name AS monster,
    e.quantity AS quantity
FROM missions m
JOIN participations p ON m.mission_id = p.mission_id
JOIN heroes h ON p.hero_id = h.hero_id
JOIN encounters e ON m.mission_id = e.mission_id
JOIN monsters mo ON e.monster_id = mo.monster_id
ORDER BY m.name, h.name, mo.name;";

/// Row counts written by `seed_world`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub cleared_rows: usize,
    pub inserted_rows: usize,
}

/// Clears every world table and inserts the sample rows.
///
/// On failure nothing is changed: the transaction is rolled back on drop.
pub fn seed_world(conn: &mut Connection) -> DbResult<SeedSummary> {
    let tx = conn.transaction()?;

    let mut cleared_rows = 0;
    for table in [
        "participations",
        "encounters",
        "missions",
        "heroes",
        "monsters",
    ] {
        cleared_rows += tx.execute(&format!("DELETE FROM {table};"), [])?;
    }

    let mut inserted_rows = 0;
    {
        let mut stmt = tx.prepare("INSERT INTO heroes VALUES (?1, ?2, ?3, ?4, ?5);")?;
        for hero in SAMPLE_HEROES {
            inserted_rows += stmt.execute(params![
                hero.hero_id,
                hero.name,
                hero.class,
                hero.level,
                hero.race
            ])?;
        }

        let mut stmt = tx.prepare("INSERT INTO monsters VALUES (?1, ?2, ?3, ?4, ?5);")?;
        for monster in SAMPLE_MONSTERS {
            inserted_rows += stmt.execute(params![
                monster.monster_id,
                monster.name,
                monster.kind,
                monster.hit_points,
                monster.danger
            ])?;
        }

        let mut stmt =
            tx.prepare("INSERT INTO missions VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);")?;
        for mission in SAMPLE_MISSIONS {
            inserted_rows += stmt.execute(params![
                mission.mission_id,
                mission.name,
                mission.description,
                mission.gold_reward,
                mission.difficulty,
                mission.start_date,
                mission.status
            ])?;
        }

        let mut stmt = tx.prepare("INSERT INTO participations VALUES (?1, ?2, ?3, ?4);")?;
        for participation in SAMPLE_PARTICIPATIONS {
            inserted_rows += stmt.execute(params![
                participation.mission_id,
                participation.hero_id,
                participation.role,
                participation.hero_state
            ])?;
        }

        let mut stmt = tx.prepare("INSERT INTO encounters VALUES (?1, ?2, ?3);")?;
        for encounter in SAMPLE_ENCOUNTERS {
            inserted_rows += stmt.execute(params![
                encounter.mission_id,
                encounter.monster_id,
                encounter.quantity
            ])?;
        }
    }
    tx.commit()?;

    info!(
        "event=world_seed module=world status=ok cleared_rows={cleared_rows} inserted_rows={inserted_rows}"
    );
    Ok(SeedSummary {
        cleared_rows,
        inserted_rows,
    })
}

/// Runs the mission/hero/monster join.
pub fn mission_report(conn: &Connection) -> DbResult<Vec<MissionReportRow>> {
    let mut stmt = conn.prepare(MISSION_REPORT_SQL)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(MissionReportRow {
                mission: row.get("mission")?,
                hero: row.get("hero")?,
                role: row.get("role")?,
                monster: row.get("monster")?,
                quantity: row.get("quantity")?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    info!(
        "event=world_report module=world status=ok rows={}",
        rows.len()
    );
    Ok(rows)
}
