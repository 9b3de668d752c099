//! Adventure world demo: build the schema, seed it, print the mission report.

use biblioteca_cli::{bootstrap, connection_failure};
use biblioteca_core::console::render_mission_report;
use biblioteca_core::db::{open_db, Schema};
use biblioteca_core::world::{mission_report, seed_world};
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match bootstrap("mundo-aventuras") {
        Ok(config) => config,
        Err(code) => return code,
    };

    let mut conn = match open_db(&config.world_path, Schema::World) {
        Ok(conn) => conn,
        Err(err) => {
            let hints = [format!(
                "Check that `{}` is a writable SQLite file.",
                config.world_path.display()
            )];
            return connection_failure("SQLite", &hints, &err);
        }
    };
    println!("✅ Tables created successfully.");

    match seed_world(&mut conn) {
        Ok(_) => println!("✅ Sample data inserted successfully."),
        Err(err) => {
            error!("event=world_seed module=cli status=error error={err}");
            println!("❌ Error while inserting data: {err}");
        }
    }

    match mission_report(&conn) {
        Ok(rows) => print!("{}", render_mission_report(&rows)),
        Err(err) => {
            error!("event=world_report module=cli status=error error={err}");
            println!("❌ Error while running the report: {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("\nDatabase connection closed.");
    ExitCode::SUCCESS
}
