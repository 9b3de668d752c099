//! Library catalog backed by MariaDB/MySQL.

use biblioteca_cli::{bootstrap, connection_failure, run_catalog};
use biblioteca_core::MySqlBookRepository;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match bootstrap("biblioteca-mariadb") {
        Ok(config) => config,
        Err(code) => return code,
    };
    let database = config.mysql_database().to_string();

    let repo = match MySqlBookRepository::connect(&config.mysql_url) {
        Ok(repo) => repo,
        Err(err) => {
            let hints = [
                format!(
                    "Make sure the MariaDB/MySQL server is running and that the database '{database}' exists."
                ),
                "Check your credentials in BIBLIOTECA_MYSQL_URL.".to_string(),
            ];
            return connection_failure("MariaDB", &hints, &err);
        }
    };
    println!("✅ Connected to MariaDB '{database}'. Tables verified/created.");

    run_catalog(repo)
}
