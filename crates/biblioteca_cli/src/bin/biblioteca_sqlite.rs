//! Library catalog backed by a local SQLite file.

use biblioteca_cli::{bootstrap, connection_failure, run_catalog};
use biblioteca_core::SqliteBookRepository;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match bootstrap("biblioteca-sqlite") {
        Ok(config) => config,
        Err(code) => return code,
    };

    let repo = match SqliteBookRepository::open(&config.sqlite_path) {
        Ok(repo) => repo,
        Err(err) => {
            let hints = [format!(
                "Check that `{}` is a writable SQLite file.",
                config.sqlite_path.display()
            )];
            return connection_failure("SQLite", &hints, &err);
        }
    };

    run_catalog(repo)
}
