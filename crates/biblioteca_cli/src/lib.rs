//! Startup plumbing shared by the catalog binaries.
//!
//! # Responsibility
//! - Load `.env`, read `AppConfig`, and start file logging.
//! - Run the console on the process stdin/stdout.
//! - Turn startup failures into a diagnostic and exit status 1.

use biblioteca_core::{init_logging, AppConfig, BookRepository, CatalogConsole};
use log::{error, info};
use std::fmt::Display;
use std::io;
use std::process::ExitCode;

const BANNER_RULE: &str =
    "---------------------------------------------------------------------";

/// Loads configuration and initializes logging for `app`.
///
/// A logging failure is reported on stderr and the program keeps going;
/// a configuration failure ends startup.
pub fn bootstrap(app: &'static str) -> Result<AppConfig, ExitCode> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|err| {
        eprintln!("❌ Invalid configuration: {err}");
        ExitCode::FAILURE
    })?;

    let log_dir = config.log_dir.to_string_lossy();
    if let Err(err) = init_logging(app, &config.log_level, &log_dir) {
        eprintln!("⚠️ Warning: file logging disabled: {err}");
    }
    info!(
        "event=config_loaded module=cli status=ok app={app} version={}",
        biblioteca_core::core_version()
    );
    Ok(config)
}

/// Prints the critical connection banner and logs the failure.
pub fn connection_failure(store: &str, hints: &[String], err: &dyn Display) -> ExitCode {
    error!("event=store_connect module=cli status=error store={store} error={err}");
    println!("\n❌ CRITICAL CONNECTION ERROR ({store}) ❌");
    println!("{BANNER_RULE}");
    for hint in hints {
        println!("{hint}");
    }
    println!("Detail: {err}");
    println!("The program will now exit.");
    ExitCode::FAILURE
}

/// Runs the interactive menu over the process console.
pub fn run_catalog<R: BookRepository>(repo: R) -> ExitCode {
    let stdin = io::stdin();
    let mut console = CatalogConsole::new(repo, stdin.lock(), io::stdout());

    match console.run() {
        Ok(()) => {
            info!("event=app_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("❌ Console error: {err}");
            ExitCode::FAILURE
        }
    }
}
