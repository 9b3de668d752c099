//! Library catalog backed by a MongoDB collection.

use biblioteca_cli::{bootstrap, connection_failure, run_catalog};
use biblioteca_core::repo::mongo_repo::COLLECTION_NAME;
use biblioteca_core::MongoBookRepository;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match bootstrap("biblioteca-mongo") {
        Ok(config) => config,
        Err(code) => return code,
    };

    let repo = match MongoBookRepository::connect(&config.mongo_uri, &config.mongo_database) {
        Ok(repo) => repo,
        Err(err) => {
            let hints = [format!(
                "Make sure the MongoDB server is running and that the URI ({}) is correct.",
                config.mongo_uri
            )];
            return connection_failure("MongoDB", &hints, &err);
        }
    };
    println!("✅ Connected to MongoDB. Using collection '{COLLECTION_NAME}'.");

    run_catalog(repo)
}
