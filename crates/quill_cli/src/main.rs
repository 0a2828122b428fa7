//! CLI smoke entry point.
//!
//! Loads configuration from the environment, prepares the database (seeding
//! it on first boot) and prints the public article listing.

use quill_api::ArticleApi;
use quill_core::{core_version, init_logging, QuillConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match QuillConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("quill: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("quill: {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("quill_core version={}", core_version());

    let api = match ArticleApi::bootstrap(&config.db_path, config.seed_on_boot) {
        Ok(api) => api,
        Err(err) => {
            eprintln!("quill: cannot open `{}`: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let response = api.list_articles(None);
    println!("GET /article -> {}", response.status);
    if let Some(body) = response.body {
        println!("{body:#}");
    }

    if response.status == 200 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
