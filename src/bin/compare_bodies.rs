//! compare-bodies - report how the body lists of two motion records differ
//!
//! Always exits successfully: a record that cannot be read is reported on
//! stdout and the comparison is skipped.

use clap::Parser;
use motion_replay::{cli::CompareArgs, compare_files, config::AppConfig, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CompareArgs::parse();

    let config = AppConfig::load(args.config.as_deref()).unwrap_or_default();
    let _log_guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    match compare_files(&args.first, &args.second) {
        Ok(report) => print!("{}", report),
        Err(e) => {
            tracing::debug!("Comparison failed: {:?}", e);
            println!("An error occurred: {}", e);
        }
    }

    ExitCode::SUCCESS
}
