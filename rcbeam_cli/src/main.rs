//! # rcbeam CLI
//!
//! Batch front end for `rcbeam_core`:
//!
//! ```bash
//! rcbeam new tower-a.rcb --engineer "J. Doe" --job-id 25-042 --client "ACME"
//! rcbeam import tower-a.rcb etabs_export.json
//! rcbeam design tower-a.rcb --output tower-a-report.json
//! ```

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::New {
            file,
            engineer,
            job_id,
            client,
            force,
        } => commands::new_project(&file, engineer, job_id, client, force),

        Commands::Import { file, records, user } => commands::import(&file, &records, user),

        Commands::Design { file, json, output } => commands::design(&file, json, output.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error [{}]: {e}", e.error_code());
            ExitCode::FAILURE
        }
    }
}
