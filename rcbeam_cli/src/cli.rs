use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rcbeam",
    about = "Reinforced-concrete beam rebar design from analysis exports",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty project file
    New {
        /// Path of the .rcb file to create
        file: PathBuf,

        #[arg(long, default_value = "")]
        engineer: String,

        #[arg(long, default_value = "")]
        job_id: String,

        #[arg(long, default_value = "")]
        client: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Import beam records exported by the analysis model
    Import {
        /// Project file to update
        file: PathBuf,

        /// JSON array of beam records
        records: PathBuf,

        /// Name recorded in the lock file while importing
        #[arg(long, default_value = "rcbeam")]
        user: String,
    },

    /// Design every beam in a project and print the schedule
    Design {
        /// Project file to design
        file: PathBuf,

        /// Print the full report as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
