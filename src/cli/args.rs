use crate::config::ConflictPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "locshift", version, about = "Duty location migration planner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Config file (default: ./locshift.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the migration for a change catalog
    Plan {
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,
        /// Output file (overrides output.path)
        #[arg(long, short, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Print the migration instead of writing it
        #[arg(long)]
        stdout: bool,
        /// Also write the New location names (overrides output.names_path)
        #[arg(long, value_name = "FILE")]
        names_out: Option<PathBuf>,
        /// Conflict handling for New locations (overrides insert.on_conflict)
        #[arg(long, value_enum)]
        on_conflict: Option<ConflictPolicy>,
    },
    /// Validate a catalog and report overlapping names without writing anything
    Check {
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Show the dependent tables in deletion order
    Tables {
        #[arg(long)]
        json: bool,
    },
    /// Write a default locshift.toml
    Init {
        #[arg(long, short)]
        force: bool,
    },
}

/// Arguments for the plan command (used by handlers)
#[derive(Debug, Clone, Default)]
pub struct PlanArgs {
    pub catalog: PathBuf,
    pub out: Option<PathBuf>,
    pub stdout: bool,
    pub names_out: Option<PathBuf>,
    pub on_conflict: Option<ConflictPolicy>,
}
