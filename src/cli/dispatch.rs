//! Command dispatch logic extracted from binary to reduce main function size.

use super::args::{Commands, PlanArgs};
use super::handlers::{handle_check, handle_init, handle_plan, handle_tables};
use crate::exit::LocshiftExit;
use anyhow::Result;
use std::path::Path;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands, config_path: Option<&Path>) -> Result<LocshiftExit> {
    match command {
        Commands::Plan {
            catalog,
            out,
            stdout,
            names_out,
            on_conflict,
        } => {
            let args = PlanArgs {
                catalog,
                out,
                stdout,
                names_out,
                on_conflict,
            };
            handle_plan(&args, config_path)
        }
        Commands::Check { catalog, json } => handle_check(&catalog, json, config_path),
        Commands::Tables { json } => handle_tables(json),
        Commands::Init { force } => handle_init(force, config_path),
    }
}
