// src/cli/handlers.rs
use crate::catalog::Catalog;
use crate::cascade::{Cascade, Parent};
use crate::classify::{classify, find_overlaps, ChangeKind, Overlap};
use crate::cli::args::PlanArgs;
use crate::config::{Config, DEFAULT_PATH};
use crate::exit::LocshiftExit;
use crate::ids::RandomIds;
use crate::output::{self, RenderOptions};
use crate::plan::{plan_catalog, PHASE_ORDER};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Handles the plan command.
///
/// # Errors
/// Returns error if the catalog can't be planned or the output can't be written.
pub fn handle_plan(args: &PlanArgs, config_path: Option<&Path>) -> Result<LocshiftExit> {
    let mut config = Config::load(config_path)?;
    if let Some(policy) = args.on_conflict {
        config.insert.on_conflict = policy;
    }

    let catalog = Catalog::load(&args.catalog)?;
    let (changes, plan) = plan_catalog(&catalog, &config, Box::new(RandomIds))?;
    if plan.is_empty() {
        tracing::warn!(catalog = %args.catalog.display(), "catalog has no changes");
    }
    let sql = output::render(&plan, RenderOptions { header: config.output.header });

    let names_path = args
        .names_out
        .clone()
        .or_else(|| config.output.names_path.as_ref().map(PathBuf::from));
    if let Some(path) = &names_path {
        output::write_atomic(path, &output::render_names(&changes))?;
    }

    if args.stdout {
        print!("{sql}");
        return Ok(LocshiftExit::Success);
    }

    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.path));
    output::write_atomic(&out_path, &sql)?;

    println!("{} Plan written!", "✓".green());
    for kind in PHASE_ORDER {
        println!("   {:<8} {}", format!("{kind}s:"), changes.count(kind));
    }
    println!("   Statements: {}", plan.len());
    println!("   Output:     {}", out_path.display());
    if let Some(path) = names_path {
        println!("   Names:      {}", path.display());
    }
    Ok(LocshiftExit::Success)
}

#[derive(Debug, Serialize)]
struct CheckReport {
    catalog: String,
    counts: Vec<(ChangeKind, usize)>,
    overlaps: Vec<Overlap>,
    error: Option<String>,
}

/// Handles the check command.
///
/// # Errors
/// Returns error if the catalog or config can't be read.
pub fn handle_check(catalog_path: &Path, json: bool, config_path: Option<&Path>) -> Result<LocshiftExit> {
    let config = Config::load(config_path)?;
    let catalog = Catalog::load(catalog_path)?;

    let mut report = CheckReport {
        catalog: catalog_path.display().to_string(),
        counts: Vec::new(),
        overlaps: Vec::new(),
        error: None,
    };

    match classify(&catalog, &config.aliases.delimiter) {
        Ok(changes) => {
            report.counts = PHASE_ORDER.iter().map(|k| (*k, changes.count(*k))).collect();
            report.overlaps = find_overlaps(&changes);
            for o in &report.overlaps {
                tracing::warn!(name = %o.name, roles = ?o.roles, "name used in more than one role");
            }
        }
        Err(e) => report.error = Some(e.to_string()),
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_check_report(&report);
    }

    if report.error.is_some() {
        Ok(LocshiftExit::CheckFailed)
    } else {
        Ok(LocshiftExit::Success)
    }
}

fn print_check_report(report: &CheckReport) {
    if let Some(err) = &report.error {
        println!("{} {}", "✗".red(), err);
        return;
    }

    println!("{} {} is plannable", "✓".green(), report.catalog);
    for (kind, count) in &report.counts {
        println!("   {:<8} {count}", format!("{kind}s:"));
    }

    if report.overlaps.is_empty() {
        return;
    }
    println!();
    println!("{}", "Names used in more than one role:".yellow().bold());
    for o in &report.overlaps {
        println!("   {} ({})", o.name, o.roles.join(", "));
    }
}

/// Handles the tables command.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn handle_tables(json: bool) -> Result<LocshiftExit> {
    let cascade = Cascade::standard();

    if json {
        println!("{}", serde_json::to_string_pretty(cascade.steps())?);
        return Ok(LocshiftExit::Success);
    }

    for (idx, step) in cascade.steps().iter().enumerate() {
        let links: Vec<String> = step
            .links
            .iter()
            .map(|l| match l.parent {
                Parent::Location => format!("{} -> duty_locations", l.column),
                Parent::Step(p) => format!("{} -> {p}", l.column),
            })
            .collect();
        println!("{:>3}. {:<48} {}", idx + 1, step.table.bold(), links.join(", "));
    }
    println!("{:>3}. {}", cascade.steps().len() + 1, "duty_locations".bold());
    Ok(LocshiftExit::Success)
}

/// Handles the init command.
///
/// # Errors
/// Returns error if the config file can't be written.
pub fn handle_init(force: bool, config_path: Option<&Path>) -> Result<LocshiftExit> {
    let path = config_path.unwrap_or(Path::new(DEFAULT_PATH));
    if path.exists() && !force {
        println!("{} already exists (use --force to overwrite)", path.display());
        return Ok(LocshiftExit::Error);
    }

    Config::default()
        .save(Some(path))
        .with_context(|| format!("Failed to initialise {}", path.display()))?;
    println!("{} Wrote {}", "✓".green(), path.display());
    Ok(LocshiftExit::Success)
}
