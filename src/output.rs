// src/output.rs
//! Rendering a plan into a single "up" migration and writing it out.

use crate::classify::ClassifiedChanges;
use crate::plan::Plan;
use crate::sql::{Statement, StatementKind};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub header: bool,
}

/// Renders the plan as SQL text, one statement per line, sections separated by a blank line.
#[must_use]
pub fn render(plan: &Plan, opts: RenderOptions) -> String {
    let mut out = String::new();

    if opts.header {
        let _ = writeln!(out, "-- Generated by locshift {}", env!("CARGO_PKG_VERSION"));
        let _ = writeln!(
            out,
            "-- {} statements across {} operations. Run inside a single transaction.",
            plan.len(),
            plan.sections.len()
        );
        let _ = writeln!(
            out,
            "-- inserts: {}, updates: {}, deletes: {}, guards: {}",
            plan.count(StatementKind::Insert),
            plan.count(StatementKind::Update),
            plan.count(StatementKind::Delete),
            plan.count(StatementKind::Guard)
        );
        out.push('\n');
    }

    for section in &plan.sections {
        let _ = writeln!(out, "{}", Statement::comment(section.label.as_str()));
        for stmt in &section.statements {
            let _ = writeln!(out, "{stmt}");
        }
        out.push('\n');
    }

    out
}

/// Names of every New location, joined for pasting into an `IN ('...')` list.
#[must_use]
pub fn render_names(changes: &ClassifiedChanges) -> String {
    changes
        .news
        .iter()
        .map(|r| r.display_name.as_str())
        .collect::<Vec<_>>()
        .join("','")
}

/// Writes `content` to `path` atomically (temp file + rename), creating parent directories.
///
/// # Errors
/// Returns error if any filesystem step fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    fs::write(temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

    fs::rename(temp_path, path)
        .with_context(|| format!("Failed to rename temp to {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
