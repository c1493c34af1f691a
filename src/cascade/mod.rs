// src/cascade/mod.rs
//! Dependency graph walker.
//!
//! Turns a location id into the ordered `DELETE`s that retire it without
//! tripping a foreign key. The graph is the static [`steps::STANDARD`] table;
//! nothing is discovered at run time.

pub mod steps;

use crate::error::{PlanError, Result};
use crate::sql::{Statement, LOCATIONS_TABLE};
use serde::Serialize;

/// What a foreign key column points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Parent {
    /// The duty location being retired.
    Location,
    /// Rows of another cascade step.
    Step(&'static str),
}

/// One foreign key from a step's table to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub column: &'static str,
    pub parent: Parent,
}

/// A dependent table and the keys that tie its rows to the location.
///
/// A row is in scope when any of its links match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CascadeStep {
    pub table: &'static str,
    pub links: &'static [Link],
}

#[derive(Debug, Clone, Copy)]
pub struct Cascade {
    steps: &'static [CascadeStep],
}

impl Default for Cascade {
    fn default() -> Self {
        Self::standard()
    }
}

impl Cascade {
    #[must_use]
    pub const fn new(steps: &'static [CascadeStep]) -> Self {
        Self { steps }
    }

    #[must_use]
    pub const fn standard() -> Self {
        Self::new(steps::STANDARD)
    }

    #[must_use]
    pub fn steps(&self) -> &'static [CascadeStep] {
        self.steps
    }

    #[must_use]
    pub fn position(&self, table: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.table == table)
    }

    /// Checks that every parent exists and is deleted after its children.
    ///
    /// # Errors
    /// Returns the first step whose parent is unknown or listed earlier.
    pub fn verify(&self) -> Result<()> {
        for (idx, step) in self.steps.iter().enumerate() {
            for link in step.links {
                let Parent::Step(parent) = link.parent else {
                    continue;
                };
                match self.position(parent) {
                    None => return Err(PlanError::UnknownParent { table: step.table, parent }),
                    Some(p) if p <= idx => {
                        return Err(PlanError::CascadeOrder { table: step.table, parent });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }

    /// `WHERE` predicate selecting the rows of `table` tied to `location_id`.
    ///
    /// `location_id` is a SQL expression, typically a name sub-query.
    #[must_use]
    pub fn scope(&self, table: &str, location_id: &str) -> Option<String> {
        let step = self.steps.iter().find(|s| s.table == table)?;
        let clauses: Vec<String> = step
            .links
            .iter()
            .map(|link| self.link_clause(link, location_id))
            .collect();

        Some(match clauses.as_slice() {
            [single] => single.clone(),
            _ => format!("({})", clauses.join(" OR ")),
        })
    }

    fn link_clause(&self, link: &Link, location_id: &str) -> String {
        match link.parent {
            Parent::Location => format!("{} = {location_id}", link.column),
            Parent::Step(parent) => match self.scope(parent, location_id) {
                Some(inner) => format!("{} IN (SELECT id FROM {parent} WHERE {inner})", link.column),
                // unreachable once verify() has passed
                None => "FALSE".to_string(),
            },
        }
    }

    /// Every delete needed to retire `location_id`, leaves first, location row last.
    ///
    /// Tables with no matching rows still get their statement.
    #[must_use]
    pub fn delete_statements(&self, location_id: &str) -> Vec<Statement> {
        let mut out: Vec<Statement> = self
            .steps
            .iter()
            .filter_map(|step| {
                self.scope(step.table, location_id)
                    .map(|pred| Statement::delete(step.table, &pred))
            })
            .collect();
        out.push(Statement::delete(LOCATIONS_TABLE, &format!("id = {location_id}")));
        out
    }
}
