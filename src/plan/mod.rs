// src/plan/mod.rs
//! Operation executor: turns classified changes into one ordered statement plan.
//!
//! Phases always run in [`PHASE_ORDER`]. Renames are cheap and never cascade,
//! deletes need no name lookups from later phases, and merges (the only phase
//! that both moves and destroys rows) run once the rest of the identity space
//! is settled.

pub mod delete;
pub mod insert;
pub mod merge;
pub mod rename;

pub use delete::plan_delete;
pub use insert::plan_new;
pub use merge::plan_merge;
pub use rename::plan_rename;

use crate::cascade::Cascade;
use crate::catalog::Catalog;
use crate::classify::{classify, ChangeKind, ChangeOperation, ClassifiedChanges};
use crate::config::Config;
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::sql::{Statement, StatementKind};

pub const PHASE_ORDER: [ChangeKind; 4] = [
    ChangeKind::Rename,
    ChangeKind::Delete,
    ChangeKind::New,
    ChangeKind::Merge,
];

/// Statements for a single change operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSection {
    pub kind: ChangeKind,
    pub label: String,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub sections: Vec<PlanSection>,
}

impl Plan {
    /// Every statement in execution order.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.sections.iter().flat_map(|s| s.statements.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.statements.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn count(&self, kind: StatementKind) -> usize {
        self.statements().filter(|s| s.kind == kind).count()
    }
}

/// Classifies `catalog` and plans it. Fails before producing anything on bad input.
///
/// # Errors
/// Returns error on a blank name, a New row missing a required field, or a bad cascade table.
pub fn plan_catalog<'a>(
    catalog: &Catalog,
    config: &'a Config,
    ids: Box<dyn IdGenerator + 'a>,
) -> Result<(ClassifiedChanges, Plan)> {
    let changes = classify(catalog, &config.aliases.delimiter)?;
    let mut planner = Planner::with_parts(config, Cascade::standard(), ids)?;
    let plan = planner.plan(&changes);
    Ok((changes, plan))
}

pub struct Planner<'a> {
    config: &'a Config,
    cascade: Cascade,
    ids: Box<dyn IdGenerator + 'a>,
}

impl<'a> Planner<'a> {
    /// # Errors
    /// Returns error if `cascade` is out of order.
    pub fn with_parts(
        config: &'a Config,
        cascade: Cascade,
        ids: Box<dyn IdGenerator + 'a>,
    ) -> Result<Self> {
        cascade.verify()?;
        Ok(Self { config, cascade, ids })
    }

    /// Plans every change, phase by phase in [`PHASE_ORDER`], input order within a phase.
    pub fn plan(&mut self, changes: &ClassifiedChanges) -> Plan {
        let mut plan = Plan::default();

        for kind in PHASE_ORDER {
            let ops = changes.of_kind(kind);
            tracing::info!(phase = %kind, count = ops.len(), "planning phase");
            for op in &ops {
                plan.sections.push(PlanSection {
                    kind,
                    label: op.describe(),
                    statements: self.plan_operation(op),
                });
            }
        }

        tracing::info!(statements = plan.len(), "plan complete");
        plan
    }

    pub fn plan_operation(&mut self, op: &ChangeOperation) -> Vec<Statement> {
        let statements = match op {
            ChangeOperation::Rename(r) => plan_rename(r, self.ids.as_mut()),
            ChangeOperation::Delete(target) => {
                plan_delete(target, &self.cascade, self.config.guards.delete)
            }
            ChangeOperation::New(record) => plan_new(record, &self.config.insert, self.ids.as_mut()),
            ChangeOperation::Merge(m) => {
                plan_merge(m, &self.cascade, self.config.guards.merge, self.ids.as_mut())
            }
        };
        tracing::debug!(operation = %op.describe(), statements = statements.len(), "planned");
        statements
    }
}
