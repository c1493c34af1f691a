// src/plan/delete.rs
use crate::cascade::Cascade;
use crate::config::GuardMode;
use crate::sql::{location_id, Statement};

/// Resolves `target` by name and retires it with everything that depends on it.
pub fn plan_delete(target: &str, cascade: &Cascade, guard: GuardMode) -> Vec<Statement> {
    let mut out = Vec::new();
    if guard == GuardMode::Fail {
        out.push(Statement::location_guard(target));
    }
    out.extend(cascade.delete_statements(&location_id(target)));
    out
}
