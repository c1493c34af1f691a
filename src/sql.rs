// src/sql.rs
//! Statement values and the small amount of SQL text building shared by the planners.

use serde::Serialize;
use std::fmt;

pub const LOCATIONS_TABLE: &str = "duty_locations";
pub const ALIASES_TABLE: &str = "duty_location_names";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Comment,
    Guard,
    Insert,
    Update,
    Delete,
}

/// One emitted statement. `table` is the table the statement writes to (empty for comments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub table: &'static str,
    pub text: String,
}

impl Statement {
    #[must_use]
    pub fn comment(text: impl Into<String>) -> Self {
        Self { kind: StatementKind::Comment, table: "", text: text.into() }
    }

    #[must_use]
    pub fn delete(table: &'static str, predicate: &str) -> Self {
        Self {
            kind: StatementKind::Delete,
            table,
            text: format!("DELETE FROM {table} WHERE {predicate}"),
        }
    }

    #[must_use]
    pub fn update(table: &'static str, text: String) -> Self {
        Self { kind: StatementKind::Update, table, text }
    }

    #[must_use]
    pub fn insert(table: &'static str, text: String) -> Self {
        Self { kind: StatementKind::Insert, table, text }
    }

    /// Aborts the surrounding transaction when no duty location carries `name`.
    #[must_use]
    pub fn location_guard(name: &str) -> Self {
        let lit = quote(name);
        let body = format!(
            "BEGIN IF NOT EXISTS (SELECT 1 FROM {LOCATIONS_TABLE} WHERE name = {lit}) \
             THEN RAISE EXCEPTION 'duty location not found: %', {lit}; END IF; END"
        );
        let tag = dollar_tag(&body);
        Self {
            kind: StatementKind::Guard,
            table: LOCATIONS_TABLE,
            text: format!("DO {tag} {body} {tag}"),
        }
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind == StatementKind::Comment
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_comment() {
            write!(f, "-- {}", self.text)
        } else {
            write!(f, "{};", self.text)
        }
    }
}

/// Dollar-quote delimiter that doesn't occur in `body`: `$$`, then `$guard$`, `$guard1$`, ...
fn dollar_tag(body: &str) -> String {
    let mut tag = "$$".to_string();
    let mut n = 0;
    while body.contains(&tag) {
        tag = if n == 0 { "$guard$".to_string() } else { format!("$guard{n}$") };
        n += 1;
    }
    tag
}

/// Quotes a string as a SQL literal, doubling embedded single quotes.
#[must_use]
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Quoted literal, or `NULL` when absent.
#[must_use]
pub fn quote_opt(value: Option<&str>) -> String {
    value.map_or_else(|| "NULL".to_string(), quote)
}

/// Sub-query resolving a duty location id by its unique name at execution time.
#[must_use]
pub fn location_id(name: &str) -> String {
    format!("(SELECT id FROM {LOCATIONS_TABLE} WHERE name = {})", quote(name))
}
