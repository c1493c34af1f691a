// src/classify.rs
//! Change classifier: raw catalog lists into typed operations.

use crate::aliases;
use crate::catalog::{normalize, Address, Catalog, LocationRecord, NamePair, NewRow};
use crate::error::{PlanError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Rename,
    Delete,
    New,
    Merge,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Rename => "Rename",
            Self::Delete => "Delete",
            Self::New => "New",
            Self::Merge => "Merge",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Merge {
    pub old: String,
    pub new: String,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub old: String,
    pub new: String,
    /// `None` keeps the rename a pure relabel.
    pub aliases: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOperation {
    Delete(String),
    Merge(Merge),
    Rename(Rename),
    New(LocationRecord),
}

impl ChangeOperation {
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Delete(_) => ChangeKind::Delete,
            Self::Merge(_) => ChangeKind::Merge,
            Self::Rename(_) => ChangeKind::Rename,
            Self::New(_) => ChangeKind::New,
        }
    }

    /// Human label used for plan section comments.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Delete(name) => format!("Delete: {name}"),
            Self::Merge(m) => format!("Merge: {} -> {}", m.old, m.new),
            Self::Rename(r) => format!("Rename: {} -> {}", r.old, r.new),
            Self::New(rec) => format!("New: {}", rec.display_name),
        }
    }
}

/// The catalog split by operation kind, each list in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedChanges {
    pub deletes: Vec<String>,
    pub merges: Vec<Merge>,
    pub renames: Vec<Rename>,
    pub news: Vec<LocationRecord>,
}

impl ClassifiedChanges {
    /// Operations of one kind, in input order.
    #[must_use]
    pub fn of_kind(&self, kind: ChangeKind) -> Vec<ChangeOperation> {
        match kind {
            ChangeKind::Delete => self.deletes.iter().cloned().map(ChangeOperation::Delete).collect(),
            ChangeKind::Merge => self.merges.iter().cloned().map(ChangeOperation::Merge).collect(),
            ChangeKind::Rename => self.renames.iter().cloned().map(ChangeOperation::Rename).collect(),
            ChangeKind::New => self.news.iter().cloned().map(ChangeOperation::New).collect(),
        }
    }

    #[must_use]
    pub fn count(&self, kind: ChangeKind) -> usize {
        match kind {
            ChangeKind::Delete => self.deletes.len(),
            ChangeKind::Merge => self.merges.len(),
            ChangeKind::Rename => self.renames.len(),
            ChangeKind::New => self.news.len(),
        }
    }
}

/// Classifies a raw catalog. Lists are not cross-checked against each other.
///
/// # Errors
/// Returns error on a blank name or a New row missing a required column.
pub fn classify(catalog: &Catalog, alias_delimiter: &str) -> Result<ClassifiedChanges> {
    let deletes = catalog
        .deletes
        .iter()
        .enumerate()
        .map(|(i, name)| required_name(Some(name), "deletes", i))
        .collect::<Result<Vec<_>>>()?;

    let merges = catalog
        .merges
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            let (old, new) = pair_names(pair, "merges", i)?;
            // the loser cascade would take the survivor with it
            if old == new {
                return Err(PlanError::SelfMerge { index: i, name: new });
            }
            let aliases = alias_list(pair.aliases.as_deref(), alias_delimiter, "merges", i)?;
            Ok(Merge { old, new, aliases })
        })
        .collect::<Result<Vec<_>>>()?;

    let renames = catalog
        .renames
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            let (old, new) = pair_names(pair, "renames", i)?;
            let aliases = match pair.aliases.as_deref() {
                Some(raw) => Some(alias_list(Some(raw), alias_delimiter, "renames", i)?),
                None => None,
            };
            Ok(Rename { old, new, aliases })
        })
        .collect::<Result<Vec<_>>>()?;

    let news = catalog
        .news
        .iter()
        .enumerate()
        .map(|(i, row)| location_record(row, i, alias_delimiter))
        .collect::<Result<Vec<_>>>()?;

    Ok(ClassifiedChanges { deletes, merges, renames, news })
}

fn required_name(raw: Option<&str>, list: &'static str, index: usize) -> Result<String> {
    let name = normalize::text(raw).ok_or(PlanError::EmptyName { list, index })?;
    plain(name, list, index, "name")
}

/// Values end up in single-line SQL, `--` comments and `DO` bodies.
fn plain(value: String, list: &'static str, index: usize, field: &'static str) -> Result<String> {
    if normalize::has_control(&value) {
        return Err(PlanError::ControlCharacter { list, index, field });
    }
    Ok(value)
}

fn alias_list(
    raw: Option<&str>,
    delimiter: &str,
    list: &'static str,
    index: usize,
) -> Result<Vec<String>> {
    aliases::split(raw, delimiter)
        .into_iter()
        .map(|alias| plain(alias, list, index, "aliases"))
        .collect()
}

fn pair_names(pair: &NamePair, list: &'static str, index: usize) -> Result<(String, String)> {
    let old = required_name(Some(&pair.old), list, index)?;
    let new = required_name(Some(&pair.new), list, index)?;
    Ok((old, new))
}

fn location_record(row: &NewRow, index: usize, alias_delimiter: &str) -> Result<LocationRecord> {
    let display_name = required_name(row.name.as_deref(), "news", index)?;
    let field = |value: Option<&str>, field: &'static str| -> Result<String> {
        let text = normalize::text(value).ok_or_else(|| PlanError::MissingField {
            record: display_name.clone(),
            field,
        })?;
        plain(text, "news", index, field)
    };
    let optional = |value: Option<&str>, field: &'static str| {
        normalize::text(value)
            .map(|text| plain(text, "news", index, field))
            .transpose()
    };

    let city = field(row.city.as_deref(), "city")?;
    let state = field(row.state.as_deref(), "state")?;
    let postal_code = row
        .postal_code
        .as_ref()
        .map(normalize::postal_code)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| PlanError::MissingField {
            record: display_name.clone(),
            field: "postal_code",
        })?;
    let postal_code = plain(postal_code, "news", index, "postal_code")?;
    let street_address_1 = optional(row.street_address.as_deref(), "street_address")?.unwrap_or_default();
    let office_gbloc = optional(row.gbloc.as_deref(), "gbloc")?;
    let affiliation = optional(row.affiliation.as_deref(), "affiliation")?;

    Ok(LocationRecord {
        id: row.id,
        address: Address {
            street_address_1,
            city,
            state,
            postal_code,
        },
        office_gbloc,
        affiliation: normalize::affiliation(affiliation.as_deref()),
        aliases: alias_list(row.aliases.as_deref(), alias_delimiter, "news", index)?,
        display_name,
    })
}

/// A name that shows up in more than one role across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlap {
    pub name: String,
    pub roles: Vec<&'static str>,
}

/// Lists names used in more than one role (e.g. both deleted and merged).
///
/// Planning does not reject these; they are reported by `check`.
#[must_use]
pub fn find_overlaps(changes: &ClassifiedChanges) -> Vec<Overlap> {
    let mut roles: BTreeMap<&str, Vec<&'static str>> = BTreeMap::new();

    for name in &changes.deletes {
        roles.entry(name.as_str()).or_default().push("delete");
    }
    for m in &changes.merges {
        roles.entry(m.old.as_str()).or_default().push("merge source");
        roles.entry(m.new.as_str()).or_default().push("merge target");
    }
    for r in &changes.renames {
        roles.entry(r.old.as_str()).or_default().push("rename source");
        roles.entry(r.new.as_str()).or_default().push("rename target");
    }
    for rec in &changes.news {
        roles.entry(rec.display_name.as_str()).or_default().push("new");
    }

    roles
        .into_iter()
        .filter(|(_, r)| r.len() > 1)
        .map(|(name, roles)| Overlap { name: name.to_string(), roles })
        .collect()
}
