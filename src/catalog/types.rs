// src/catalog/types.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw change catalog, one TOML document per migration run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub deletes: Vec<String>,
    #[serde(default)]
    pub merges: Vec<NamePair>,
    #[serde(default)]
    pub renames: Vec<NamePair>,
    #[serde(default)]
    pub news: Vec<NewRow>,
}

/// An `old -> new` name pair, used by both merges and renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamePair {
    pub old: String,
    pub new: String,
    /// Delimited alias list to attach to the surviving location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<String>,
}

/// One spreadsheet row describing a location to create.
///
/// Every column is optional at this level; required ones are checked during classification.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<PostalCode>,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub gbloc: Option<String>,
    #[serde(default)]
    pub aliases: Option<String>,
}

/// Postal codes arrive either as text or as a bare number that lost its leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostalCode {
    Number(u32),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub street_address_1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// A validated location ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRecord {
    pub id: Option<Uuid>,
    pub display_name: String,
    pub address: Address,
    /// GBLOC used to look up the transportation office; not an ownership relation.
    pub office_gbloc: Option<String>,
    pub affiliation: Option<String>,
    pub aliases: Vec<String>,
}
