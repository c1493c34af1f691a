use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub insert: InsertConfig,
    #[serde(default)]
    pub guards: GuardConfig,
    #[serde(default)]
    pub aliases: AliasConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names_path: Option<String>,
    #[serde(default = "default_true")]
    pub header: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            names_path: None,
            header: true,
        }
    }
}

/// What to do when a New location's name already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// `ON CONFLICT (name) DO NOTHING`
    #[default]
    Skip,
    /// `ON CONFLICT (name) DO UPDATE` address, office and affiliation
    Update,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsertConfig {
    #[serde(default)]
    pub on_conflict: ConflictPolicy,
    #[serde(default = "default_true")]
    pub provides_services_counseling: bool,
}

impl Default for InsertConfig {
    fn default() -> Self {
        Self {
            on_conflict: ConflictPolicy::default(),
            provides_services_counseling: true,
        }
    }
}

/// Behaviour when a name in the catalog doesn't resolve at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardMode {
    /// Emit a guard that raises and aborts the migration.
    Fail,
    /// Let the statements match zero rows.
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuardConfig {
    #[serde(default = "default_merge_guard")]
    pub merge: GuardMode,
    #[serde(default = "default_delete_guard")]
    pub delete: GuardMode,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            merge: default_merge_guard(),
            delete: default_delete_guard(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AliasConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self { delimiter: default_delimiter() }
    }
}

const fn default_true() -> bool { true }
const fn default_merge_guard() -> GuardMode { GuardMode::Fail }
const fn default_delete_guard() -> GuardMode { GuardMode::Skip }

fn default_output_path() -> String {
    "migrations/app/schema/update_duty_locations.up.sql".to_string()
}

fn default_delimiter() -> String { ",".to_string() }
