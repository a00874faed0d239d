use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_SEARCH_LIMIT: usize = 50;
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ArmoryConfig {
    pub database: DatabaseConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Snapshot file. Required unless the caller opens the built-in sample.
    pub path: Option<PathBuf>,
    #[serde(flatten)]
    pub tables: TableNames,
}

/// Relation names inside the snapshot. They are spliced into SQL text, so
/// [`TableNames::validate`] only admits plain identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TableNames {
    #[serde(rename = "items_table")]
    pub items: String,
    #[serde(rename = "fts_table")]
    pub fts: String,
    #[serde(rename = "spells_table")]
    pub spells: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            items: "items".to_string(),
            fts: "items_fts".to_string(),
            spells: "spells".to_string(),
        }
    }
}

impl TableNames {
    pub fn validate(&self) -> Result<()> {
        for (key, name) in [
            ("items_table", &self.items),
            ("fts_table", &self.fts),
            ("spells_table", &self.spells),
        ] {
            if !is_identifier(name) {
                return Err(Error::Config(format!(
                    "{} must be a plain SQL identifier, got {:?}",
                    key, name
                )));
            }
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchConfig {
    pub limit: usize,
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl ArmoryConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.database.tables.validate()?;
        if self.search.limit == 0 {
            return Err(Error::Config("search.limit must be at least 1".to_string()));
        }
        Ok(())
    }
}
