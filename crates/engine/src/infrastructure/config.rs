//! Runtime configuration read from the environment.

use std::path::PathBuf;

pub const STORE_PATH_VAR: &str = "CHARSHEET_STORE_PATH";
pub const SPELLS_CSV_VAR: &str = "CHARSHEET_SPELLS_CSV";
pub const EQUIPMENT_CACHE_VAR: &str = "CHARSHEET_EQUIPMENT_CACHE";
pub const SPELL_DETAILS_VAR: &str = "CHARSHEET_SPELL_DETAILS";

const DEFAULT_STORE_PATH: &str = "characters.json";
const DEFAULT_SPELLS_CSV: &str = "5e-SRD-Spells.csv";
const DEFAULT_EQUIPMENT_CACHE: &str = "eq_data.json";
const DEFAULT_SPELL_DETAILS: &str = "spells_data.json";

/// File locations used by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub spells_csv: PathBuf,
    pub equipment_cache: PathBuf,
    pub spell_details: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str, default: &str| -> PathBuf {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
                .into()
        };

        Self {
            store_path: path(STORE_PATH_VAR, DEFAULT_STORE_PATH),
            spells_csv: path(SPELLS_CSV_VAR, DEFAULT_SPELLS_CSV),
            equipment_cache: path(EQUIPMENT_CACHE_VAR, DEFAULT_EQUIPMENT_CACHE),
            spell_details: path(SPELL_DETAILS_VAR, DEFAULT_SPELL_DETAILS),
        }
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_spells_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.spells_csv = path.into();
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::default();
        assert_eq!(config.store_path, PathBuf::from("characters.json"));
        assert_eq!(config.spells_csv, PathBuf::from("5e-SRD-Spells.csv"));
        assert_eq!(config.equipment_cache, PathBuf::from("eq_data.json"));
        assert_eq!(config.spell_details, PathBuf::from("spells_data.json"));
    }

    #[test]
    fn lookup_overrides_defaults() {
        let vars = HashMap::from([
            (STORE_PATH_VAR, "/tmp/party.json"),
            (SPELLS_CSV_VAR, "  "),
        ]);
        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.store_path, PathBuf::from("/tmp/party.json"));
        // Blank values fall back
        assert_eq!(config.spells_csv, PathBuf::from("5e-SRD-Spells.csv"));
    }

    #[test]
    fn flags_override_environment() {
        let config = AppConfig::default()
            .with_store_path("other.json")
            .with_spells_csv("spells.csv");
        assert_eq!(config.store_path, PathBuf::from("other.json"));
        assert_eq!(config.spells_csv, PathBuf::from("spells.csv"));
    }
}
