//! # POS Configuration
//!
//! Settings read once at startup and never mutated afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     COMANDA_STORE_NAME, COMANDA_DATA_DIR,                              │
//! │     COMANDA_TABLE_COUNT, COMANDA_PAPER_WIDTH                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/comanda-pos/comanda.toml (Linux)                         │
//! │     ~/Library/Application Support/com.comanda.pos/comanda.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     "Dube Burger", 6 tables, 80mm paper                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # comanda.toml
//! store_name = "Dube Burger"
//! default_table_count = 8
//! data_dir = "/var/lib/comanda"
//! paper_width = 32  # 32 = 58mm, 48 = 80mm
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use comanda_core::validation::validate_table_count;
use comanda_core::DEFAULT_TABLE_COUNT;

use crate::error::{PosError, PosResult};

/// Characters per line on 58mm thermal paper.
pub const PAPER_WIDTH_58MM: usize = 32;

/// Characters per line on 80mm thermal paper.
pub const PAPER_WIDTH_80MM: usize = 48;

const CONFIG_FILE_NAME: &str = "comanda.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosConfig {
    /// Printed at the top of tickets and receipts.
    pub store_name: String,

    /// Number of tables created when nothing is saved yet.
    pub default_table_count: u32,

    /// Where the store blobs live. `None` uses the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Printer line width in characters.
    pub paper_width: usize,
}

impl Default for PosConfig {
    fn default() -> Self {
        PosConfig {
            store_name: "Dube Burger".to_string(),
            default_table_count: DEFAULT_TABLE_COUNT,
            data_dir: None,
            paper_width: PAPER_WIDTH_80MM,
        }
    }
}

impl PosConfig {
    /// Loads configuration.
    ///
    /// ## Load Order
    /// 1. Defaults
    /// 2. Config file (`config_path`, or `comanda.toml` in the platform dir)
    /// 3. Environment variable overrides
    pub fn load(config_path: Option<PathBuf>) -> PosResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Like [`PosConfig::load`], but falls back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> PosResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> PosResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(PosError::InvalidConfig("store_name must not be empty".into()));
        }

        validate_table_count(self.default_table_count)
            .map_err(|e| PosError::InvalidConfig(e.to_string()))?;

        if self.paper_width != PAPER_WIDTH_58MM && self.paper_width != PAPER_WIDTH_80MM {
            return Err(PosError::InvalidConfig(format!(
                "paper_width must be {} or {}, got: {}",
                PAPER_WIDTH_58MM, PAPER_WIDTH_80MM, self.paper_width
            )));
        }

        Ok(())
    }

    /// Applies `COMANDA_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source. Unparseable numbers are
    /// logged and ignored.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("COMANDA_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(dir) = var("COMANDA_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(count) = var("COMANDA_TABLE_COUNT") {
            match count.parse::<u32>() {
                Ok(n) => self.default_table_count = n,
                Err(_) => warn!(value = %count, "Ignoring invalid COMANDA_TABLE_COUNT"),
            }
        }

        if let Some(width) = var("COMANDA_PAPER_WIDTH") {
            match width.parse::<usize>() {
                Ok(w) => self.paper_width = w,
                Err(_) => warn!(value = %width, "Ignoring invalid COMANDA_PAPER_WIDTH"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Directory for the store blobs.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.comanda.pos/`
    /// - **Windows**: `%APPDATA%\comanda\pos\data\`
    /// - **Linux**: `~/.local/share/comanda-pos/`
    pub fn data_dir(&self) -> PosResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(PosError::NoDataDir)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "comanda", "pos")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = PosConfig::default();
        assert_eq!(config.store_name, "Dube Burger");
        assert_eq!(config.default_table_count, 6);
        assert_eq!(config.paper_width, 48);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = PosConfig::default();

        config.default_table_count = 0;
        assert!(config.validate().is_err());

        config.default_table_count = 10;
        config.paper_width = 40;
        assert!(config.validate().is_err());

        config.paper_width = 32;
        assert!(config.validate().is_ok());

        config.store_name = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = PosConfig::default();
        config.apply_overrides(vars(&[
            ("COMANDA_STORE_NAME", "Dube Centro"),
            ("COMANDA_DATA_DIR", "/tmp/comanda"),
            ("COMANDA_TABLE_COUNT", "12"),
            ("COMANDA_PAPER_WIDTH", "32"),
        ]));

        assert_eq!(config.store_name, "Dube Centro");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/comanda")));
        assert_eq!(config.default_table_count, 12);
        assert_eq!(config.paper_width, 32);
    }

    #[test]
    fn test_invalid_numeric_overrides_are_ignored() {
        let mut config = PosConfig::default();
        config.apply_overrides(vars(&[
            ("COMANDA_TABLE_COUNT", "many"),
            ("COMANDA_PAPER_WIDTH", "-1"),
        ]));
        assert_eq!(config, PosConfig::default());
    }

    #[test]
    fn test_load_from_file_with_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comanda.toml");
        std::fs::write(&path, "default_table_count = 9\npaper_width = 32\n").unwrap();

        let config = PosConfig::from_file(&path).unwrap();
        assert_eq!(config.default_table_count, 9);
        assert_eq!(config.paper_width, 32);
        assert_eq!(config.store_name, "Dube Burger");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comanda.toml");
        std::fs::write(&path, "paper_width = \"wide\"").unwrap();

        assert!(matches!(
            PosConfig::from_file(&path),
            Err(PosError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = PosConfig {
            data_dir: Some(PathBuf::from("/srv/comanda")),
            ..PosConfig::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/srv/comanda"));
    }
}
