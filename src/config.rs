//! Configuration file handling for MoneyPath.
//!
//! The configuration file is stored at `$MONEYPATH_HOME/config.json` and holds the location of
//! the finance data file and backup settings.

use crate::backup::Backup;
use crate::storage::FileStorage;
use crate::{utils, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "moneypath";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const DATA_JSON: &str = "finance_data.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$MONEYPATH_HOME` and from there it loads `$MONEYPATH_HOME/config.json`. It
/// provides paths to other items that are either configurable or are expected in a certain
/// location within the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// This will
    /// - create `home` and its backups directory if they do not exist
    /// - load `config.json`, writing one with default settings if there is none
    /// - return the loaded configuration object
    ///
    /// # Errors
    /// - Returns an error if the directories cannot be created or the config file is invalid.
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        utils::make_dir(&maybe_relative).context("Unable to create the moneypath home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups)?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path)?
        } else {
            debug!("Creating default config at {}", config_path.display());
            let config_file = ConfigFile::default();
            config_file.save(&config_path)?;
            config_file
        };

        Ok(Self {
            root,
            backups,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// Returns the stored `data_file` if it is absolute, otherwise resolves it against the home
    /// directory.
    pub fn data_path(&self) -> PathBuf {
        let p = self.config_file.data_file();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// The storage for the finance document.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.data_path())
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "moneypath",
///   "config_version": 1,
///   "backup_copies": 5,
///   "data_file": "finance_data.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "moneypath"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Number of backup copies to keep
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,

    /// Path to the finance data file (optional, relative to the home directory or absolute)
    /// Defaults to $MONEYPATH_HOME/finance_data.json if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    data_file: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backup_copies: BACKUP_COPIES,
            data_file: None,
        }
    }
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path)?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data).context("Unable to write config file")
    }

    fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_JSON))
    }
}
