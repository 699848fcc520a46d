use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";
const DB_FILE: &str = "pocketplan.db";
const LOG_FILE: &str = "pocketplan.log";
const DB_ENV: &str = "POCKETPLAN_DB";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Overrides the database location inside the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) database_path: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `pocketplan=debug`.
    pub(crate) log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            log_filter: "pocketplan=info".into(),
        }
    }
}

impl Config {
    /// Read `config.json` from `dir`. A missing file yields the defaults.
    pub(crate) fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub(crate) fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILE), json)?;
        Ok(())
    }

    /// Database path: `POCKETPLAN_DB`, then the config value, then the data directory.
    pub(crate) fn resolve_db_path(&self, data_dir: &Path) -> PathBuf {
        if let Some(env_path) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(env_path);
        }
        self.database_path
            .clone()
            .unwrap_or_else(|| data_dir.join(DB_FILE))
    }
}

/// Platform config and data directories, created on demand.
pub(crate) struct Dirs {
    pub(crate) config_dir: PathBuf,
    pub(crate) data_dir: PathBuf,
}

impl Dirs {
    pub(crate) fn discover() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "pocketplan", "pocketplan")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self {
            config_dir: proj_dirs.config_dir().to_path_buf(),
            data_dir,
        })
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}
