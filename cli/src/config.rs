use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use twostars_session::SessionConfig;

pub const DEFAULT_DATA_DIR: &str = ".twostars";
pub const DEFAULT_CONFIG_FILE: &str = "twostars.toml";

/// Optional settings file, every key may be left out.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub persist_delay_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Reads `path` if given, else the default file if it exists.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub catalog: Option<PathBuf>,
    pub session: SessionConfig,
}

impl Settings {
    /// Command line first, then the config file, then defaults.
    pub fn resolve(data_dir: Option<PathBuf>, catalog: Option<PathBuf>, file: FileConfig) -> Self {
        let mut session = SessionConfig::default();
        if let Some(delay) = file.persist_delay_ms {
            session.persist_delay_ms = delay;
        }
        Self {
            data_dir: data_dir
                .or(file.data_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            catalog: catalog.or(file.catalog),
            session,
        }
    }
}
