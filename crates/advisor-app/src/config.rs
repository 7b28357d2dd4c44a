use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use advisor_api::ApiConfig;
use advisor_types::{Language, UserRole};

use crate::cli::Cli;

const SESSION_FILE: &str = "session.json";
const LOCAL_FILE: &str = "local.json";
const LOGS_DIR: &str = "logs";

/// Resolved runtime configuration for the terminal client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub language: Language,
    pub role: Option<UserRole>,
    pub data_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api = ApiConfig::new(&cli.api_base)
            .with_token(cli.api_token.clone())
            .with_timeout(cli.timeout_secs.map(Duration::from_secs));

        Ok(Self {
            api,
            language: cli.language,
            role: cli.role,
            data_dir: expand_tilde(&cli.data_dir)?,
        })
    }

    /// State scoped to the current consultation (`sessionStorage` equivalent)
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    /// State that outlives consultations (`localStorage` equivalent)
    pub fn local_path(&self) -> PathBuf {
        self.data_dir.join(LOCAL_FILE)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join(LOGS_DIR)
    }
}

/// Expand ~ to home directory
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();
    if let Some(rest) = path_str.strip_prefix("~/") {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        Ok(PathBuf::from(home).join(rest))
    } else if path_str == "~" {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        Ok(PathBuf::from(home))
    } else {
        Ok(path.to_path_buf())
    }
}
