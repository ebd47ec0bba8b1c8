//! Configuration management for the family tree CLI

use crate::reports::ReportFormat;
use crate::types::{demo_queries, CousinQuery};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_FORMAT: &str = "text";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub tree: TreeSettings,
    pub report: ReportSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSettings {
    /// Tree description file; the built-in sample tree when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub format: String,
    /// Pairs classified by the `demo` command
    pub queries: Vec<CousinQuery>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

/// Settings given outside the configuration file; `None` leaves the file value alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub tree_path: Option<PathBuf>,
    pub format: Option<String>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            tree_path: lookup("FAMILY_TREE_PATH").map(PathBuf::from),
            format: lookup("FAMILY_TREE_FORMAT"),
            log_level: lookup("FAMILY_TREE_LOG_LEVEL"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tree: TreeSettings { path: None },
            report: ReportSettings {
                format: DEFAULT_FORMAT.to_string(),
                queries: demo_queries(),
            },
            logging: LoggingSettings {
                level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Read overrides from `FAMILY_TREE_PATH`, `FAMILY_TREE_FORMAT` and `FAMILY_TREE_LOG_LEVEL`
    pub fn load_from_env() -> ConfigOverrides {
        ConfigOverrides::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply every override that was set, whatever its value
    pub fn merge_with(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.tree_path {
            self.tree.path = Some(path);
        }

        if let Some(format) = overrides.format {
            self.report.format = format;
        }

        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.report.format.parse::<ReportFormat>()?;

        if self.report.queries.is_empty() {
            return Err(anyhow::anyhow!("At least one cousin query is required"));
        }

        if let Some(query) = self
            .report
            .queries
            .iter()
            .find(|query| query.a.is_empty() || query.b.is_empty())
        {
            return Err(anyhow::anyhow!(
                "Cousin query has an empty member name: ({:?}, {:?})",
                query.a,
                query.b
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(anyhow::anyhow!("Log level must not be empty"));
        }

        Ok(())
    }
}
