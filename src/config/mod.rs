//! Run configuration loaded from YAML

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scheduler::RunnerSettings;

fn default_name() -> String {
    "stepworld".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub runner: RunnerSettings,
    /// Entities seeded into the world before the step.
    #[serde(default)]
    pub entities: Vec<EntitySeed>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            logging: LoggingConfig::default(),
            runner: RunnerSettings::default(),
            entities: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySeed {
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: f64,
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<RunConfig> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        RunConfig::from_yaml(&data).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

impl RunConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = RunConfig::from_yaml("name: market").unwrap();

        assert_eq!(config.name, "market");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.runner.slow_system_warn_ms, None);
        assert!(config.entities.is_empty());
    }

    #[test]
    fn test_loader_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("run.yaml"),
            "logging:\n  level: debug\nrunner:\n  slow_system_warn_ms: 50\nentities:\n  - price: 2.5\n    quantity: 4\n  - {}\n",
        )
        .unwrap();

        let config = ConfigLoader::new(dir.path()).load("run.yaml").unwrap();

        assert_eq!(config.name, "stepworld");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.runner.slow_system_warn_ms, Some(50));
        assert_eq!(
            config.entities,
            vec![
                EntitySeed {
                    price: 2.5,
                    quantity: 4.0
                },
                EntitySeed::default(),
            ]
        );
    }

    #[test]
    fn test_loader_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::new(dir.path()).load("absent.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
