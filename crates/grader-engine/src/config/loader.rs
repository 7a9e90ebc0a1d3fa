use super::schema::GraderConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./grader.yaml
    /// 2. ~/.grader/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<GraderConfig, ConfigError> {
        let local_config = PathBuf::from("./grader.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".grader").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        debug!("no config file found, using defaults");
        Ok(GraderConfig::default())
    }

    pub async fn load_from(path: &Path) -> Result<GraderConfig, ConfigError> {
        debug!(path = %path.display(), "loading config");
        let content = tokio::fs::read_to_string(path).await?;
        let config: GraderConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
