//! Configuration for the spam prediction service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dataset::DEFAULT_TEST_RATIO;
use crate::error::{Result, SpamError};

/// Main service configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Training data location
    #[serde(default)]
    pub data: DataConfig,
    /// Model training options
    #[serde(default)]
    pub model: ModelConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Two-column `category,message` CSV, first row is dropped
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Share of the corpus held out from training
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,
    /// Seed for the train/test shuffle; unseeded when absent
    pub seed: Option<u64>,
    /// MessagePack snapshot of the trained model; training always runs when absent
    pub snapshot_path: Option<PathBuf>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8091
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/standardSpamData.csv")
}

fn default_test_ratio() -> f64 {
    DEFAULT_TEST_RATIO
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            test_ratio: default_test_ratio(),
            seed: None,
            snapshot_path: None,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpamError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SpamError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(SpamError::Config("port must be non-zero".to_string()));
        }

        if !(0.0..1.0).contains(&self.model.test_ratio) {
            return Err(SpamError::InvalidTestRatio(self.model.test_ratio));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.bind_addr(), "localhost:8091");
        assert_eq!(config.data.path, PathBuf::from("data/standardSpamData.csv"));
        assert_eq!(config.model.test_ratio, 0.25);
        assert!(config.model.seed.is_none());
        assert!(config.model.snapshot_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
port = 9000

[model]
seed = 42
snapshot_path = "model.msgpack"
"#;
        let config: ServiceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.model.seed, Some(42));
        assert_eq!(config.model.test_ratio, 0.25);
        assert_eq!(
            config.model.snapshot_path,
            Some(PathBuf::from("model.msgpack"))
        );
    }

    #[test]
    fn test_validate_rejects_bad_ratio() {
        let mut config = ServiceConfig::default();
        config.model.test_ratio = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = ServiceConfig::from_file(Path::new("no/such/config.toml")).unwrap_err();
        assert!(matches!(err, SpamError::Config(_)));
    }
}
