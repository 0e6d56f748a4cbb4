//! Configuration for boxoffice
//!
//! Server address, model artifact location, and input validation policy.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default artifact file name, resolved relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "movie_revenue_predictor.json";

/// Default listen address
pub const DEFAULT_ADDR: &str = "127.0.0.1:7860";

/// System-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxofficeConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Model artifact settings
    pub model: ModelConfig,
    /// Request validation settings
    pub validation: ValidationConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, `host:port`
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

/// Model artifact configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the JSON artifact
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

/// Which inputs count as "not filled in"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletenessPolicy {
    /// Absent, empty, and zero values are all missing
    #[default]
    Truthy,
    /// Only absent or empty values are missing; zero is accepted
    Presence,
}

/// Request validation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub completeness: CompletenessPolicy,
}

impl BoxofficeConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    #[cfg(feature = "toml-config")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    #[cfg(feature = "toml-config")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read a TOML file; a `.json` extension is parsed as JSON instead
    #[cfg(feature = "toml-config")]
    pub fn load_file(path: &std::path::Path) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        let parsed = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&text).map_err(|e| e.to_string())
        } else {
            Self::from_toml(&text).map_err(|e| e.to_string())
        };

        let config = parsed.map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Apply `BOXOFFICE_ADDR` and `BOXOFFICE_MODEL` overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var("BOXOFFICE_ADDR").ok(),
            std::env::var("BOXOFFICE_MODEL").ok(),
        );
    }

    /// Replace the address and/or model path when given
    pub fn apply_overrides(&mut self, addr: Option<String>, model: Option<String>) {
        if let Some(addr) = addr {
            self.server.addr = addr;
        }
        if let Some(model) = model {
            self.model.path = PathBuf::from(model);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.addr.trim().is_empty() {
            return Err(ConfigError::MissingField("server.addr".to_string()));
        }

        if let Err(e) = self.server.addr.parse::<SocketAddr>() {
            return Err(ConfigError::InvalidValue {
                field: "server.addr".to_string(),
                message: format!("{:?}: {}", self.server.addr, e),
            });
        }

        if self.model.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("model.path".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoxofficeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.validation.completeness, CompletenessPolicy::Truthy);
        assert_eq!(config.model.path, PathBuf::from("movie_revenue_predictor.json"));
    }

    #[test]
    fn test_json_serialization() {
        let mut config = BoxofficeConfig::default();
        config.validation.completeness = CompletenessPolicy::Presence;
        let json = config.to_json().unwrap();
        let parsed = BoxofficeConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_partial_toml() {
        let config = BoxofficeConfig::from_toml(
            r#"
[model]
path = "/srv/models/revenue.json"

[validation]
completeness = "presence"
"#,
        )
        .unwrap();
        assert_eq!(config.server.addr, DEFAULT_ADDR);
        assert_eq!(config.model.path, PathBuf::from("/srv/models/revenue.json"));
        assert_eq!(config.validation.completeness, CompletenessPolicy::Presence);
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_toml_serialization() {
        let mut config = BoxofficeConfig::default();
        config.server.addr = "0.0.0.0:8080".to_string();
        config.validation.completeness = CompletenessPolicy::Presence;
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("completeness = \"presence\""));
        assert_eq!(BoxofficeConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_unknown_policy_rejected() {
        assert!(BoxofficeConfig::from_toml("[validation]\ncompleteness = \"lenient\"\n").is_err());
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxoffice.toml");
        std::fs::write(&path, "[server]\naddr = \"0.0.0.0:9000\"\n").unwrap();
        let config = BoxofficeConfig::load_file(&path).unwrap();
        assert_eq!(config.server.addr, "0.0.0.0:9000");

        std::fs::write(&path, "[server]\naddr = \"nowhere\"\n").unwrap();
        assert!(matches!(
            BoxofficeConfig::load_file(&path),
            Err(crate::BoxofficeError::Config(ConfigError::InvalidValue { .. }))
        ));

        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            BoxofficeConfig::load_file(&missing),
            Err(crate::BoxofficeError::Config(ConfigError::Io(_)))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = BoxofficeConfig::default();
        config.apply_overrides(Some("0.0.0.0:8000".to_string()), None);
        assert_eq!(config.server.addr, "0.0.0.0:8000");
        assert_eq!(config.model.path, PathBuf::from(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn test_invalid_addr() {
        let mut config = BoxofficeConfig::default();
        config.server.addr = "localhost".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_model_path() {
        let mut config = BoxofficeConfig::default();
        config.model.path = PathBuf::new();
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingField("model.path".to_string()))
        );
    }
}
