//! Configuration management for tidemark.
//!
//! Default config location: ./tidemark.toml

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use tidemark_storage::{PartitionLister, S3Config, S3Lister};

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub cors: CorsConfig,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3090".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors: CorsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Enable CORS (default: true for development)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Allowed origins. Use "*" for any origin, or list specific origins.
    #[serde(default = "default_cors_origins")]
    pub origins: Vec<String>,
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origins: default_cors_origins(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub s3: S3Settings,
}

/// S3 connection settings from the config file.
///
/// Buckets are named per query, so only connection-level settings live here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Settings {
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for MinIO or other S3-compatible services
    pub endpoint: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
    #[serde(default)]
    pub allow_http: bool,
    /// Static credentials; when absent the default provider chain applies
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            force_path_style: false,
            allow_http: false,
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

impl S3Settings {
    /// Build the storage-crate config.
    ///
    /// Static credentials are applied only when both halves are present,
    /// mirroring the access-key authentication provider: anything else falls
    /// back to the ambient chain.
    pub fn to_s3_config(&self) -> S3Config {
        let mut config = S3Config::aws(&self.region);
        config.endpoint = self.endpoint.clone();
        config.force_path_style = self.force_path_style;
        config.allow_http = self.allow_http;

        if let (Some(key_id), Some(secret)) = (&self.access_key_id, &self.secret_access_key) {
            config = config.with_credentials(key_id, secret);
        }

        config
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    /// Load config from file path, or create default
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = config_path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = config.save(config_path);
            Ok(config)
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Create the listing backend described by this config.
    ///
    /// The handle is built once at startup and shared read-only across all
    /// queries for the lifetime of the process.
    pub fn create_lister(&self) -> Arc<dyn PartitionLister> {
        Arc::new(S3Lister::new(self.storage.s3.to_s3_config()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:3090");
        assert!(config.server.cors.enabled);
        assert_eq!(config.storage.s3.region, "us-east-1");
        assert!(config.storage.s3.access_key_id.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.server.bind_addr, config.server.bind_addr);
        assert_eq!(parsed.storage.s3.region, config.storage.s3.region);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [storage.s3]
            region = "eu-west-1"
            endpoint = "http://localhost:9000"
            force_path_style = true
            "#,
        )
        .unwrap();

        assert_eq!(parsed.storage.s3.region, "eu-west-1");
        assert!(parsed.storage.s3.force_path_style);
        assert_eq!(parsed.server.bind_addr, "127.0.0.1:3090");
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_to_s3_config_credentials_require_both_halves() {
        let mut settings = S3Settings {
            access_key_id: Some("key".to_string()),
            ..Default::default()
        };
        assert!(settings.to_s3_config().access_key_id.is_none());

        settings.secret_access_key = Some("secret".to_string());
        let s3 = settings.to_s3_config();
        assert_eq!(s3.access_key_id, Some("key".to_string()));
        assert_eq!(s3.secret_access_key, Some("secret".to_string()));
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tidemark.toml");

        let config = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.bind_addr, "127.0.0.1:3090");

        // Second load reads the file written by the first.
        let reloaded = Config::load_or_create(&path).unwrap();
        assert_eq!(reloaded.server.bind_addr, config.server.bind_addr);
    }
}
