use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API server host
    pub host: String,

    /// API server port
    pub port: u16,

    /// Enable CORS
    pub cors_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// JSON formatted logs
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    #[serde(alias = "postgresql", alias = "db")]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory holding connectors.yaml for the file backend
    pub path: String,

    /// Connection string for the postgres backend
    #[serde(default)]
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// YAML file of connector definitions, the built-in catalog when unset
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "localhost".to_string(),
                port: 3000,
                cors_enabled: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json: false,
            },
            storage: StorageConfig {
                backend: StorageBackend::File,
                path: "data".to_string(),
                database_url: None,
            },
            catalog: CatalogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(config_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_dir = config_dir.as_ref();
        let s = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(
                config::File::with_name(&config_dir.join("default.yaml").to_string_lossy())
                    .required(false),
            )
            // Machine-local overrides
            .add_source(
                config::File::with_name(&config_dir.join("local.yaml").to_string_lossy())
                    .required(false),
            )
            // Environment variables (CONNHUB__API__PORT=4000)
            .add_source(
                config::Environment::with_prefix("CONNHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config = s.try_deserialize()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();

        assert_eq!(config.api.port, 3000);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_local_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.yaml"),
            "api:\n  port: 8080\nstorage:\n  backend: memory\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("local.yaml"), "api:\n  port: 9090\n").unwrap();

        let config = AppConfig::load(dir.path()).unwrap();

        assert_eq!(config.api.port, 9090);
        assert_eq!(config.api.host, "localhost");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_postgres_alias() {
        let storage: StorageConfig =
            serde_yaml::from_str("backend: postgresql\npath: data\ndatabase_url: postgres://x\n")
                .unwrap();
        assert_eq!(storage.backend, StorageBackend::Postgres);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = AppConfig::default();
        config.catalog.path = Some("catalog.yaml".to_string());
        config.to_file(&path).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded.catalog.path.as_deref(), Some("catalog.yaml"));
    }
}
