use crate::{FileConnectorStore, MemoryConnectorStore, PgConnectorStore};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use connhub_config::{StorageBackend, StorageConfig};
use connhub_core::{Connector, ConnectorPatch, ConnectorStore};
use tracing::info;

/// Connector storage backed by YAML files, PostgreSQL or memory
pub enum UnifiedConnectorStore {
    File(FileConnectorStore),
    Postgres(PgConnectorStore),
    Memory(MemoryConnectorStore),
}

impl UnifiedConnectorStore {
    /// Create from YAML files
    pub fn from_files(storage_dir: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::File(FileConnectorStore::load(storage_dir)?))
    }

    /// Create from PostgreSQL, creating the table when missing
    pub async fn from_postgres(database_url: &str) -> Result<Self> {
        let store = PgConnectorStore::new(database_url).await?;
        store.ensure_schema().await?;
        Ok(Self::Postgres(store))
    }

    pub fn in_memory() -> Self {
        Self::Memory(MemoryConnectorStore::new())
    }

    pub async fn from_config(config: &StorageConfig) -> Result<Self> {
        match config.backend {
            StorageBackend::File => {
                info!("Using file-based connector storage from: {}", config.path);
                Self::from_files(&config.path)
            }
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow!("storage.database_url is required for postgres"))?;
                info!("Using PostgreSQL connector storage");
                Self::from_postgres(url).await
            }
            StorageBackend::Memory => {
                info!("Using in-memory connector storage");
                Ok(Self::in_memory())
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

#[async_trait]
impl ConnectorStore for UnifiedConnectorStore {
    async fn find_all(&self) -> Result<Vec<Connector>> {
        match self {
            Self::File(store) => store.find_all().await,
            Self::Postgres(store) => store.find_all().await,
            Self::Memory(store) => store.find_all().await,
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Connector>> {
        match self {
            Self::File(store) => store.find_by_id(id).await,
            Self::Postgres(store) => store.find_by_id(id).await,
            Self::Memory(store) => store.find_by_id(id).await,
        }
    }

    async fn insert_one(&self, connector: Connector) -> Result<Connector> {
        match self {
            Self::File(store) => store.insert_one(connector).await,
            Self::Postgres(store) => store.insert_one(connector).await,
            Self::Memory(store) => store.insert_one(connector).await,
        }
    }

    async fn update_one(&self, id: &str, patch: &ConnectorPatch) -> Result<Option<Connector>> {
        match self {
            Self::File(store) => store.update_one(id, patch).await,
            Self::Postgres(store) => store.update_one(id, patch).await,
            Self::Memory(store) => store.update_one(id, patch).await,
        }
    }
}
