use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use connhub_core::{Connector, ConnectorPatch, ConnectorStore};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

const CONNECTORS_FILE: &str = "connectors.yaml";

/// Connector rows kept in `connectors.yaml` under a storage directory.
///
/// The file holds rows in insertion order; every write is flushed to disk
/// before the call returns.
#[derive(Debug)]
pub struct FileConnectorStore {
    rows: RwLock<Vec<Connector>>,
    storage_dir: PathBuf,
}

impl FileConnectorStore {
    /// Create a new empty store
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            storage_dir: storage_dir.into(),
        }
    }

    /// Load the store from its storage directory, a missing file is an empty store
    pub fn load(storage_dir: impl AsRef<Path>) -> Result<Self> {
        let storage_dir = storage_dir.as_ref();
        let path = storage_dir.join(CONNECTORS_FILE);

        let rows = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let rows: Vec<Connector> = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            rows
        } else {
            Vec::new()
        };

        debug!("Loaded {} connector row(s) from {}", rows.len(), path.display());

        Ok(Self {
            rows: RwLock::new(rows),
            storage_dir: storage_dir.to_path_buf(),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.storage_dir.join(CONNECTORS_FILE)
    }

    async fn save(&self, rows: &[Connector]) -> Result<()> {
        tokio::fs::create_dir_all(&self.storage_dir)
            .await
            .context("Failed to create storage directory")?;

        let yaml = serde_yaml::to_string(rows).context("Failed to serialize connectors")?;
        tokio::fs::write(self.path(), yaml)
            .await
            .context("Failed to write connectors.yaml")?;

        Ok(())
    }
}

#[async_trait]
impl ConnectorStore for FileConnectorStore {
    async fn find_all(&self) -> Result<Vec<Connector>> {
        let rows = self.rows.read().await;
        Ok(crate::in_creation_order(rows.clone()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Connector>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_one(&self, connector: Connector) -> Result<Connector> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.id == connector.id) {
            return Err(anyhow!("Connector '{}' already exists", connector.id));
        }

        let mut updated = rows.clone();
        updated.push(connector.clone());
        self.save(&updated).await?;
        *rows = updated;

        Ok(connector)
    }

    async fn update_one(&self, id: &str, patch: &ConnectorPatch) -> Result<Option<Connector>> {
        let mut rows = self.rows.write().await;
        let Some(index) = rows.iter().position(|r| r.id == id) else {
            return Ok(None);
        };

        let mut updated = rows.clone();
        updated[index].apply(patch);
        let row = updated[index].clone();
        self.save(&updated).await?;
        *rows = updated;

        Ok(Some(row))
    }
}
