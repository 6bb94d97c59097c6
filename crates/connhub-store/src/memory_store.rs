use anyhow::{anyhow, Result};
use async_trait::async_trait;
use connhub_core::{Connector, ConnectorPatch, ConnectorStore};
use tokio::sync::RwLock;

/// In-memory connector rows, lost on restart
#[derive(Debug, Default)]
pub struct MemoryConnectorStore {
    rows: RwLock<Vec<Connector>>,
}

impl MemoryConnectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with rows, kept in the given insertion order
    pub fn with_rows(rows: Vec<Connector>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl ConnectorStore for MemoryConnectorStore {
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
        rows.push(connector.clone());
        Ok(connector)
    }

    async fn update_one(&self, id: &str, patch: &ConnectorPatch) -> Result<Option<Connector>> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|r| r.id == id).map(|row| {
            row.apply(patch);
            row.clone()
        }))
    }
}
