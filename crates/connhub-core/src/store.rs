use crate::{Connector, ConnectorPatch};
use anyhow::Result;
use async_trait::async_trait;

/// Persistence for connector rows.
///
/// Implementations must enforce id uniqueness on insert and return rows from
/// `find_all` ordered by `created_at`, ties broken by insertion sequence.
#[async_trait]
pub trait ConnectorStore: Send + Sync {
    /// List every stored row
    async fn find_all(&self) -> Result<Vec<Connector>>;

    /// Fetch one row, `None` when no row exists for `id`
    async fn find_by_id(&self, id: &str) -> Result<Option<Connector>>;

    /// Insert a row, failing if its id already exists
    async fn insert_one(&self, connector: Connector) -> Result<Connector>;

    /// Apply a patch, `None` when no row exists for `id`
    async fn update_one(&self, id: &str, patch: &ConnectorPatch) -> Result<Option<Connector>>;
}
