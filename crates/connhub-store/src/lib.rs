mod file_store;
mod memory_store;
mod pg_store;
mod unified_store;

pub use file_store::FileConnectorStore;
pub use memory_store::MemoryConnectorStore;
pub use pg_store::PgConnectorStore;
pub use unified_store::UnifiedConnectorStore;

// Re-export for convenience
pub use connhub_core::ConnectorStore;

use connhub_core::Connector;

/// Order rows by creation time. The sort is stable, so rows sharing a
/// timestamp keep their insertion order.
pub(crate) fn in_creation_order(mut rows: Vec<Connector>) -> Vec<Connector> {
    rows.sort_by_key(|r| r.created_at);
    rows
}
