use crate::{Connector, ConnectorCatalog, ConnectorStore, Result};
use std::collections::HashSet;
use tracing::{debug, info};

/// Seed a default row for every catalog entry missing from the store.
///
/// Inserts run one at a time in catalog order and the first failure aborts
/// the run. Returns the number of rows inserted, zero once the store is
/// complete.
pub async fn init_connectors(
    catalog: &ConnectorCatalog,
    store: &dyn ConnectorStore,
) -> Result<usize> {
    let rows = store.find_all().await?;
    let existing: HashSet<&str> = rows.iter().map(|r| r.id.as_str()).collect();

    let missing: Vec<_> = catalog
        .list()
        .iter()
        .filter(|d| !existing.contains(d.id.as_str()))
        .collect();

    if missing.is_empty() {
        debug!("All {} catalog connectors present in store", catalog.len());
        return Ok(0);
    }

    for definition in &missing {
        store.insert_one(Connector::from_definition(definition)).await?;
        info!("Inserted default row for connector '{}'", definition.id);
    }

    Ok(missing.len())
}
