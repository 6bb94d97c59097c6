use crate::{
    ConnectorCatalog, ConnectorInstance, ConnectorPatch, ConnectorPlatform, ConnectorStore,
    RegistryError, Result,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Merges stored rows with catalog definitions on every call
#[derive(Clone)]
pub struct InstanceResolver {
    catalog: Arc<ConnectorCatalog>,
    store: Arc<dyn ConnectorStore>,
}

impl InstanceResolver {
    pub fn new(catalog: Arc<ConnectorCatalog>, store: Arc<dyn ConnectorStore>) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &ConnectorCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<dyn ConnectorStore> {
        &self.store
    }

    /// Every stored row as an instance, in store order.
    ///
    /// Fails when a row has no definition or a catalog connector has no row.
    pub async fn get_connector_instances(&self) -> Result<Vec<ConnectorInstance>> {
        let rows = self.store.find_all().await?;

        let instances = rows
            .into_iter()
            .map(|row| match self.catalog.find(&row.id) {
                Some(definition) => Ok(ConnectorInstance::merge(row, definition.clone())),
                None => Err(RegistryError::UnknownConnector { id: row.id }),
            })
            .collect::<Result<Vec<_>>>()?;

        let stored: HashSet<&str> = instances.iter().map(|i| i.id()).collect();
        let missing = self
            .catalog
            .list()
            .iter()
            .find(|d| !stored.contains(d.id.as_str()));
        if let Some(missing) = missing {
            return Err(RegistryError::MissingRow {
                id: missing.id.clone(),
            });
        }

        Ok(instances)
    }

    pub async fn get_connector_instance_by_id(&self, id: &str) -> Result<ConnectorInstance> {
        let row = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| RegistryError::RowNotFound { id: id.to_string() })?;

        let definition = self.catalog.find(&row.id).ok_or_else(|| {
            RegistryError::DefinitionNotFound {
                target: row.id.clone(),
                platform: ConnectorPlatform::from_connector_id(&row.id),
            }
        })?;

        debug!("Resolved connector '{}'", id);
        Ok(ConnectorInstance::merge(row, definition.clone()))
    }

    pub async fn get_social_connector_instance_by_id(&self, id: &str) -> Result<ConnectorInstance> {
        let instance = self.get_connector_instance_by_id(id).await?;

        if !instance.is_social() {
            return Err(RegistryError::NotSocial { id: id.to_string() });
        }

        Ok(instance)
    }

    /// Ids of enabled social connectors, in store order
    pub async fn get_enabled_social_connector_ids(&self) -> Result<Vec<String>> {
        let instances = self.get_connector_instances().await?;

        Ok(instances
            .into_iter()
            .filter(|i| i.is_social() && i.is_enabled())
            .map(|i| i.connector.id)
            .collect())
    }

    /// Patch a known connector's row and return the refreshed instance
    pub async fn update_connector(
        &self,
        id: &str,
        patch: &ConnectorPatch,
    ) -> Result<ConnectorInstance> {
        let current = self.get_connector_instance_by_id(id).await?;

        let row = self
            .store
            .update_one(id, patch)
            .await?
            .ok_or_else(|| RegistryError::RowNotFound { id: id.to_string() })?;

        Ok(ConnectorInstance::merge(row, current.definition))
    }
}
