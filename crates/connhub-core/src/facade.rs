use crate::{
    bootstrap, ConnectorCatalog, ConnectorInstance, ConnectorPatch, ConnectorStore,
    InstanceResolver, RequestError,
};
use std::sync::Arc;

/// Entry point for request handlers.
///
/// Forwards to the bootstrapper and resolver and turns their failures into
/// [`RequestError`]. `init_connectors` is expected to have run before any
/// lookup; lookups never trigger it.
#[derive(Clone)]
pub struct ConnectorRegistry {
    resolver: InstanceResolver,
}

impl ConnectorRegistry {
    pub fn new(catalog: Arc<ConnectorCatalog>, store: Arc<dyn ConnectorStore>) -> Self {
        Self {
            resolver: InstanceResolver::new(catalog, store),
        }
    }

    pub fn catalog(&self) -> &ConnectorCatalog {
        self.resolver.catalog()
    }

    /// Seed missing rows, returning how many were inserted
    pub async fn init_connectors(&self) -> Result<usize, RequestError> {
        let store = self.resolver.store().as_ref();
        Ok(bootstrap::init_connectors(self.resolver.catalog(), store).await?)
    }

    pub async fn get_connector_instances(&self) -> Result<Vec<ConnectorInstance>, RequestError> {
        Ok(self.resolver.get_connector_instances().await?)
    }

    pub async fn get_connector_instance_by_id(
        &self,
        id: &str,
    ) -> Result<ConnectorInstance, RequestError> {
        Ok(self.resolver.get_connector_instance_by_id(id).await?)
    }

    pub async fn get_social_connector_instance_by_id(
        &self,
        id: &str,
    ) -> Result<ConnectorInstance, RequestError> {
        Ok(self.resolver.get_social_connector_instance_by_id(id).await?)
    }

    pub async fn get_enabled_social_connector_ids(&self) -> Result<Vec<String>, RequestError> {
        Ok(self.resolver.get_enabled_social_connector_ids().await?)
    }

    pub async fn update_connector(
        &self,
        id: &str,
        patch: &ConnectorPatch,
    ) -> Result<ConnectorInstance, RequestError> {
        Ok(self.resolver.update_connector(id, patch).await?)
    }
}
