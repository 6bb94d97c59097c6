mod bootstrap;
mod catalog;
mod connector;
mod error;
mod facade;
mod resolver;
mod store;

#[cfg(test)]
mod testing;

pub use bootstrap::init_connectors;
pub use catalog::ConnectorCatalog;
pub use connector::{
    Connector, ConnectorDefinition, ConnectorInstance, ConnectorPatch, ConnectorPlatform,
    ConnectorType,
};
pub use error::{
    CatalogError, RegistryError, RequestError, Result, ENTITY_NOT_FOUND, STORE_FAILURE,
};
pub use facade::ConnectorRegistry;
pub use resolver::InstanceResolver;
pub use store::ConnectorStore;
