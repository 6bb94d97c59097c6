use crate::ConnectorPlatform;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Failures raised while resolving connector instances
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The store has no row for the requested id
    #[error("Connector '{id}' not found in store")]
    RowNotFound { id: String },

    /// A row was found but the catalog has no definition for it
    #[error("Connector definition not found for '{target}'")]
    DefinitionNotFound {
        target: String,
        platform: Option<ConnectorPlatform>,
    },

    /// A listed row has no catalog definition
    #[error("Connector '{id}' has no catalog definition")]
    UnknownConnector { id: String },

    /// A catalog connector has no stored row
    #[error("Connector '{id}' not found in store")]
    MissingRow { id: String },

    #[error("Connector '{id}' is not a social connector")]
    NotSocial { id: String },

    #[error("Store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

/// Failures raised while building a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate connector id '{0}' in catalog")]
    DuplicateId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub const ENTITY_NOT_FOUND: &str = "entity.not_found";
pub const STORE_FAILURE: &str = "store.failure";

/// Error shape handed to request handlers.
///
/// Carries enough structure for a transport layer to build its response
/// without inspecting the underlying error.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{code}: {message}")]
pub struct RequestError {
    pub code: String,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<ConnectorPlatform>,
}

impl RequestError {
    pub fn new(code: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            status,
            message: message.into(),
            id: None,
            target: None,
            platform: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_platform(mut self, platform: Option<ConnectorPlatform>) -> Self {
        self.platform = platform;
        self
    }
}

impl From<RegistryError> for RequestError {
    fn from(err: RegistryError) -> Self {
        let message = err.to_string();
        match err {
            RegistryError::RowNotFound { id }
            | RegistryError::UnknownConnector { id }
            | RegistryError::MissingRow { id }
            | RegistryError::NotSocial { id } => {
                RequestError::new(ENTITY_NOT_FOUND, 404, message).with_id(id)
            }
            RegistryError::DefinitionNotFound { target, platform } => {
                RequestError::new(ENTITY_NOT_FOUND, 404, message)
                    .with_target(target)
                    .with_platform(platform)
            }
            RegistryError::Store(_) => RequestError::new(STORE_FAILURE, 500, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_not_found_carries_id() {
        let err = RequestError::from(RegistryError::RowNotFound {
            id: "invalid_id".to_string(),
        });
        assert_eq!(err.code, ENTITY_NOT_FOUND);
        assert_eq!(err.status, 404);
        assert_eq!(err.id.as_deref(), Some("invalid_id"));
        assert!(err.target.is_none());
    }

    #[test]
    fn test_missing_row_carries_id() {
        let err = RequestError::from(RegistryError::MissingRow {
            id: "alipay-web".to_string(),
        });
        assert_eq!(err.code, ENTITY_NOT_FOUND);
        assert_eq!(err.status, 404);
        assert_eq!(err.id.as_deref(), Some("alipay-web"));
    }

    #[test]
    fn test_definition_not_found_carries_target_and_platform() {
        let err = RequestError::from(RegistryError::DefinitionNotFound {
            target: "unknown-web".to_string(),
            platform: Some(ConnectorPlatform::Web),
        });
        assert_eq!(err.status, 404);
        assert!(err.id.is_none());

        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(body["target"], json!("unknown-web"));
        assert_eq!(body["platform"], json!("web"));
        assert!(body.get("id").is_none());
    }

    #[test]
    fn test_store_failure_keeps_error_chain() {
        let source = anyhow::anyhow!("connection refused").context("Failed to list connectors");
        let err = RequestError::from(RegistryError::Store(source));
        assert_eq!(err.code, STORE_FAILURE);
        assert_eq!(err.status, 500);
        assert!(err.message.contains("Failed to list connectors"));
        assert!(err.message.contains("connection refused"));
    }
}
