use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Capability category of a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorType {
    Social,
    Sms,
    Email,
}

impl ConnectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Social => "social",
            Self::Sms => "sms",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client platform a social connector targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorPlatform {
    Web,
    Native,
    Universal,
}

impl ConnectorPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Native => "native",
            Self::Universal => "universal",
        }
    }

    /// Infer the platform from the `-web` / `-native` / `-universal` id suffix
    pub fn from_connector_id(id: &str) -> Option<Self> {
        let (_, suffix) = id.rsplit_once('-')?;
        match suffix {
            "web" => Some(Self::Web),
            "native" => Some(Self::Native),
            "universal" => Some(Self::Universal),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectorPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata for a connector known to this build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorDefinition {
    /// Globally unique connector id (e.g., "github-universal")
    pub id: String,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub logo: Option<String>,

    #[serde(rename = "type")]
    pub connector_type: ConnectorType,

    /// Only social connectors target a platform
    #[serde(default)]
    pub platform: Option<ConnectorPlatform>,

    /// Value of `enabled` for the row seeded at bootstrap
    #[serde(default)]
    pub enabled_by_default: bool,
}

impl ConnectorDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        connector_type: ConnectorType,
        platform: Option<ConnectorPlatform>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            logo: None,
            connector_type,
            platform,
            enabled_by_default: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_social(&self) -> bool {
        self.connector_type == ConnectorType::Social
    }
}

/// Persisted per-connector state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: String,

    pub enabled: bool,

    /// Connector-specific settings, opaque to the registry
    #[serde(default = "empty_config")]
    pub config: Value,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn empty_config() -> Value {
    Value::Object(Map::new())
}

impl Connector {
    pub fn new(id: impl Into<String>, enabled: bool) -> Self {
        Self {
            id: id.into(),
            enabled,
            config: empty_config(),
            created_at: Utc::now(),
        }
    }

    /// Default row seeded for a catalog entry
    pub fn from_definition(definition: &ConnectorDefinition) -> Self {
        Self::new(definition.id.clone(), definition.enabled_by_default)
    }

    pub fn apply(&mut self, patch: &ConnectorPatch) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(config) = &patch.config {
            self.config = config.clone();
        }
    }
}

/// Partial update of a stored row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorPatch {
    #[serde(default)]
    pub enabled: Option<bool>,

    #[serde(default)]
    pub config: Option<Value>,
}

impl ConnectorPatch {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            config: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.config.is_none()
    }
}

/// A stored row merged with its catalog definition.
///
/// Built fresh for every query and never cached, so it always reflects the
/// store as of the call that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorInstance {
    pub connector: Connector,
    pub definition: ConnectorDefinition,
}

impl ConnectorInstance {
    pub fn merge(connector: Connector, definition: ConnectorDefinition) -> Self {
        Self {
            connector,
            definition,
        }
    }

    pub fn id(&self) -> &str {
        &self.connector.id
    }

    pub fn is_social(&self) -> bool {
        self.definition.is_social()
    }

    pub fn is_enabled(&self) -> bool {
        self.connector.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_platform_from_connector_id() {
        assert_eq!(
            ConnectorPlatform::from_connector_id("alipay-web"),
            Some(ConnectorPlatform::Web)
        );
        assert_eq!(
            ConnectorPlatform::from_connector_id("wechat-native"),
            Some(ConnectorPlatform::Native)
        );
        assert_eq!(
            ConnectorPlatform::from_connector_id("github-universal"),
            Some(ConnectorPlatform::Universal)
        );
        assert_eq!(ConnectorPlatform::from_connector_id("sendgrid-email-service"), None);
        assert_eq!(ConnectorPlatform::from_connector_id("invalid_id"), None);
    }

    #[test]
    fn test_row_deserialization_defaults() {
        let row: Connector = serde_json::from_value(json!({
            "id": "github-universal",
            "enabled": true
        }))
        .expect("Failed to deserialize");

        assert_eq!(row.config, json!({}));
        assert!(row.created_at.timestamp() > 0);
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut row = Connector::new("google-universal", false);
        row.config = json!({"clientId": "old"});

        row.apply(&ConnectorPatch::enabled(true));
        assert!(row.enabled);
        assert_eq!(row.config, json!({"clientId": "old"}));

        row.apply(&ConnectorPatch {
            enabled: None,
            config: Some(json!({"clientId": "new"})),
        });
        assert!(row.enabled);
        assert_eq!(row.config, json!({"clientId": "new"}));
    }

    #[test]
    fn test_definition_yaml_uses_type_key() {
        let yaml = "id: github-universal\nname: GitHub\ntype: social\nplatform: universal\n";
        let def: ConnectorDefinition = serde_yaml::from_str(yaml).expect("Failed to parse");
        assert!(def.is_social());
        assert_eq!(def.platform, Some(ConnectorPlatform::Universal));
        assert!(!def.enabled_by_default);
    }
}
