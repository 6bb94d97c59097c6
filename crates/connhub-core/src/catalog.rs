use crate::{CatalogError, ConnectorDefinition, ConnectorPlatform, ConnectorType};
use std::collections::HashSet;
use std::path::Path;

/// Immutable table of the connector definitions known to this build
#[derive(Debug, Clone)]
pub struct ConnectorCatalog {
    definitions: Vec<ConnectorDefinition>,
}

impl ConnectorCatalog {
    /// Build a catalog, rejecting duplicate ids. Declaration order is kept.
    pub fn from_definitions(
        definitions: Vec<ConnectorDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for definition in &definitions {
            if !seen.insert(definition.id.as_str()) {
                return Err(CatalogError::DuplicateId(definition.id.clone()));
            }
        }

        Ok(Self { definitions })
    }

    /// Load a YAML list of definitions
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let definitions: Vec<ConnectorDefinition> = serde_yaml::from_str(&content)?;
        Self::from_definitions(definitions)
    }

    /// The connectors compiled into this build
    pub fn builtin() -> Self {
        use ConnectorPlatform::{Native, Universal, Web};
        use ConnectorType::{Email, Sms, Social};

        Self {
            definitions: vec![
                ConnectorDefinition::new("alipay-web", "Alipay", Social, Some(Web))
                    .with_description("Sign in with Alipay on the web"),
                ConnectorDefinition::new("alipay-native", "Alipay", Social, Some(Native))
                    .with_description("Sign in with the Alipay app"),
                ConnectorDefinition::new("aliyun-direct-mail", "Aliyun Direct Mail", Email, None)
                    .with_description("Send passcode emails through Aliyun Direct Mail"),
                ConnectorDefinition::new(
                    "aliyun-short-message-service",
                    "Aliyun Short Message Service",
                    Sms,
                    None,
                )
                .with_description("Send passcode SMS through Aliyun"),
                ConnectorDefinition::new("facebook-universal", "Facebook", Social, Some(Universal)),
                ConnectorDefinition::new("github-universal", "GitHub", Social, Some(Universal)),
                ConnectorDefinition::new("google-universal", "Google", Social, Some(Universal)),
                ConnectorDefinition::new("sendgrid-email-service", "SendGrid Email", Email, None)
                    .with_description("Send passcode emails through SendGrid"),
                ConnectorDefinition::new(
                    "twilio-short-message-service",
                    "Twilio SMS",
                    Sms,
                    None,
                )
                .with_description("Send passcode SMS through Twilio"),
                ConnectorDefinition::new("wechat-web", "WeChat", Social, Some(Web))
                    .with_description("Sign in with WeChat QR code"),
                ConnectorDefinition::new("wechat-native", "WeChat", Social, Some(Native))
                    .with_description("Sign in with the WeChat app"),
            ],
        }
    }

    /// All definitions in declaration order
    pub fn list(&self) -> &[ConnectorDefinition] {
        &self.definitions
    }

    pub fn find(&self, id: &str) -> Option<&ConnectorDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ConnectorCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_declaration_order() {
        let catalog = ConnectorCatalog::builtin();
        assert_eq!(
            catalog.ids(),
            vec![
                "alipay-web",
                "alipay-native",
                "aliyun-direct-mail",
                "aliyun-short-message-service",
                "facebook-universal",
                "github-universal",
                "google-universal",
                "sendgrid-email-service",
                "twilio-short-message-service",
                "wechat-web",
                "wechat-native",
            ]
        );
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = ConnectorCatalog::builtin();
        assert!(ConnectorCatalog::from_definitions(catalog.list().to_vec()).is_ok());
    }

    #[test]
    fn test_find() {
        let catalog = ConnectorCatalog::builtin();
        let github = catalog.find("github-universal").expect("github missing");
        assert!(github.is_social());
        assert_eq!(github.platform, Some(ConnectorPlatform::Universal));

        let sms = catalog.find("twilio-short-message-service").expect("twilio missing");
        assert_eq!(sms.connector_type, ConnectorType::Sms);
        assert!(sms.platform.is_none());

        assert!(catalog.find("aliyun-dm").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let defs = vec![
            ConnectorDefinition::new("github-universal", "GitHub", ConnectorType::Social, None),
            ConnectorDefinition::new("github-universal", "GitHub 2", ConnectorType::Social, None),
        ];
        let err = ConnectorCatalog::from_definitions(defs).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "github-universal"));
    }

    #[test]
    fn test_load_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "- id: mock-social-web\n  name: Mock Social\n  type: social\n  platform: web\n  enabled_by_default: true\n\
             - id: mock-email\n  name: Mock Email\n  type: email\n"
        )
        .unwrap();

        let catalog = ConnectorCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.ids(), vec!["mock-social-web", "mock-email"]);
        assert!(catalog.find("mock-social-web").unwrap().enabled_by_default);
    }
}
