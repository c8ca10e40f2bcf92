//! Configuration management

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::MessengerType;

pub(crate) const ID_INSTANCE_REQUIRED: &str =
    "idInstance is required and must be a non-empty string";
pub(crate) const API_TOKEN_REQUIRED: &str =
    "apiTokenInstance is required and must be a non-empty string";
pub(crate) const USER_CREDENTIALS_REQUIRED: &str =
    "userId and userToken are required for instance management operations";

/// SDKWA client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkwaConfig {
    /// Gateway base URL
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Instance identifier
    #[serde(default)]
    pub id_instance: String,

    /// Instance API token (sent as bearer token)
    #[serde(default)]
    pub api_token_instance: String,

    /// User id, only needed for instance management
    #[serde(default)]
    pub user_id: Option<String>,

    /// User token, only needed for instance management
    #[serde(default)]
    pub user_token: Option<String>,

    /// Messenger targeted by instance calls
    #[serde(default)]
    pub messenger: MessengerType,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_host() -> String {
    "https://api.sdkwa.pro".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl SdkwaConfig {
    /// Minimal configuration with the default host
    pub fn new(id_instance: impl Into<String>, api_token_instance: impl Into<String>) -> Self {
        Self {
            api_host: default_api_host(),
            id_instance: id_instance.into(),
            api_token_instance: api_token_instance.into(),
            user_id: None,
            user_token: None,
            messenger: MessengerType::default(),
            timeout_secs: default_timeout(),
        }
    }

    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = api_host.into();
        self
    }

    pub fn with_user_credentials(
        mut self,
        user_id: impl Into<String>,
        user_token: impl Into<String>,
    ) -> Self {
        self.user_id = Some(user_id.into());
        self.user_token = Some(user_token.into());
        self
    }

    pub fn with_messenger(mut self, messenger: MessengerType) -> Self {
        self.messenger = messenger;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config = Self {
            api_host: std::env::var("API_HOST").unwrap_or_else(|_| default_api_host()),
            id_instance: std::env::var("ID_INSTANCE").unwrap_or_default(),
            api_token_instance: std::env::var("API_TOKEN_INSTANCE").unwrap_or_default(),
            user_id: std::env::var("USER_ID").ok(),
            user_token: std::env::var("USER_TOKEN").ok(),
            messenger: std::env::var("SDKWA_MESSENGER")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            timeout_secs: std::env::var("SDKWA_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_timeout),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the instance credentials are present
    pub fn validate(&self) -> Result<()> {
        if self.id_instance.is_empty() {
            return Err(Error::config(ID_INSTANCE_REQUIRED));
        }
        if self.api_token_instance.is_empty() {
            return Err(Error::config(API_TOKEN_REQUIRED));
        }
        Ok(())
    }

    /// Host without the trailing slash
    pub fn base_url(&self) -> &str {
        self.api_host.trim_end_matches('/')
    }

    /// User credentials for instance management, if both are set and non-empty
    pub fn user_credentials(&self) -> Option<(&str, &str)> {
        match (self.user_id.as_deref(), self.user_token.as_deref()) {
            (Some(id), Some(token)) if !id.is_empty() && !token.is_empty() => Some((id, token)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SdkwaConfig::new("test_instance", "test_token");
        assert_eq!(config.api_host, "https://api.sdkwa.pro");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.messenger, MessengerType::Whatsapp);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_fields() {
        let err = SdkwaConfig::new("", "test_token").validate().unwrap_err();
        assert_eq!(err.to_string(), ID_INSTANCE_REQUIRED);

        let err = SdkwaConfig::new("test_instance", "").validate().unwrap_err();
        assert_eq!(err.to_string(), API_TOKEN_REQUIRED);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let config: SdkwaConfig =
            serde_json::from_str(r#"{"apiTokenInstance": "test_token"}"#).unwrap();
        assert_eq!(config.api_host, "https://api.sdkwa.pro");
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            ID_INSTANCE_REQUIRED
        );

        let config: SdkwaConfig = serde_json::from_str(
            r#"{"idInstance": "1101", "apiTokenInstance": "t", "messenger": "telegram"}"#,
        )
        .unwrap();
        assert_eq!(config.messenger, MessengerType::Telegram);
    }

    #[test]
    fn test_base_url_trims_slash() {
        let config = SdkwaConfig::new("1", "t").with_api_host("https://example.com/");
        assert_eq!(config.base_url(), "https://example.com");
    }

    #[test]
    fn test_user_credentials() {
        let config = SdkwaConfig::new("1", "t");
        assert!(config.user_credentials().is_none());

        let config = config.with_user_credentials("test_user", "");
        assert!(config.user_credentials().is_none());

        let config = config.with_user_credentials("test_user", "test_user_token");
        assert_eq!(
            config.user_credentials(),
            Some(("test_user", "test_user_token"))
        );
    }
}
