//! Provider configuration

use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, ResourceSchema};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "AIVEN_TOKEN";

pub const DEFAULT_API_URL: &str = "https://api.aiven.io/v1";

/// Settings needed to build the shared API client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_token: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_user_agent() -> String {
    format!("terraform-provider-aiven/{}", env!("CARGO_PKG_VERSION"))
}

impl ProviderConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            api_url: default_api_url(),
            user_agent: default_user_agent(),
        }
    }

    /// Read the token from `AIVEN_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ProviderError::MissingEnvVar(TOKEN_ENV_VAR.to_string()))?;
        Ok(Self::new(token))
    }

    /// Read the provider block, falling back to the environment when
    /// `api_token` is not configured.
    pub fn from_resource_data(data: &ResourceData) -> Result<Self> {
        match data.optional_string_pointer("api_token") {
            Some(token) => Ok(Self::new(token)),
            None => Self::from_env(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Schema of the provider block itself.
pub fn provider_schema() -> ResourceSchema {
    ResourceSchema::new().with_attribute(
        "api_token",
        Attribute::string()
            .required()
            .sensitive()
            .with_env_default(TOKEN_ENV_VAR)
            .with_description("Aiven Authentication Token"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env() {
        temp_env::with_var(TOKEN_ENV_VAR, Some("secret-token"), || {
            let config = ProviderConfig::from_env().unwrap();
            assert_eq!(config.api_token, "secret-token");
            assert_eq!(config.api_url, DEFAULT_API_URL);
            assert!(config.user_agent.starts_with("terraform-provider-aiven/"));
        });
    }

    #[test]
    #[serial]
    fn test_from_env_missing() {
        temp_env::with_var_unset(TOKEN_ENV_VAR, || {
            let err = ProviderConfig::from_env().unwrap_err();
            assert!(matches!(err, ProviderError::MissingEnvVar(ref v) if v == TOKEN_ENV_VAR));
        });
    }

    #[test]
    #[serial]
    fn test_from_resource_data_prefers_block() {
        temp_env::with_var(TOKEN_ENV_VAR, Some("env-token"), || {
            let data = ResourceData::new().with_value("api_token", json!("block-token"));
            let config = ProviderConfig::from_resource_data(&data).unwrap();
            assert_eq!(config.api_token, "block-token");

            let config = ProviderConfig::from_resource_data(&ResourceData::new()).unwrap();
            assert_eq!(config.api_token, "env-token");
        });
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ProviderConfig::new("secret-token");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_with_api_url_trims_slash() {
        let config = ProviderConfig::new("t").with_api_url("http://127.0.0.1:8080/v1/");
        assert_eq!(config.api_url, "http://127.0.0.1:8080/v1");
    }

    #[test]
    #[serial]
    fn test_provider_schema_requires_token() {
        let schema = provider_schema();
        let token = schema.attribute("api_token").unwrap();
        assert!(token.required);
        assert!(token.sensitive);

        temp_env::with_var_unset(TOKEN_ENV_VAR, || {
            assert_eq!(schema.validate(&json!({})).len(), 1);
        });
        temp_env::with_var(TOKEN_ENV_VAR, Some("x"), || {
            assert!(schema.validate(&json!({})).is_empty());
        });
    }
}
