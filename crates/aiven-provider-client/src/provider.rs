//! Provider configuration entry point

use crate::client::AivenClient;
use crate::error::Result;
use aiven_provider_core::{ProviderConfig, ProviderContext, ResourceData};
use std::sync::Arc;

/// Build the shared context every handler receives.
pub fn configure(config: &ProviderConfig) -> Result<ProviderContext> {
    let client = AivenClient::new(config)?;
    tracing::debug!("Configured Aiven client for {}", client.api_url());
    Ok(ProviderContext::new(Arc::new(client)))
}

/// Configure from the provider block, falling back to `AIVEN_TOKEN`.
pub fn configure_from(data: &ResourceData) -> Result<ProviderContext> {
    let config = ProviderConfig::from_resource_data(data)?;
    configure(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use aiven_provider_core::{ProviderError, TOKEN_ENV_VAR};
    use serde_json::json;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_configure_from_block() {
        temp_env::with_var_unset(TOKEN_ENV_VAR, || {
            let data = ResourceData::from_values(json!({"api_token": "secret"}));
            assert!(configure_from(&data).is_ok());
        });
    }

    #[test]
    #[serial]
    fn test_configure_from_env() {
        temp_env::with_var(TOKEN_ENV_VAR, Some("from-env"), || {
            assert!(configure_from(&ResourceData::new()).is_ok());
        });
    }

    #[test]
    #[serial]
    fn test_configure_without_token() {
        temp_env::with_var_unset(TOKEN_ENV_VAR, || {
            let err = configure_from(&ResourceData::new()).err().unwrap();
            assert!(matches!(
                err,
                ClientError::Provider(ProviderError::MissingEnvVar(ref name)) if name == TOKEN_ENV_VAR
            ));
        });
    }
}
