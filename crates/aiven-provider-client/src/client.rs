//! Aiven API client
//!
//! Token-authenticated JSON client. Every call goes through
//! [`ApiClient::send`], which maps non-2xx responses to
//! [`RemoteError::Api`] so handlers can classify them.

use crate::error::{ClientError, Result};
use aiven_provider_core::{ApiClient, ApiMethod, ApiRequest, ProviderConfig, RemoteError};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::Value;

/// HTTP client for the Aiven REST API
pub struct AivenClient {
    http: reqwest::Client,
    api_url: String,
    api_token: String,
}

impl AivenClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if config.api_token.is_empty() {
            return Err(ClientError::InvalidConfig("api_token is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ApiClient for AivenClient {
    async fn send(&self, request: ApiRequest) -> std::result::Result<Value, RemoteError> {
        let url = self.url(&request.path);
        tracing::debug!("{} {}", request.method, url);

        let mut builder = match request.method {
            ApiMethod::Get => self.http.get(&url),
            ApiMethod::Post => self.http.post(&url),
            ApiMethod::Put => self.http.put(&url),
            ApiMethod::Delete => self.http.delete(&url),
        }
        .header(AUTHORIZATION, format!("aivenv1 {}", self.api_token));

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RemoteError::Other(e.into()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Other(e.into()))?;

        if !status.is_success() {
            let message = error_message(status, &body);
            tracing::debug!("{} {} failed with {}: {}", request.method, url, status, message);
            return Err(RemoteError::api(status.as_u16(), message));
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| {
            RemoteError::Other(anyhow::Error::new(e).context(format!("invalid response body from {}", url)))
        })
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Message of an error response: the API's `message` field, else the raw
/// body, else the status reason.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ApiErrorBody>(body) {
        return parsed.message;
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if !text.is_empty() {
        return text;
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}
