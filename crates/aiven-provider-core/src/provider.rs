//! Provider registry, handler trait and shared context

use crate::cache::TopicCache;
use crate::catalog;
use crate::config::provider_schema;
use crate::docs::SchemaDocument;
use crate::error::{ProviderError, RemoteError, Result};
use crate::plan::{ResourcePlan, plan_resource};
use crate::resource_data::ResourceData;
use crate::schema::{Diagnostic, ResourceSchema};
use crate::timeouts::{CLIENT_TIMEOUT, TimeoutSpec};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// HTTP method of an API request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiMethod::Get => write!(f, "GET"),
            ApiMethod::Post => write!(f, "POST"),
            ApiMethod::Put => write!(f, "PUT"),
            ApiMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single call against the remote API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: ApiMethod,

    /// Path relative to the API base URL, e.g. `/project/my-project`
    pub path: String,

    pub body: Option<Value>,

    /// Deadline enforced by the client for this call
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn new(method: ApiMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(ApiMethod::Post, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(ApiMethod::Put, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Remote API client abstraction
///
/// The HTTP implementation lives in `aiven-provider-client`; tests plug in
/// their own doubles.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> std::result::Result<Value, RemoteError>;
}

/// State shared by every handler invocation for the provider's lifetime
#[derive(Clone)]
pub struct ProviderContext {
    client: Arc<dyn ApiClient>,
    cache: Arc<TopicCache>,
}

impl ProviderContext {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            client,
            cache: Arc::new(TopicCache::new()),
        }
    }

    pub fn client(&self) -> &dyn ApiClient {
        self.client.as_ref()
    }

    pub fn cache(&self) -> &TopicCache {
        &self.cache
    }
}

impl fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderContext").finish_non_exhaustive()
    }
}

/// Handler for one resource or data source type
///
/// Data sources only implement [`read`](Self::read); the default
/// create/update/delete reject the call.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Attribute schema, without the `client_timeout` block
    fn schema(&self) -> ResourceSchema;

    /// Operation timeouts, if the resource exposes a `client_timeout` block
    fn timeouts(&self) -> Option<TimeoutSpec> {
        None
    }

    async fn read(&self, ctx: &ProviderContext, data: &mut ResourceData) -> Result<()>;

    async fn create(&self, _ctx: &ProviderContext, _data: &mut ResourceData) -> Result<()> {
        Err(ProviderError::UnsupportedOperation("create".to_string()))
    }

    async fn update(&self, _ctx: &ProviderContext, _data: &mut ResourceData) -> Result<()> {
        Err(ProviderError::UnsupportedOperation("update".to_string()))
    }

    async fn delete(&self, _ctx: &ProviderContext, _data: &mut ResourceData) -> Result<()> {
        Err(ProviderError::UnsupportedOperation("delete".to_string()))
    }
}

/// Registered handlers plus the provider's own configuration schema
pub struct Provider {
    schema: ResourceSchema,
    resources: BTreeMap<String, Arc<dyn ResourceHandler>>,
    data_sources: BTreeMap<String, Arc<dyn ResourceHandler>>,
}

impl Provider {
    pub fn builder() -> ProviderBuilder {
        ProviderBuilder::default()
    }

    /// Schema of the provider block
    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub fn resource(&self, name: &str) -> Result<&Arc<dyn ResourceHandler>> {
        self.resources
            .get(name)
            .ok_or_else(|| ProviderError::UnknownResourceType(name.to_string()))
    }

    pub fn data_source(&self, name: &str) -> Result<&Arc<dyn ResourceHandler>> {
        self.data_sources
            .get(name)
            .ok_or_else(|| ProviderError::UnknownResourceType(name.to_string()))
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn data_source_names(&self) -> impl Iterator<Item = &str> {
        self.data_sources.keys().map(String::as_str)
    }

    /// Full schema of a resource, `client_timeout` block included.
    pub fn resource_schema(&self, name: &str) -> Result<ResourceSchema> {
        Ok(full_schema(self.resource(name)?.as_ref()))
    }

    pub fn data_source_schema(&self, name: &str) -> Result<ResourceSchema> {
        Ok(full_schema(self.data_source(name)?.as_ref()))
    }

    /// Schema document of the provider block and every registered handler.
    pub fn schema_document(&self) -> Result<SchemaDocument> {
        SchemaDocument::from_provider(self)
    }

    /// Catalog resource types that have no handler.
    pub fn unregistered_resources(&self) -> Vec<&'static str> {
        catalog::RESOURCE_TYPES
            .iter()
            .copied()
            .filter(|name| !self.resources.contains_key(*name))
            .collect()
    }

    pub fn unregistered_data_sources(&self) -> Vec<&'static str> {
        catalog::DATA_SOURCE_TYPES
            .iter()
            .copied()
            .filter(|name| !self.data_sources.contains_key(*name))
            .collect()
    }

    pub fn validate_provider_config(&self, config: &Value) -> Vec<Diagnostic> {
        self.schema.validate(config)
    }

    pub fn validate_resource_config(&self, name: &str, config: &Value) -> Result<Vec<Diagnostic>> {
        Ok(self.resource_schema(name)?.validate(config))
    }

    /// Diff stored state against proposed configuration for one resource.
    pub fn plan(
        &self,
        name: &str,
        prior: &ResourceData,
        proposed: &ResourceData,
    ) -> Result<ResourcePlan> {
        let schema = self.resource_schema(name)?;
        Ok(plan_resource(name, &schema, prior, proposed))
    }

    /// Read a resource, dropping it from state when the remote reports it gone.
    pub async fn refresh(
        &self,
        ctx: &ProviderContext,
        name: &str,
        data: &mut ResourceData,
    ) -> Result<()> {
        let handler = self.resource(name)?;
        handler.read(ctx, data).await?;
        if data.is_new() {
            tracing::info!("{} no longer exists, removed from state", name);
        }
        Ok(())
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("data_sources", &self.data_sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn full_schema(handler: &dyn ResourceHandler) -> ResourceSchema {
    let schema = handler.schema();
    match handler.timeouts() {
        Some(spec) => schema.with_attribute(CLIENT_TIMEOUT, spec.schema()),
        None => schema,
    }
}

/// Builder for [`Provider`]
#[derive(Default)]
pub struct ProviderBuilder {
    resources: BTreeMap<String, Arc<dyn ResourceHandler>>,
    data_sources: BTreeMap<String, Arc<dyn ResourceHandler>>,
}

impl ProviderBuilder {
    pub fn resource(mut self, name: impl Into<String>, handler: Arc<dyn ResourceHandler>) -> Self {
        self.resources.insert(name.into(), handler);
        self
    }

    pub fn data_source(
        mut self,
        name: impl Into<String>,
        handler: Arc<dyn ResourceHandler>,
    ) -> Self {
        self.data_sources.insert(name.into(), handler);
        self
    }

    /// Build the provider. Every registered name must be a catalog type.
    pub fn build(self) -> Result<Provider> {
        if let Some(name) = self
            .resources
            .keys()
            .find(|name| !catalog::is_resource_type(name))
        {
            return Err(ProviderError::UnknownResourceType(name.clone()));
        }
        if let Some(name) = self
            .data_sources
            .keys()
            .find(|name| !catalog::is_data_source_type(name))
        {
            return Err(ProviderError::UnknownResourceType(name.clone()));
        }

        tracing::debug!(
            "Registered {} resources and {} data sources",
            self.resources.len(),
            self.data_sources.len()
        );

        Ok(Provider {
            schema: provider_schema(),
            resources: self.resources,
            data_sources: self.data_sources,
        })
    }
}
