//! Per-operation client timeouts
//!
//! Resources that wait on long-running remote operations expose an optional
//! `client_timeout` block with one duration string per operation:
//!
//! ```text
//! client_timeout {
//!   create = "20m"
//!   update = "10m"
//! }
//! ```

use crate::duration::{format_duration, parse_duration};
use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Diagnostic, ResourceSchema};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Attribute name of the timeout block.
pub const CLIENT_TIMEOUT: &str = "client_timeout";

/// Default duration per operation name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeoutSpec {
    defaults: BTreeMap<String, Duration>,
}

impl TimeoutSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, operation: impl Into<String>, default: Duration) -> Self {
        self.defaults.insert(operation.into(), default);
        self
    }

    pub fn default_for(&self, operation: &str) -> Option<Duration> {
        self.defaults.get(operation).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Duration)> {
        self.defaults.iter()
    }

    /// Schema of the `client_timeout` block for these operations.
    pub fn schema(&self) -> Attribute {
        client_timeouts_schema(self)
    }

    /// Configured timeout for `operation`, falling back to its default.
    pub fn get(&self, data: &ResourceData, operation: &str) -> Result<Duration> {
        let default = self.default_for(operation).ok_or_else(|| {
            ProviderError::InvalidConfig(format!("no timeout defined for operation {:?}", operation))
        })?;
        get_timeout(data, operation, default)
    }
}

impl<S: Into<String>> FromIterator<(S, Duration)> for TimeoutSpec {
    fn from_iter<I: IntoIterator<Item = (S, Duration)>>(iter: I) -> Self {
        Self {
            defaults: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Validator for duration strings.
pub fn validate_duration_string(value: &Value, key: &str) -> Vec<Diagnostic> {
    let parsed = value
        .as_str()
        .ok_or_else(|| "not a string".to_string())
        .and_then(|s| parse_duration(s).map_err(|e| e.to_string()));

    match parsed {
        Ok(_) => Vec::new(),
        Err(reason) => {
            tracing::debug!("invalid duration: {}", reason);
            vec![Diagnostic::error(key, format!("{:?}: invalid duration", key))]
        }
    }
}

/// Build the `client_timeout` block: optional, at most one instance, one
/// optional duration string per operation defaulting to its canonical form.
pub fn client_timeouts_schema(spec: &TimeoutSpec) -> Attribute {
    let block = spec
        .iter()
        .fold(ResourceSchema::new(), |block, (name, duration)| {
            block.with_attribute(
                name.clone(),
                Attribute::string()
                    .optional()
                    .with_description(format!("{} timeout", name))
                    .with_default(Value::String(format_duration(*duration)))
                    .with_validate(validate_duration_string),
            )
        });

    Attribute::block_set(block)
        .optional()
        .force_new()
        .with_max_items(1)
        .with_description("Custom Terraform Client timeouts")
}

/// Read the timeout for `name` from the resource's `client_timeout` block.
///
/// Returns `default` when the block or the entry is absent. Only the first
/// entry that carries `name` is used; cardinality is enforced by the schema.
pub fn get_timeout(data: &ResourceData, name: &str, default: Duration) -> Result<Duration> {
    let entries = data
        .get(CLIENT_TIMEOUT)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for entry in entries {
        let Some(value) = entry.get(name) else {
            continue;
        };
        let raw = value.as_str().ok_or_else(|| ProviderError::InvalidDuration {
            key: format!("{}.{}", CLIENT_TIMEOUT, name),
            reason: format!("expected a string, got {}", value),
        })?;
        return parse_duration(raw).map_err(|e| ProviderError::InvalidDuration {
            key: format!("{}.{}", CLIENT_TIMEOUT, name),
            reason: e.to_string(),
        });
    }

    Ok(default)
}
