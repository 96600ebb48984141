//! Resource data handed over by the host engine
//!
//! The host passes configuration and state as a dynamically shaped tree.
//! [`ResourceData`] keeps that tree only at the handler boundary: handlers
//! either pull single optional fields out of it or decode it into a typed
//! struct with [`ResourceData::decode`].

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Flattened attribute key/value pairs, as the host diffs them.
pub type FlatMap = BTreeMap<String, String>;

/// Configuration and state of a single resource instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Opaque id stored by the host; empty until the resource is created
    #[serde(default)]
    id: String,

    /// Attribute values keyed by attribute name
    #[serde(default)]
    values: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Build from a JSON object of attribute values. Anything other than an
    /// object yields empty data.
    pub fn from_values(values: Value) -> Self {
        match values {
            Value::Object(values) => Self {
                id: String::new(),
                values,
            },
            _ => Self::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Drop the id, telling the host the resource no longer exists.
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    /// Whether the resource has not been created yet.
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Look up a value by dotted path (`ip_filter.0`, `config.0.settings`).
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                Value::Object(fields) => fields.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Like [`get`](Self::get), but a value equal to its type's zero value
    /// counts as unset.
    pub fn get_ok(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|value| !is_zero(value))
    }

    /// String value of `key`, or `""` when unset or not a string.
    pub fn optional_string(&self, key: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    pub fn optional_string_pointer(&self, key: &str) -> Option<String> {
        self.get_ok(key).and_then(Value::as_str).map(str::to_string)
    }

    pub fn optional_int_pointer(&self, key: &str) -> Option<i64> {
        self.get_ok(key).and_then(Value::as_i64)
    }

    /// Decode the attribute values into a typed configuration struct.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.values.clone()))?)
    }

    /// Attribute values in the host's flat key form.
    pub fn flatten(&self) -> FlatMap {
        flatten(&self.values)
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Flatten attribute values into `key -> string` pairs.
///
/// Lists and sets produce a `name.#` count plus `name.<index>` entries,
/// maps a `name.%` count plus `name.<key>` entries. Nested blocks inside a
/// list continue the path (`config.0.settings.#`). Nulls are omitted.
pub fn flatten(values: &Map<String, Value>) -> FlatMap {
    let mut out = FlatMap::new();
    for (key, value) in values {
        flatten_into(&mut out, key, value);
    }
    out
}

fn flatten_into(out: &mut FlatMap, prefix: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Array(items) => {
            out.insert(format!("{}.#", prefix), items.len().to_string());
            for (idx, item) in items.iter().enumerate() {
                flatten_into(out, &format!("{}.{}", prefix, idx), item);
            }
        }
        Value::Object(fields) => {
            // Objects directly under a list index are blocks, not maps.
            let is_block = prefix
                .rsplit('.')
                .next()
                .is_some_and(|last| last.parse::<usize>().is_ok());
            if !is_block {
                out.insert(format!("{}.%", prefix), fields.len().to_string());
            }
            for (key, field) in fields {
                flatten_into(out, &format!("{}.{}", prefix, key), field);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ResourceData {
        ResourceData::from_values(json!({
            "project": "my-project",
            "service_name": "",
            "partitions": 3,
            "replication": 0,
            "ip_filter": ["0.0.0.0/0"],
            "config": [{"settings": [{"enabled": true}]}],
            "tags": {"env": "prod"}
        }))
    }

    #[test]
    fn test_get_dotted_path() {
        let data = sample();
        assert_eq!(data.get("ip_filter.0"), Some(&json!("0.0.0.0/0")));
        assert_eq!(
            data.get("config.0.settings.0.enabled"),
            Some(&json!(true))
        );
        assert_eq!(data.get("tags.env"), Some(&json!("prod")));
        assert!(data.get("ip_filter.1").is_none());
        assert!(data.get("project.0").is_none());
        assert!(data.get("missing").is_none());
    }

    #[test]
    fn test_optional_string() {
        let data = sample();
        assert_eq!(data.optional_string("project"), "my-project");
        assert_eq!(data.optional_string("partitions"), "");
        assert_eq!(data.optional_string("missing"), "");
    }

    #[test]
    fn test_optional_string_pointer() {
        let data = sample();
        assert_eq!(
            data.optional_string_pointer("project"),
            Some("my-project".to_string())
        );
        assert_eq!(data.optional_string_pointer("service_name"), None);
        assert_eq!(data.optional_string_pointer("partitions"), None);
        assert_eq!(data.optional_string_pointer("missing"), None);
    }

    #[test]
    fn test_optional_int_pointer() {
        let data = sample();
        assert_eq!(data.optional_int_pointer("partitions"), Some(3));
        assert_eq!(data.optional_int_pointer("replication"), None);
        assert_eq!(data.optional_int_pointer("project"), None);
    }

    #[test]
    fn test_id_lifecycle() {
        let mut data = ResourceData::new();
        assert!(data.is_new());
        data.set_id("proj/svc");
        assert_eq!(data.id(), "proj/svc");
        assert!(!data.is_new());
        data.clear_id();
        assert!(data.is_new());
    }

    #[test]
    fn test_decode_typed() {
        #[derive(Deserialize)]
        struct Topic {
            project: String,
            partitions: u32,
            #[serde(default)]
            ip_filter: Vec<String>,
        }

        let topic: Topic = sample().decode().unwrap();
        assert_eq!(topic.project, "my-project");
        assert_eq!(topic.partitions, 3);
        assert_eq!(topic.ip_filter, vec!["0.0.0.0/0"]);
    }

    #[test]
    fn test_flatten() {
        let flat = sample().flatten();
        assert_eq!(flat["project"], "my-project");
        assert_eq!(flat["partitions"], "3");
        assert_eq!(flat["ip_filter.#"], "1");
        assert_eq!(flat["ip_filter.0"], "0.0.0.0/0");
        assert_eq!(flat["config.#"], "1");
        assert_eq!(flat["config.0.settings.#"], "1");
        assert_eq!(flat["config.0.settings.0.enabled"], "true");
        assert_eq!(flat["tags.%"], "1");
        assert_eq!(flat["tags.env"], "prod");
        assert!(!flat.contains_key("config.0.%"));
    }
}
