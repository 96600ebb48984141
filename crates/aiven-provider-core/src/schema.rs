//! Schema model for provider, resource and data source configuration

use crate::diff::DiffSuppressFn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Attribute validator: the value and its attribute path in, diagnostics out.
pub type ValidateFn = fn(value: &Value, key: &str) -> Vec<Diagnostic>;

/// Type of an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
    List,
    Set,
    Map,
}

impl ValueType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            ValueType::String => value.is_string(),
            ValueType::Int => value.is_i64() || value.is_u64(),
            ValueType::Float => value.is_number(),
            ValueType::Bool => value.is_boolean(),
            ValueType::List | ValueType::Set => value.is_array(),
            ValueType::Map => value.is_object(),
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, ValueType::List | ValueType::Set | ValueType::Map)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Int => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::List => write!(f, "list"),
            ValueType::Set => write!(f, "set"),
            ValueType::Map => write!(f, "map"),
        }
    }
}

/// Element of a collection attribute
#[derive(Debug, Clone)]
pub enum Element {
    /// Primitive elements
    Type(ValueType),
    /// Nested configuration block
    Block(ResourceSchema),
}

/// A single schema attribute
#[derive(Debug, Clone)]
pub struct Attribute {
    pub value_type: ValueType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// Changing the value replaces the resource
    pub force_new: bool,
    pub default: Option<Value>,
    /// Environment variable consulted when the value is not configured
    pub env_default: Option<String>,
    pub max_items: Option<usize>,
    pub elem: Option<Element>,
    pub validate: Option<ValidateFn>,
    pub diff_suppress: Option<DiffSuppressFn>,
}

impl Attribute {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            description: String::new(),
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            force_new: false,
            default: None,
            env_default: None,
            max_items: None,
            elem: None,
            validate: None,
            diff_suppress: None,
        }
    }

    pub fn string() -> Self {
        Self::new(ValueType::String)
    }

    pub fn int() -> Self {
        Self::new(ValueType::Int)
    }

    pub fn bool() -> Self {
        Self::new(ValueType::Bool)
    }

    pub fn list_of(elem: ValueType) -> Self {
        Self::new(ValueType::List).with_elem(Element::Type(elem))
    }

    pub fn block_list(block: ResourceSchema) -> Self {
        Self::new(ValueType::List).with_elem(Element::Block(block))
    }

    pub fn block_set(block: ResourceSchema) -> Self {
        Self::new(ValueType::Set).with_elem(Element::Block(block))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_env_default(mut self, var: impl Into<String>) -> Self {
        self.env_default = Some(var.into());
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    pub fn with_elem(mut self, elem: Element) -> Self {
        self.elem = Some(elem);
        self
    }

    pub fn with_validate(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    pub fn with_diff_suppress(mut self, diff_suppress: DiffSuppressFn) -> Self {
        self.diff_suppress = Some(diff_suppress);
        self
    }

    /// Nested block of a block-typed collection.
    pub fn block(&self) -> Option<&ResourceSchema> {
        match &self.elem {
            Some(Element::Block(block)) => Some(block),
            _ => None,
        }
    }

    fn validate_value(&self, key: &str, value: &Value, diagnostics: &mut Vec<Diagnostic>) {
        if !self.value_type.matches(value) {
            diagnostics.push(Diagnostic::error(
                key,
                format!("{:?}: expected {}", key, self.value_type),
            ));
            return;
        }

        if let Value::Array(items) = value {
            if let Some(max) = self.max_items.filter(|max| items.len() > *max) {
                diagnostics.push(Diagnostic::error(
                    key,
                    format!(
                        "{:?}: attribute supports {} item maximum, config has {}",
                        key,
                        max,
                        items.len()
                    ),
                ));
            }

            for (idx, item) in items.iter().enumerate() {
                let item_key = format!("{}.{}", key, idx);
                match &self.elem {
                    Some(Element::Block(block)) => {
                        diagnostics.extend(block.validate_at(&item_key, item));
                    }
                    Some(Element::Type(elem_type)) if !elem_type.matches(item) => {
                        diagnostics.push(Diagnostic::error(
                            &item_key,
                            format!("{:?}: expected {}", item_key, elem_type),
                        ));
                    }
                    _ => {}
                }
            }
        }

        if let Some(validate) = self.validate {
            diagnostics.extend(validate(value, key));
        }
    }
}

/// Schema of a resource, data source, nested block or the provider itself
#[derive(Debug, Clone, Default)]
pub struct ResourceSchema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl ResourceSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Attribute that governs a flat key such as `config.0.settings.#`.
    ///
    /// Count markers and list indices stay on the current attribute; a name
    /// after them descends into the nested block. Keys below a map resolve to
    /// the map attribute.
    pub fn attribute_for_path(&self, path: &str) -> Option<&Attribute> {
        let mut segments = path.split('.');
        let mut current = self.attributes.get(segments.next()?)?;
        for segment in segments {
            if segment == "#" || segment == "%" || segment.parse::<usize>().is_ok() {
                continue;
            }
            match current.block() {
                Some(block) => current = block.attributes.get(segment)?,
                None => return Some(current),
            }
        }
        Some(current)
    }

    /// Validate a configuration object against this schema.
    pub fn validate(&self, config: &Value) -> Vec<Diagnostic> {
        self.validate_at("", config)
    }

    fn validate_at(&self, prefix: &str, config: &Value) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let key_for = |name: &str| {
            if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", prefix, name)
            }
        };

        let empty = serde_json::Map::new();
        let fields = match config {
            Value::Object(fields) => fields,
            Value::Null => &empty,
            _ => {
                diagnostics.push(Diagnostic::error(prefix, "expected an object"));
                return diagnostics;
            }
        };

        for name in fields.keys() {
            if !self.attributes.contains_key(name) {
                let key = key_for(name);
                diagnostics.push(Diagnostic::error(
                    &key,
                    format!("{:?}: unsupported argument", key),
                ));
            }
        }

        for (name, attribute) in &self.attributes {
            let key = key_for(name);
            match fields.get(name).filter(|v| !v.is_null()) {
                Some(value) => {
                    if attribute.computed && !attribute.optional && !attribute.required {
                        diagnostics.push(Diagnostic::error(
                            &key,
                            format!("{:?}: value is computed and cannot be set", key),
                        ));
                        continue;
                    }
                    attribute.validate_value(&key, value, &mut diagnostics);
                }
                None => {
                    let has_fallback = attribute.default.is_some()
                        || attribute
                            .env_default
                            .as_deref()
                            .is_some_and(|var| std::env::var(var).is_ok());
                    if attribute.required && !has_fallback {
                        diagnostics.push(Diagnostic::error(
                            &key,
                            format!("{:?}: required field is not set", key),
                        ));
                    }
                }
            }
        }

        diagnostics
    }
}

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// Validation finding reported back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    /// Flat attribute path the finding refers to
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(attribute: &str, summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            attribute: (!attribute.is_empty()).then(|| attribute.to_string()),
        }
    }

    pub fn warning(attribute: &str, summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(attribute, summary)
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "error: {}", self.summary),
            Severity::Warning => write!(f, "warning: {}", self.summary),
        }
    }
}

/// Whether any diagnostic is an error.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{empty_object_diff_suppress, ip_filter_diff_suppress};
    use serde_json::json;

    fn service_schema() -> ResourceSchema {
        let user_config = ResourceSchema::new()
            .with_attribute(
                "ip_filter",
                Attribute::list_of(ValueType::String)
                    .optional()
                    .with_diff_suppress(ip_filter_diff_suppress),
            )
            .with_attribute(
                "settings",
                Attribute::block_list(
                    ResourceSchema::new().with_attribute("enabled", Attribute::bool().optional()),
                )
                .optional()
                .with_max_items(1)
                .with_diff_suppress(empty_object_diff_suppress),
            );

        ResourceSchema::new()
            .with_attribute("project", Attribute::string().required().force_new())
            .with_attribute("service_name", Attribute::string().required())
            .with_attribute("plan", Attribute::string().optional())
            .with_attribute("state", Attribute::string().computed())
            .with_attribute(
                "config",
                Attribute::block_list(user_config).optional().with_max_items(1),
            )
    }

    #[test]
    fn test_attribute_for_path() {
        let schema = service_schema();
        let settings = schema.attribute_for_path("config.0.settings.#").unwrap();
        assert_eq!(settings.max_items, Some(1));
        assert!(settings.diff_suppress.is_some());

        let ip_filter = schema.attribute_for_path("config.0.ip_filter.0").unwrap();
        assert_eq!(ip_filter.value_type, ValueType::List);

        let enabled = schema
            .attribute_for_path("config.0.settings.0.enabled")
            .unwrap();
        assert_eq!(enabled.value_type, ValueType::Bool);

        assert!(schema.attribute_for_path("config.0.nope").is_none());
        assert!(schema.attribute_for_path("nope").is_none());
    }

    #[test]
    fn test_validate_ok() {
        let config = json!({
            "project": "p",
            "service_name": "s",
            "config": [{"ip_filter": ["10.0.0.0/8"], "settings": [{"enabled": true}]}]
        });
        assert!(service_schema().validate(&config).is_empty());
    }

    #[test]
    fn test_validate_required_missing() {
        let diagnostics = service_schema().validate(&json!({"project": "p"}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("service_name"));
        assert!(has_errors(&diagnostics));
    }

    #[test]
    fn test_validate_type_mismatch_and_unknown() {
        let diagnostics = service_schema().validate(&json!({
            "project": 1,
            "service_name": "s",
            "colour": "blue"
        }));
        let attrs: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| d.attribute.as_deref())
            .collect();
        assert!(attrs.contains(&"project"));
        assert!(attrs.contains(&"colour"));
    }

    #[test]
    fn test_validate_max_items_and_nested() {
        let diagnostics = service_schema().validate(&json!({
            "project": "p",
            "service_name": "s",
            "config": [{"ip_filter": [1]}, {}]
        }));
        assert!(diagnostics.iter().any(|d| d.summary.contains("1 item maximum")));
        assert!(
            diagnostics
                .iter()
                .any(|d| d.attribute.as_deref() == Some("config.0.ip_filter.0"))
        );
    }

    #[test]
    fn test_validate_computed_cannot_be_set() {
        let diagnostics = service_schema().validate(&json!({
            "project": "p",
            "service_name": "s",
            "state": "RUNNING"
        }));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("computed"));
    }
}
