//! Provider documentation
//!
//! Works on the provider schema document (the JSON shape printed by
//! `terraform providers schema -json` for a single provider) and renders it
//! as a markdown reference page.

use crate::provider::Provider;
use crate::schema::{Attribute, Element, ResourceSchema, ValueType};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Schemas of the provider block, its resources and data sources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub provider: SchemaEntry,
    #[serde(default)]
    pub resource_schemas: BTreeMap<String, SchemaEntry>,
    #[serde(default)]
    pub data_source_schemas: BTreeMap<String, SchemaEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaEntry {
    #[serde(default)]
    pub version: u64,
    pub block: BlockDoc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockDoc {
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeDoc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub block_types: BTreeMap<String, BlockTypeDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeDoc {
    #[serde(rename = "type", default)]
    pub value_type: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub computed: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub sensitive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockTypeDoc {
    pub nesting_mode: String,
    pub block: BlockDoc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl SchemaDocument {
    /// Schema document of everything registered on `provider`.
    pub fn from_provider(provider: &Provider) -> crate::Result<Self> {
        let mut doc = Self {
            provider: SchemaEntry::from(provider.schema()),
            ..Default::default()
        };
        for name in provider.resource_names() {
            doc.resource_schemas
                .insert(name.to_string(), SchemaEntry::from(&provider.resource_schema(name)?));
        }
        for name in provider.data_source_names() {
            doc.data_source_schemas
                .insert(name.to_string(), SchemaEntry::from(&provider.data_source_schema(name)?));
        }
        Ok(doc)
    }
}

impl From<&ResourceSchema> for SchemaEntry {
    fn from(schema: &ResourceSchema) -> Self {
        Self {
            version: 0,
            block: BlockDoc::from(schema),
        }
    }
}

impl From<&ResourceSchema> for BlockDoc {
    fn from(schema: &ResourceSchema) -> Self {
        let mut block = BlockDoc {
            description: (!schema.description.is_empty()).then(|| schema.description.clone()),
            ..Default::default()
        };
        for (name, attribute) in &schema.attributes {
            match &attribute.elem {
                Some(Element::Block(nested)) => {
                    block.block_types.insert(
                        name.clone(),
                        BlockTypeDoc {
                            nesting_mode: attribute.value_type.to_string(),
                            block: BlockDoc::from(nested),
                            max_items: attribute.max_items,
                        },
                    );
                }
                _ => {
                    block.attributes.insert(name.clone(), AttributeDoc::from(attribute));
                }
            }
        }
        block
    }
}

impl From<&Attribute> for AttributeDoc {
    fn from(attribute: &Attribute) -> Self {
        Self {
            value_type: type_json(attribute),
            description: (!attribute.description.is_empty())
                .then(|| attribute.description.clone()),
            required: attribute.required,
            optional: attribute.optional,
            computed: attribute.computed,
            sensitive: attribute.sensitive,
        }
    }
}

fn primitive_json(value_type: ValueType) -> Value {
    match value_type {
        ValueType::String => json!("string"),
        ValueType::Int | ValueType::Float => json!("number"),
        ValueType::Bool => json!("bool"),
        ValueType::List => json!(["list", "string"]),
        ValueType::Set => json!(["set", "string"]),
        ValueType::Map => json!(["map", "string"]),
    }
}

fn type_json(attribute: &Attribute) -> Value {
    if !attribute.value_type.is_collection() {
        return primitive_json(attribute.value_type);
    }
    let elem = match &attribute.elem {
        Some(Element::Type(elem)) => primitive_json(*elem),
        _ => json!("string"),
    };
    json!([attribute.value_type.to_string(), elem])
}

/// Attribute lines of a block, split into computed, required and optional.
fn split_attributes(block: &BlockDoc) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut computed = Vec::new();
    let mut required = Vec::new();
    let mut optional = Vec::new();
    for (name, attribute) in &block.attributes {
        let description = attribute
            .description
            .as_deref()
            .map(|d| format!("_{}_", d))
            .unwrap_or_default();
        let line = format!("**{}** {}", name, description);
        if attribute.computed {
            computed.push(line);
        } else if attribute.required {
            required.push(line);
        } else if attribute.optional {
            optional.push(line);
        }
    }
    (computed, required, optional)
}

fn push_list(out: &mut String, heading: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    out.push_str(heading);
    for line in lines {
        out.push_str(&format!("* {} \n", line));
    }
}

fn push_block(out: &mut String, block: &BlockDoc, section: Option<&str>) {
    let (computed, required, optional) = split_attributes(block);
    if let Some(section) = section {
        out.push_str(&format!("### {} \n", section));
    }
    push_list(out, "#### Required \n", &required);
    push_list(out, "#### Optional \n", &optional);
    push_list(out, "##### Computed \n", &computed);
}

/// Render the schema document as markdown.
pub fn render_markdown(doc: &SchemaDocument) -> String {
    let mut out = String::from("# terraform-provider-aiven \n");
    push_block(&mut out, &doc.provider.block, None);

    out.push_str("--- \n");
    out.push_str("## Resources \n");
    for (name, entry) in &doc.resource_schemas {
        push_block(&mut out, &entry.block, Some(name));
    }

    out.push_str("--- \n");
    out.push_str("## Data-sources \n");
    for (name, entry) in &doc.data_source_schemas {
        push_block(&mut out, &entry.block, Some(name));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::provider_schema;
    use crate::timeouts::TimeoutSpec;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn document() -> SchemaDocument {
        serde_json::from_value(json!({
            "provider": {"block": {"attributes": {
                "api_token": {"type": "string", "description": "Aiven Authentication Token", "required": true, "sensitive": true}
            }}},
            "resource_schemas": {
                "aiven_project": {"version": 0, "block": {"attributes": {
                    "project": {"type": "string", "description": "Project name", "required": true},
                    "card_id": {"type": "string", "optional": true},
                    "ca_cert": {"type": "string", "description": "CA certificate", "computed": true, "optional": true}
                }}}
            },
            "data_source_schemas": {
                "aiven_project": {"block": {"attributes": {
                    "project": {"type": "string", "required": true}
                }}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_render_markdown() {
        let expected = "# terraform-provider-aiven \n\
            #### Required \n\
            * **api_token** _Aiven Authentication Token_ \n\
            --- \n\
            ## Resources \n\
            ### aiven_project \n\
            #### Required \n\
            * **project** _Project name_ \n\
            #### Optional \n\
            * **card_id**  \n\
            ##### Computed \n\
            * **ca_cert** _CA certificate_ \n\
            --- \n\
            ## Data-sources \n\
            ### aiven_project \n\
            #### Required \n\
            * **project**  \n";
        assert_eq!(render_markdown(&document()), expected);
    }

    #[test]
    fn test_entry_from_schema() {
        let schema = provider_schema().with_attribute(
            "client_timeout",
            TimeoutSpec::new()
                .with("create", Duration::from_secs(300))
                .schema(),
        );
        let entry = SchemaEntry::from(&schema);

        let token = &entry.block.attributes["api_token"];
        assert_eq!(token.value_type, json!("string"));
        assert!(token.required && token.sensitive);

        let timeouts = &entry.block.block_types["client_timeout"];
        assert_eq!(timeouts.nesting_mode, "set");
        assert_eq!(timeouts.max_items, Some(1));
        assert!(timeouts.block.attributes["create"].optional);
    }

    #[test]
    fn test_collection_type_json() {
        let attr = Attribute::list_of(ValueType::String).optional();
        assert_eq!(AttributeDoc::from(&attr).value_type, json!(["list", "string"]));
        let attr = Attribute::new(ValueType::Map).optional();
        assert_eq!(AttributeDoc::from(&attr).value_type, json!(["map", "string"]));
    }
}
