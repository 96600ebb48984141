//! Change planning for a single resource
//!
//! Both sides are flattened to the host's key form and compared key by key.
//! Each difference is offered to the governing attribute's diff suppressor
//! before it becomes an [`AttributeChange`].

use crate::resource_data::{FlatMap, ResourceData};
use crate::schema::ResourceSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of change a plan requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// The resource does not exist yet
    Create,
    /// Update in place
    Update,
    /// A force-new attribute changed
    Replace,
    /// No changes needed
    NoOp,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Create => write!(f, "create"),
            ChangeKind::Update => write!(f, "update"),
            ChangeKind::Replace => write!(f, "replace"),
            ChangeKind::NoOp => write!(f, "no-op"),
        }
    }
}

/// A single flat key that differs between state and configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeChange {
    pub key: String,
    pub old: String,
    pub new: String,
    /// Changing this key replaces the resource
    pub force_new: bool,
}

/// Planned changes for one resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePlan {
    pub resource_type: String,
    pub resource_id: String,
    pub kind: ChangeKind,
    pub changes: Vec<AttributeChange>,
    /// Keys whose difference was suppressed
    pub suppressed: Vec<String>,
}

impl ResourcePlan {
    pub fn has_changes(&self) -> bool {
        self.kind != ChangeKind::NoOp
    }

    pub fn change(&self, key: &str) -> Option<&AttributeChange> {
        self.changes.iter().find(|c| c.key == key)
    }

    pub fn is_suppressed(&self, key: &str) -> bool {
        self.suppressed.iter().any(|k| k == key)
    }
}

/// Value a missing flat key compares as.
fn missing_value(key: &str) -> &'static str {
    if key.ends_with(".#") || key.ends_with(".%") {
        "0"
    } else {
        ""
    }
}

/// Plan the change from `prior` state to `proposed` configuration.
///
/// Suppressors see `prior`, which carries the stored id. When a collection's
/// count change is suppressed, the element keys of that collection are
/// suppressed with it. Computed attributes missing from `proposed` keep their
/// stored value.
pub fn plan_resource(
    resource_type: &str,
    schema: &ResourceSchema,
    prior: &ResourceData,
    proposed: &ResourceData,
) -> ResourcePlan {
    let old: FlatMap = if prior.is_new() {
        FlatMap::new()
    } else {
        prior.flatten()
    };
    let new = proposed.flatten();

    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
    let mut changes = Vec::new();
    let mut suppressed: Vec<String> = Vec::new();
    let mut suppressed_prefixes: Vec<String> = Vec::new();

    for key in keys {
        let old_value = old.get(key).map(String::as_str).unwrap_or(missing_value(key));
        let new_value = new.get(key).map(String::as_str).unwrap_or(missing_value(key));
        if old_value == new_value {
            continue;
        }

        if suppressed_prefixes.iter().any(|prefix| key.starts_with(prefix.as_str())) {
            suppressed.push(key.clone());
            continue;
        }

        let attribute = schema.attribute_for_path(key);
        if let Some(attribute) = attribute {
            if attribute.computed && !new.contains_key(key) {
                continue;
            }
            let suppress = attribute
                .diff_suppress
                .is_some_and(|suppress| suppress(key, old_value, new_value, prior));
            if suppress {
                if let Some(collection) = key.strip_suffix('#').or_else(|| key.strip_suffix('%')) {
                    suppressed_prefixes.push(collection.to_string());
                }
                suppressed.push(key.clone());
                continue;
            }
        }

        changes.push(AttributeChange {
            key: key.clone(),
            old: old_value.to_string(),
            new: new_value.to_string(),
            force_new: attribute.is_some_and(|a| a.force_new),
        });
    }

    let kind = if prior.is_new() {
        ChangeKind::Create
    } else if changes.iter().any(|c| c.force_new) {
        ChangeKind::Replace
    } else if !changes.is_empty() {
        ChangeKind::Update
    } else {
        ChangeKind::NoOp
    };

    if !suppressed.is_empty() {
        tracing::debug!(
            "{} {}: suppressed {} diff(s): {}",
            resource_type,
            prior.id(),
            suppressed.len(),
            suppressed.join(", ")
        );
    }

    ResourcePlan {
        resource_type: resource_type.to_string(),
        resource_id: prior.id().to_string(),
        kind,
        changes,
        suppressed,
    }
}

/// Plans for a set of resources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    pub resources: Vec<ResourcePlan>,
}

impl Plan {
    pub fn new(resources: Vec<ResourcePlan>) -> Self {
        Self { resources }
    }

    pub fn has_changes(&self) -> bool {
        self.resources.iter().any(ResourcePlan::has_changes)
    }

    /// Get plans by kind
    pub fn by_kind(&self, kind: ChangeKind) -> Vec<&ResourcePlan> {
        self.resources.iter().filter(|r| r.kind == kind).collect()
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            create: self.by_kind(ChangeKind::Create).len(),
            update: self.by_kind(ChangeKind::Update).len(),
            replace: self.by_kind(ChangeKind::Replace).len(),
            no_change: self.by_kind(ChangeKind::NoOp).len(),
        }
    }
}

/// Summary of planned changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    pub create: usize,
    pub update: usize,
    pub replace: usize,
    pub no_change: usize,
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to create, {} to update, {} to replace, {} unchanged",
            self.create, self.update, self.replace, self.no_change
        )
    }
}
