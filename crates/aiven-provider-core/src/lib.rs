//! Aiven provider core
//!
//! Shared pieces every Aiven resource handler builds on: composite resource
//! identifiers, diff suppression rules, classification of remote read
//! failures, per-operation client timeouts, and the registry that exposes
//! handlers to the host engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  Host engine                     │
//! │          (plan / apply / refresh / import)       │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │              aiven-provider-core                 │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   Provider registry + ResourceHandler     │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌────────────┐ ┌────────────┐ ┌────────────┐  │
//! │  │ identifier │ │    diff    │ │  timeouts  │  │
//! │  └────────────┘ └────────────┘ └────────────┘  │
//! │  ┌────────────┐ ┌────────────┐                 │
//! │  │   exists   │ │   schema   │                 │
//! │  └────────────┘ └────────────┘                 │
//! └───────┬─────────────────────────────────────────┘
//!         │ trait ApiClient
//! ┌───────▼───────────────┐
//! │ aiven-provider-client │
//! └───────────────────────┘
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod diff;
pub mod docs;
pub mod duration;
pub mod error;
pub mod exists;
pub mod identifier;
pub mod plan;
pub mod provider;
pub mod resource_data;
pub mod schema;
pub mod timeouts;

// Re-exports
pub use cache::TopicCache;
pub use config::{ProviderConfig, TOKEN_ENV_VAR};
pub use diff::{
    DiffSuppressFn, create_only_diff_suppress, empty_object_diff_suppress,
    ip_filter_array_diff_suppress, ip_filter_diff_suppress, ip_filter_value_diff_suppress,
};
pub use docs::{SchemaDocument, render_markdown};
pub use error::{ProviderError, RemoteError, Result};
pub use exists::{ReadOutcome, resource_exists};
pub use identifier::{
    ResourceId, build_resource_id, split_resource_id, split_resource_id2, split_resource_id3,
};
pub use plan::{AttributeChange, ChangeKind, Plan, PlanSummary, ResourcePlan, plan_resource};
pub use provider::{
    ApiClient, ApiMethod, ApiRequest, Provider, ProviderBuilder, ProviderContext, ResourceHandler,
};
pub use resource_data::{FlatMap, ResourceData};
pub use schema::{Attribute, Diagnostic, Element, ResourceSchema, Severity, ValueType};
pub use timeouts::{CLIENT_TIMEOUT, TimeoutSpec, client_timeouts_schema, get_timeout};
