//! Aiven API client for the Aiven provider
//!
//! Implements the core [`ApiClient`](aiven_provider_core::ApiClient) trait
//! over the Aiven REST API and builds the
//! [`ProviderContext`](aiven_provider_core::ProviderContext) handlers share.
//!
//! # Example
//!
//! ```ignore
//! use aiven_provider_client::{configure, paths};
//! use aiven_provider_core::{ApiRequest, ProviderConfig, ReadOutcome};
//!
//! let ctx = configure(&ProviderConfig::from_env()?)?;
//! let request = ApiRequest::get(paths::service_path("my-project", "kafka-1"));
//! match ReadOutcome::from(ctx.client().send(request).await) {
//!     ReadOutcome::Found(service) => println!("{}", service["service"]["state"]),
//!     ReadOutcome::Gone => println!("gone"),
//!     ReadOutcome::Failed(err) => return Err(err.into()),
//! }
//! ```

pub mod client;
pub mod error;
pub mod paths;
pub mod provider;

pub use client::AivenClient;
pub use error::{ClientError, Result};
pub use provider::{configure, configure_from};
