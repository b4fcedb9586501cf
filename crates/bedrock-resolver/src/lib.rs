//! # Bedrock Resolver
//!
//! Resolve AWS Bedrock inference-profile ARNs to the foundation model they
//! route to:
//! - ARN classification and model-id extraction
//! - One `GetInferenceProfile` call per uncached ARN, no retries
//! - Instance-owned result cache
//! - API-key, named-profile, static-key or default-chain authentication
//! - A headless settings-panel view-model that discards stale responses
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bedrock_resolver::{InferenceProfileResolver, ResolverConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ResolverConfig::builder()
//!         .region("us-east-1")
//!         .profile("default")
//!         .build();
//!     let resolver = InferenceProfileResolver::new(&config).await;
//!
//!     let arn = "arn:aws:bedrock:us-east-1:123456789012:application-inference-profile/a1b2c3";
//!     if resolver.should_resolve(arn) {
//!         match resolver.resolve(arn).await {
//!             Some(model) => println!("{}", model.model_id),
//!             None => eprintln!("could not resolve {}", arn),
//!         }
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use bedrock_resolver_protocol::{
    ArnKind, ResolveArnRequest, ResolveArnResponse, ResolveOutcome, ResolvedModel,
};
pub use client::{BedrockControlPlane, ControlPlane, ProfileModel};
pub use config::{AuthMode, ControlPlaneSettings, ProviderSettings, ResolverConfig};
pub use error::{Error, Result};
pub use panel::{ResolutionState, SettingsPanel};
pub use resolver::InferenceProfileResolver;
pub use validation::{ArnValidation, ArnValidator, ShapeValidator};

// Module declarations
pub mod arn;
pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod panel;
pub mod resolver;
pub mod service;
pub mod testing;
pub mod validation;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use bedrock_resolver::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Error, InferenceProfileResolver, ResolutionState, ResolvedModel, ResolverConfig, Result,
        SettingsPanel,
        arn::{extract_model_id, should_resolve},
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
