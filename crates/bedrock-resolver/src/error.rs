//! Error types for the resolver
//!
//! Every variant is non-fatal. The public [`resolve`](crate::InferenceProfileResolver::resolve)
//! entry point logs these and returns `None`; [`try_resolve`](crate::InferenceProfileResolver::try_resolve)
//! hands them to the caller for diagnostics.

use thiserror::Error;

/// Result type alias for resolver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the resolver.
#[derive(Debug, Error)]
pub enum Error {
    /// The control-plane client could not be configured.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The resolver was disabled when its client failed to build.
    #[error("Resolver is disabled: no control-plane client available")]
    Disabled,

    /// The ARN does not name an inference profile.
    #[error("ARN is not an inference profile: {0}")]
    NotResolvable(String),

    /// The control-plane request failed (network, auth, not found, ...).
    #[error("Inference profile lookup failed: {0}")]
    Lookup(String),

    /// The profile lists no models.
    #[error("Inference profile {0} has no associated models")]
    NoModels(String),

    /// The first model ARN is missing or has no resource id.
    #[error("Cannot extract model id from ARN: {0}")]
    MalformedModelArn(String),

    /// Protocol message error.
    #[error(transparent)]
    Protocol(#[from] bedrock_resolver_protocol::ProtocolError),
}
