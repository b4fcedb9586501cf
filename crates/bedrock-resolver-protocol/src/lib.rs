//! Shared message types for Bedrock inference-profile ARN resolution
//!
//! This crate holds the data exchanged between a settings surface and the
//! resolver that runs behind it. Nothing here performs I/O.
//!
//! # Type Organization
//!
//! - **Model types**: [`model`] - resolved models and ARN kinds
//! - **Messages**: [`protocol`] - resolve requests and responses
//! - **Error types**: [`error`] - protocol errors
//!
//! # Usage
//!
//! ```
//! use bedrock_resolver_protocol::{ResolveArnRequest, ResolveArnResponse, ResolvedModel};
//!
//! let arn = "arn:aws:bedrock:us-east-1:123456789012:inference-profile/us.anthropic.claude-3-haiku-20240307-v1:0";
//! let request = ResolveArnRequest::new(arn);
//! let response = ResolveArnResponse::resolved(
//!     &request.arn,
//!     ResolvedModel::new(
//!         "anthropic.claude-3-haiku-20240307-v1:0",
//!         "arn:aws:bedrock:us-east-1::foundation-model/anthropic.claude-3-haiku-20240307-v1:0",
//!     ),
//! );
//! assert_eq!(response.model_id(), Some("anthropic.claude-3-haiku-20240307-v1:0"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod protocol;

pub use error::{ProtocolError, Result};
pub use model::{ArnKind, ResolvedModel};
pub use protocol::{ResolveArnRequest, ResolveArnResponse, ResolveOutcome};
