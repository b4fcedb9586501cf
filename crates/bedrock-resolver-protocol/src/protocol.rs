//! Resolve request/response messages
//!
//! A settings surface sends a [`ResolveArnRequest`] and receives a
//! [`ResolveArnResponse`] carrying the same ARN back, so a receiver can tell
//! which edit a late response belongs to.

use crate::error::{ProtocolError, Result};
use crate::model::ResolvedModel;
use serde::{Deserialize, Serialize};

/// Ask for the foundation model behind an ARN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveArnRequest {
    /// ARN as entered by the user
    pub arn: String,

    /// Drop any cached result and look the ARN up again
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub force_refresh: bool,
}

impl ResolveArnRequest {
    /// Create a request that may be answered from cache
    pub fn new(arn: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            force_refresh: false,
        }
    }

    /// Create a request that bypasses the cache
    pub fn refresh(arn: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            force_refresh: true,
        }
    }

    /// Parse a request from JSON, rejecting blank ARNs
    pub fn from_json(json: &str) -> Result<Self> {
        let request: Self = serde_json::from_str(json)?;
        if request.arn.trim().is_empty() {
            return Err(ProtocolError::InvalidMessage(
                "arn must not be empty".to_string(),
            ));
        }
        Ok(request)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Outcome of a resolve request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ResolveOutcome {
    /// The ARN was resolved
    Resolved(ResolvedModel),
    /// The ARN could not be resolved
    Error {
        /// Human-readable reason
        message: String,
    },
}

/// Answer to a [`ResolveArnRequest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveArnResponse {
    /// ARN the request was made for
    pub arn: String,

    /// Result of the lookup
    pub outcome: ResolveOutcome,
}

impl ResolveArnResponse {
    /// Successful response
    pub fn resolved(arn: impl Into<String>, model: ResolvedModel) -> Self {
        Self {
            arn: arn.into(),
            outcome: ResolveOutcome::Resolved(model),
        }
    }

    /// Failed response
    pub fn error(arn: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            outcome: ResolveOutcome::Error {
                message: message.into(),
            },
        }
    }

    /// Resolved model id, if any
    pub fn model_id(&self) -> Option<&str> {
        match &self.outcome {
            ResolveOutcome::Resolved(model) => Some(&model.model_id),
            ResolveOutcome::Error { .. } => None,
        }
    }

    /// Error message, if any
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            ResolveOutcome::Error { message } => Some(message),
            ResolveOutcome::Resolved(_) => None,
        }
    }

    /// True when this response was produced for a different ARN than `current`
    pub fn is_stale_for(&self, current: &str) -> bool {
        self.arn != current
    }

    /// Parse a response from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
