//! Headless view-model for the ARN field of a settings panel
//!
//! The panel owns the ARN text, its validation result and a
//! [`ResolutionState`]. Editing the ARN resets the state to
//! [`ResolutionState::Idle`] before anything else happens; a valid,
//! resolvable ARN then produces a [`ResolveArnRequest`].
//!
//! Responses carry the ARN they were made for. [`SettingsPanel::apply`]
//! drops responses for any ARN other than the current one, so an answer to
//! an earlier edit that arrives late cannot overwrite the state.

use std::sync::Arc;

use bedrock_resolver_protocol::{ResolveArnRequest, ResolveArnResponse, ResolveOutcome};
use tracing::debug;

use crate::arn::should_resolve;
use crate::client::{BedrockControlPlane, ControlPlane};
use crate::resolver::InferenceProfileResolver;
use crate::service::handle_resolve_request;
use crate::validation::{ArnValidation, ArnValidator, ShapeValidator};

/// What the panel shows under the ARN field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolutionState {
    /// Nothing to show
    #[default]
    Idle,
    /// A lookup is in flight
    Resolving,
    /// The profile routes to `model_id`
    Resolved {
        /// Resolved model id
        model_id: String,
    },
    /// The lookup failed
    Error {
        /// Message to display
        message: String,
    },
}

impl ResolutionState {
    /// Whether a lookup is in flight
    pub fn is_resolving(&self) -> bool {
        matches!(self, ResolutionState::Resolving)
    }
}

/// Settings panel state for a custom Bedrock ARN.
pub struct SettingsPanel<C = BedrockControlPlane, V = ShapeValidator> {
    resolver: Arc<InferenceProfileResolver<C>>,
    validator: V,
    region: String,
    arn: String,
    validation: ArnValidation,
    state: ResolutionState,
}

impl<C: ControlPlane> SettingsPanel<C, ShapeValidator> {
    /// Panel using the structural ARN validator.
    pub fn new(resolver: Arc<InferenceProfileResolver<C>>, region: impl Into<String>) -> Self {
        Self::with_validator(resolver, ShapeValidator, region)
    }
}

impl<C: ControlPlane, V: ArnValidator> SettingsPanel<C, V> {
    /// Panel using a custom validator.
    pub fn with_validator(
        resolver: Arc<InferenceProfileResolver<C>>,
        validator: V,
        region: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            validator,
            region: region.into(),
            arn: String::new(),
            validation: ArnValidation::valid(),
            state: ResolutionState::Idle,
        }
    }

    /// Current ARN text
    pub fn arn(&self) -> &str {
        &self.arn
    }

    /// Current resolution state
    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Validation error or warning for the current ARN
    pub fn validation_error(&self) -> Option<&str> {
        self.validation.error_message.as_deref()
    }

    /// Whether the current ARN passed validation
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }

    /// Resolver shared with other panels
    pub fn resolver(&self) -> &Arc<InferenceProfileResolver<C>> {
        &self.resolver
    }

    fn resolvable_arn(&self) -> Option<&str> {
        let arn = self.arn.trim();
        (!arn.is_empty() && self.validation.is_valid && should_resolve(arn)).then_some(arn)
    }

    /// Record an edit of the ARN field.
    ///
    /// Returns the request to send when the new value should be resolved.
    pub fn set_arn(&mut self, arn: impl Into<String>) -> Option<ResolveArnRequest> {
        self.arn = arn.into();
        self.state = ResolutionState::Idle;
        self.validation = self.validator.validate(self.arn.trim(), &self.region);

        let request = ResolveArnRequest::new(self.resolvable_arn()?);
        self.state = ResolutionState::Resolving;
        Some(request)
    }

    /// Explicit user request to resolve the current ARN again.
    ///
    /// Ignored while a lookup is in flight or when the ARN is not resolvable.
    pub fn refresh(&mut self) -> Option<ResolveArnRequest> {
        if self.state.is_resolving() {
            return None;
        }
        let request = ResolveArnRequest::refresh(self.resolvable_arn()?);
        self.state = ResolutionState::Resolving;
        Some(request)
    }

    /// Apply a response; returns `false` if it was stale and discarded.
    pub fn apply(&mut self, response: ResolveArnResponse) -> bool {
        if response.is_stale_for(self.arn.trim()) {
            debug!(
                response_arn = %response.arn,
                current_arn = %self.arn.trim(),
                "Discarding stale resolve response"
            );
            return false;
        }

        self.state = match response.outcome {
            ResolveOutcome::Resolved(model) => ResolutionState::Resolved {
                model_id: model.model_id,
            },
            ResolveOutcome::Error { message } => ResolutionState::Error { message },
        };
        true
    }

    /// Edit the ARN and, if needed, resolve it in place.
    pub async fn on_arn_changed(&mut self, arn: impl Into<String>) {
        if let Some(request) = self.set_arn(arn) {
            let response = handle_resolve_request(&self.resolver, request).await;
            self.apply(response);
        }
    }

    /// Handle the refresh action in place.
    pub async fn on_refresh(&mut self) {
        if let Some(request) = self.refresh() {
            let response = handle_resolve_request(&self.resolver, request).await;
            self.apply(response);
        }
    }
}
