//! Resolved model and ARN kind types

use serde::{Deserialize, Serialize};

/// Foundation model an inference profile routes to.
///
/// Produced once per distinct ARN and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModel {
    /// Model identifier, e.g. `anthropic.claude-3-sonnet-20240229-v1:0`
    pub model_id: String,

    /// Full ARN of the model as reported by Bedrock
    pub model_arn: String,
}

impl ResolvedModel {
    /// Create a resolved model from its identifier and ARN
    pub fn new(model_id: impl Into<String>, model_arn: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            model_arn: model_arn.into(),
        }
    }
}

/// Kind of Bedrock resource an ARN points at, judged by its resource-type segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArnKind {
    /// System-defined (cross-region) inference profile
    InferenceProfile,
    /// Application inference profile created in the account
    ApplicationInferenceProfile,
    /// Provisioned throughput model
    ProvisionedModel,
    /// Default prompt router
    DefaultPromptRouter,
    /// Foundation model
    FoundationModel,
    /// Custom (fine-tuned or imported) model
    CustomModel,
    /// Anything else, including plain model IDs
    Other,
}

impl ArnKind {
    const MARKERS: [(&'static str, ArnKind); 6] = [
        (
            ":application-inference-profile/",
            ArnKind::ApplicationInferenceProfile,
        ),
        (":inference-profile/", ArnKind::InferenceProfile),
        (":provisioned-model/", ArnKind::ProvisionedModel),
        (":default-prompt-router/", ArnKind::DefaultPromptRouter),
        (":foundation-model/", ArnKind::FoundationModel),
        (":custom-model/", ArnKind::CustomModel),
    ];

    /// Classify an ARN by the resource-type marker it contains
    pub fn of(arn: &str) -> Self {
        Self::MARKERS
            .iter()
            .find(|(marker, _)| arn.contains(marker))
            .map(|(_, kind)| *kind)
            .unwrap_or(ArnKind::Other)
    }

    /// Whether ARNs of this kind are looked up through the inference-profile API
    pub fn is_resolvable(self) -> bool {
        matches!(
            self,
            ArnKind::InferenceProfile | ArnKind::ApplicationInferenceProfile
        )
    }

    /// Resource-type segment as written in the ARN
    pub fn as_str(self) -> &'static str {
        match self {
            ArnKind::InferenceProfile => "inference-profile",
            ArnKind::ApplicationInferenceProfile => "application-inference-profile",
            ArnKind::ProvisionedModel => "provisioned-model",
            ArnKind::DefaultPromptRouter => "default-prompt-router",
            ArnKind::FoundationModel => "foundation-model",
            ArnKind::CustomModel => "custom-model",
            ArnKind::Other => "other",
        }
    }
}

impl std::fmt::Display for ArnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
