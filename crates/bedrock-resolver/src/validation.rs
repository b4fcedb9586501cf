//! ARN validation seam
//!
//! The settings panel accepts any [`ArnValidator`]. [`ShapeValidator`] is the
//! default: it only checks that the input splits into Bedrock ARN components
//! and warns when the ARN's region differs from the configured one.

use crate::arn::ArnParts;

/// Outcome of validating an ARN.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArnValidation {
    /// Whether the ARN may be used
    pub is_valid: bool,
    /// Error (when invalid) or warning (when valid) to show next to the field
    pub error_message: Option<String>,
}

impl ArnValidation {
    /// Valid, nothing to show
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    /// Valid, with a warning
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            error_message: Some(message.into()),
        }
    }

    /// Invalid
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
        }
    }
}

/// Checks an ARN entered for a given region.
pub trait ArnValidator: Send + Sync {
    /// Validate `arn` against the region the resolver is configured for.
    fn validate(&self, arn: &str, region: &str) -> ArnValidation;
}

impl<F> ArnValidator for F
where
    F: Fn(&str, &str) -> ArnValidation + Send + Sync,
{
    fn validate(&self, arn: &str, region: &str) -> ArnValidation {
        self(arn, region)
    }
}

/// Structural validator for Bedrock ARNs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeValidator;

impl ArnValidator for ShapeValidator {
    fn validate(&self, arn: &str, region: &str) -> ArnValidation {
        let arn = arn.trim();
        if arn.is_empty() {
            return ArnValidation::valid();
        }

        let Some(parts) = ArnParts::parse(arn) else {
            return ArnValidation::invalid(
                "Invalid ARN format. Expected arn:<partition>:bedrock:<region>:<account>:<resource-type>/<resource-id>",
            );
        };

        if !region.is_empty() && !parts.region.is_empty() && parts.region != region {
            return ArnValidation::warning(format!(
                "ARN region {} does not match the selected region {}; the ARN's region will be used",
                parts.region, region
            ));
        }

        ArnValidation::valid()
    }
}
