//! Bedrock ARN helpers
//!
//! Bedrock ARNs have the shape
//! `arn:<partition>:bedrock:<region>:<account>:<resource-type>/<resource-id>`.
//! Foundation-model ARNs leave `<account>` empty, and resource ids routinely
//! contain `:` (e.g. `anthropic.claude-3-haiku-20240307-v1:0`).

use std::sync::OnceLock;

use regex::Regex;

pub use bedrock_resolver_protocol::ArnKind;

fn bedrock_arn_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^arn:(?P<partition>[^:]+):bedrock:(?P<region>[^:]*):(?P<account>[^:]*):(?P<resource_type>[^/:]+)/(?P<resource_id>.+)$",
        )
        .expect("bedrock ARN regex is valid")
    })
}

/// Components of a Bedrock ARN, borrowed from the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArnParts<'a> {
    /// `aws`, `aws-us-gov`, `aws-cn`, ...
    pub partition: &'a str,
    /// Region, e.g. `us-east-1`
    pub region: &'a str,
    /// Account id; empty for foundation models
    pub account: &'a str,
    /// Resource type, e.g. `inference-profile`
    pub resource_type: &'a str,
    /// Everything after the first `/`
    pub resource_id: &'a str,
}

impl<'a> ArnParts<'a> {
    /// Split a Bedrock ARN into its components.
    ///
    /// Returns `None` when the string is not a Bedrock ARN.
    pub fn parse(arn: &'a str) -> Option<Self> {
        let caps = bedrock_arn_regex().captures(arn)?;
        let group = |name: &str| caps.name(name).map(|m| m.as_str()).unwrap_or_default();
        Some(Self {
            partition: group("partition"),
            region: group("region"),
            account: group("account"),
            resource_type: group("resource_type"),
            resource_id: group("resource_id"),
        })
    }
}

/// Whether an ARN names an inference profile that has to be looked up.
///
/// True iff the string contains `:inference-profile/` or
/// `:application-inference-profile/`. No I/O.
pub fn should_resolve(arn: &str) -> bool {
    ArnKind::of(arn).is_resolvable()
}

/// Extract the model id (`<resource-id>`) from a model ARN.
///
/// ```
/// use bedrock_resolver::arn::extract_model_id;
///
/// let arn = "arn:aws:bedrock:us-east-1:123:foundation-model/anthropic.claude-3-sonnet-20240229-v1:0";
/// assert_eq!(extract_model_id(arn), Some("anthropic.claude-3-sonnet-20240229-v1:0"));
/// ```
pub fn extract_model_id(model_arn: &str) -> Option<&str> {
    ArnParts::parse(model_arn).map(|parts| parts.resource_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("arn:aws:bedrock:eu-west-1:1:inference-profile/x", true)]
    #[case("arn:aws:bedrock:eu-west-1:1:application-inference-profile/x", true)]
    #[case("arn:aws:bedrock:eu-west-1:1:provisioned-model/x", false)]
    #[case("arn:aws:bedrock:eu-west-1:1:default-prompt-router/x", false)]
    #[case("arn:aws:bedrock:us-east-1::foundation-model/x", false)]
    #[case("us.anthropic.claude-3-haiku-20240307-v1:0", false)]
    #[case("", false)]
    fn test_should_resolve(#[case] arn: &str, #[case] expected: bool) {
        assert_eq!(should_resolve(arn), expected);
    }

    #[test]
    fn test_extract_model_id_from_foundation_model_arn() {
        assert_eq!(
            extract_model_id(
                "arn:aws:bedrock:us-east-1:123:foundation-model/anthropic.claude-3-sonnet-20240229-v1:0"
            ),
            Some("anthropic.claude-3-sonnet-20240229-v1:0")
        );
    }

    #[test]
    fn test_extract_model_id_with_empty_account() {
        assert_eq!(
            extract_model_id("arn:aws:bedrock:us-west-2::foundation-model/amazon.nova-pro-v1:0"),
            Some("amazon.nova-pro-v1:0")
        );
    }

    #[rstest]
    #[case("anthropic.claude-3-sonnet-20240229-v1:0")]
    #[case("arn:aws:s3:::bucket/key")]
    #[case("arn:aws:bedrock:us-east-1:123:foundation-model")]
    #[case("arn:aws:bedrock:us-east-1:123:foundation-model/")]
    fn test_extract_model_id_rejects(#[case] arn: &str) {
        assert_eq!(extract_model_id(arn), None);
    }

    #[test]
    fn test_parse_parts() {
        let parts = ArnParts::parse(
            "arn:aws-us-gov:bedrock:us-gov-west-1:123456789012:application-inference-profile/abc123",
        )
        .unwrap();
        assert_eq!(parts.partition, "aws-us-gov");
        assert_eq!(parts.region, "us-gov-west-1");
        assert_eq!(parts.account, "123456789012");
        assert_eq!(parts.resource_type, "application-inference-profile");
        assert_eq!(parts.resource_id, "abc123");
    }
}
