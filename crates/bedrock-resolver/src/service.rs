//! Request handler for the resolve message contract
//!
//! A host UI that talks to the resolver over a message channel sends
//! [`ResolveArnRequest`]s and gets [`ResolveArnResponse`]s back. The response
//! echoes the request ARN unchanged so the receiver can drop stale answers.

use bedrock_resolver_protocol::{ArnKind, ResolveArnRequest, ResolveArnResponse, ResolvedModel};
use tracing::debug;

use crate::arn::should_resolve;
use crate::client::ControlPlane;
use crate::error::{Error, Result};
use crate::resolver::InferenceProfileResolver;

/// Message shown when a lookup fails for any reason.
pub const UNRESOLVED_MESSAGE: &str =
    "Could not resolve the inference profile to a model. Check the ARN, region and credentials.";

/// Message shown when the ARN is not an inference profile.
pub const NOT_RESOLVABLE_MESSAGE: &str =
    "Only inference-profile and application-inference-profile ARNs can be resolved.";

/// Answer one resolve request.
///
/// `force_refresh` clears the resolver cache before the lookup.
pub async fn handle_resolve_request<C: ControlPlane>(
    resolver: &InferenceProfileResolver<C>,
    request: ResolveArnRequest,
) -> ResolveArnResponse {
    match resolve_request(resolver, &request).await {
        Ok(model) => ResolveArnResponse::resolved(request.arn, model),
        Err(Error::NotResolvable(_)) => ResolveArnResponse::error(request.arn, NOT_RESOLVABLE_MESSAGE),
        Err(_) => ResolveArnResponse::error(request.arn, UNRESOLVED_MESSAGE),
    }
}

async fn resolve_request<C: ControlPlane>(
    resolver: &InferenceProfileResolver<C>,
    request: &ResolveArnRequest,
) -> Result<ResolvedModel> {
    let arn = request.arn.trim();

    if !should_resolve(arn) {
        debug!(arn = %arn, kind = %ArnKind::of(arn), "Not an inference profile; skipping lookup");
        return Err(Error::NotResolvable(arn.to_string()));
    }

    if request.force_refresh {
        resolver.clear_cache().await;
    }

    resolver.try_resolve(arn).await
}

/// Answer one JSON-encoded resolve request with a JSON-encoded response.
///
/// # Errors
///
/// Returns [`crate::Error::Protocol`] if the request cannot be decoded.
pub async fn handle_resolve_json<C: ControlPlane>(
    resolver: &InferenceProfileResolver<C>,
    request: &str,
) -> Result<String> {
    let request = ResolveArnRequest::from_json(request)?;
    let response = handle_resolve_request(resolver, request).await;
    Ok(response.to_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ProfileModel;
    use crate::error::Error;
    use crate::testing::MockControlPlane;

    const PROFILE_ARN: &str =
        "arn:aws:bedrock:eu-west-1:123456789012:application-inference-profile/k3j2h1";
    const MODEL_ARN: &str =
        "arn:aws:bedrock:eu-west-1::foundation-model/anthropic.claude-3-haiku-20240307-v1:0";

    async fn setup() -> (InferenceProfileResolver<MockControlPlane>, MockControlPlane) {
        let mock = MockControlPlane::new();
        mock.set_profile(PROFILE_ARN, vec![ProfileModel::new(MODEL_ARN)])
            .await;
        (InferenceProfileResolver::with_control_plane(mock.clone()), mock)
    }

    #[tokio::test]
    async fn test_resolved_response_echoes_arn() {
        let (resolver, _) = setup().await;
        let response = handle_resolve_request(&resolver, ResolveArnRequest::new(PROFILE_ARN)).await;
        assert_eq!(response.arn, PROFILE_ARN);
        assert_eq!(
            response.model_id(),
            Some("anthropic.claude-3-haiku-20240307-v1:0")
        );
    }

    #[tokio::test]
    async fn test_non_profile_arn_skips_lookup() {
        let (resolver, mock) = setup().await;
        let response = handle_resolve_request(
            &resolver,
            ResolveArnRequest::new("arn:aws:bedrock:eu-west-1:1:provisioned-model/x"),
        )
        .await;
        assert_eq!(response.error_message(), Some(NOT_RESOLVABLE_MESSAGE));
        assert_eq!(mock.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_non_profile_arn_is_not_resolvable() {
        let (resolver, _) = setup().await;
        let arn = "arn:aws:bedrock:eu-west-1::foundation-model/anthropic.claude-3-haiku-20240307-v1:0";
        let err = resolve_request(&resolver, &ResolveArnRequest::new(arn))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotResolvable(ref a) if a == arn));
    }

    #[tokio::test]
    async fn test_failure_is_generic() {
        let (resolver, _) = setup().await;
        let arn = "arn:aws:bedrock:eu-west-1:1:inference-profile/missing";
        let response = handle_resolve_request(&resolver, ResolveArnRequest::new(arn)).await;
        assert_eq!(response.error_message(), Some(UNRESOLVED_MESSAGE));
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_cache() {
        let (resolver, mock) = setup().await;
        handle_resolve_request(&resolver, ResolveArnRequest::new(PROFILE_ARN)).await;
        handle_resolve_request(&resolver, ResolveArnRequest::new(PROFILE_ARN)).await;
        assert_eq!(mock.call_count().await, 1);

        handle_resolve_request(&resolver, ResolveArnRequest::refresh(PROFILE_ARN)).await;
        assert_eq!(mock.call_count().await, 2);
    }

    #[tokio::test]
    async fn test_json_request_handling() {
        let (resolver, _) = setup().await;
        let json = handle_resolve_json(&resolver, &format!(r#"{{"arn":"{}"}}"#, PROFILE_ARN))
            .await
            .unwrap();
        let response = ResolveArnResponse::from_json(&json).unwrap();
        assert!(response.model_id().is_some());

        let err = handle_resolve_json(&resolver, "{").await.unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }
}
