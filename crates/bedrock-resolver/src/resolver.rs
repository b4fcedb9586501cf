//! Inference-profile resolver with an instance-owned cache

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{debug, error};

use bedrock_resolver_protocol::ResolvedModel;

use crate::arn::{extract_model_id, should_resolve};
use crate::client::{BedrockControlPlane, ControlPlane};
use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::observability::{LookupMetadata, log_cache_hit};

/// Resolves inference-profile ARNs to the foundation model they route to.
///
/// Results are cached by ARN string for the lifetime of the resolver. There
/// is no eviction and no invalidation on credential or region change; call
/// [`clear_cache`](Self::clear_cache) to force fresh lookups.
///
/// A resolver whose client failed to build is *disabled*: every
/// [`resolve`](Self::resolve) returns `None` without any network call.
///
/// # Example
///
/// ```rust,no_run
/// use bedrock_resolver::{InferenceProfileResolver, ResolverConfig};
///
/// # async fn example() {
/// let config = ResolverConfig::builder().region("us-east-1").profile("dev").build();
/// let resolver = InferenceProfileResolver::new(&config).await;
///
/// let arn = "arn:aws:bedrock:us-east-1:123456789012:inference-profile/us.anthropic.claude-3-haiku-20240307-v1:0";
/// if let Some(model) = resolver.resolve(arn).await {
///     println!("{} -> {}", arn, model.model_id);
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct InferenceProfileResolver<C = BedrockControlPlane> {
    control_plane: Option<C>,
    cache: RwLock<HashMap<String, ResolvedModel>>,
}

impl InferenceProfileResolver<BedrockControlPlane> {
    /// Build a resolver backed by `aws-sdk-bedrock`.
    ///
    /// Configuration errors are logged and yield a disabled resolver.
    pub async fn new(config: &ResolverConfig) -> Self {
        match Self::try_new(config).await {
            Ok(resolver) => resolver,
            Err(e) => {
                error!(
                    region = %config.region,
                    auth = config.auth.label(),
                    error = %e,
                    "Failed to build Bedrock control-plane client; inference profile resolution disabled"
                );
                Self::disabled()
            }
        }
    }

    /// Build a resolver backed by `aws-sdk-bedrock`, surfacing configuration errors.
    pub async fn try_new(config: &ResolverConfig) -> Result<Self> {
        let settings = config.control_plane_settings()?;
        let control_plane = BedrockControlPlane::connect(&settings).await?;
        Ok(Self::with_control_plane(control_plane))
    }
}

impl<C: ControlPlane> InferenceProfileResolver<C> {
    /// Build a resolver over any control plane.
    pub fn with_control_plane(control_plane: C) -> Self {
        Self {
            control_plane: Some(control_plane),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Build a resolver that never resolves anything.
    pub fn disabled() -> Self {
        Self {
            control_plane: None,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Whether a control-plane client is available.
    pub fn is_enabled(&self) -> bool {
        self.control_plane.is_some()
    }

    /// Whether `arn` names an inference profile; see [`crate::arn::should_resolve`].
    pub fn should_resolve(&self, arn: &str) -> bool {
        should_resolve(arn)
    }

    /// Resolve `arn` to its foundation model.
    ///
    /// Returns the cached value when present; otherwise performs one lookup.
    /// Every failure is logged and reported as `None`.
    pub async fn resolve(&self, arn: &str) -> Option<ResolvedModel> {
        match self.try_resolve(arn).await {
            Ok(model) => Some(model),
            Err(Error::Disabled) => {
                debug!(arn = %arn, "Skipping lookup; resolver is disabled");
                None
            }
            Err(_) => None,
        }
    }

    /// Resolve `arn`, keeping the reason for failure.
    ///
    /// # Errors
    ///
    /// - [`Error::Disabled`] if the resolver has no client
    /// - [`Error::Lookup`] if the control-plane request failed
    /// - [`Error::NoModels`] if the profile lists no models
    /// - [`Error::MalformedModelArn`] if the first model's ARN is missing or unparseable
    pub async fn try_resolve(&self, arn: &str) -> Result<ResolvedModel> {
        let control_plane = self.control_plane.as_ref().ok_or(Error::Disabled)?;

        if let Some(model) = self.cached(arn).await {
            log_cache_hit(arn, &model);
            return Ok(model);
        }

        let lookup = LookupMetadata::start(arn);
        let result = Self::lookup(control_plane, arn).await;

        match result {
            Ok(model) => {
                // A concurrent miss may have populated the entry first; keep that one.
                let model = self
                    .cache
                    .write()
                    .await
                    .entry(arn.to_string())
                    .or_insert(model)
                    .clone();
                lookup.log_success(&model);
                Ok(model)
            }
            Err(e) => {
                lookup.log_failure(&e);
                Err(e)
            }
        }
    }

    async fn lookup(control_plane: &C, arn: &str) -> Result<ResolvedModel> {
        let models = control_plane.inference_profile_models(arn).await?;
        let first = models
            .first()
            .ok_or_else(|| Error::NoModels(arn.to_string()))?;
        let model_arn = first
            .model_arn
            .as_deref()
            .ok_or_else(|| Error::MalformedModelArn("<missing>".to_string()))?;
        let model_id = extract_model_id(model_arn)
            .ok_or_else(|| Error::MalformedModelArn(model_arn.to_string()))?;

        Ok(ResolvedModel::new(model_id, model_arn))
    }

    /// Cached result for `arn`, without any lookup.
    pub async fn cached(&self, arn: &str) -> Option<ResolvedModel> {
        self.cache.read().await.get(arn).cloned()
    }

    /// Number of cached ARNs.
    pub async fn cache_len(&self) -> usize {
        self.cache.read().await.len()
    }

    /// Drop every cached result.
    pub async fn clear_cache(&self) {
        let mut cache = self.cache.write().await;
        debug!(entries = cache.len(), "Clearing inference profile cache");
        cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ProfileModel;
    use crate::testing::MockControlPlane;
    use pretty_assertions::assert_eq;

    const PROFILE_ARN: &str =
        "arn:aws:bedrock:us-east-1:123456789012:inference-profile/us.anthropic.claude-3-sonnet-20240229-v1:0";
    const MODEL_ARN: &str =
        "arn:aws:bedrock:us-east-1:123:foundation-model/anthropic.claude-3-sonnet-20240229-v1:0";

    async fn resolver_with_profile() -> (InferenceProfileResolver<MockControlPlane>, MockControlPlane) {
        let mock = MockControlPlane::new();
        mock.set_profile(PROFILE_ARN, vec![ProfileModel::new(MODEL_ARN)])
            .await;
        (
            InferenceProfileResolver::with_control_plane(mock.clone()),
            mock,
        )
    }

    #[tokio::test]
    async fn test_resolve_extracts_model_id() {
        let (resolver, _) = resolver_with_profile().await;
        let model = resolver.resolve(PROFILE_ARN).await.unwrap();
        assert_eq!(model.model_id, "anthropic.claude-3-sonnet-20240229-v1:0");
        assert_eq!(model.model_arn, MODEL_ARN);
    }

    #[tokio::test]
    async fn test_second_resolve_hits_cache() {
        let (resolver, mock) = resolver_with_profile().await;

        let first = resolver.resolve(PROFILE_ARN).await.unwrap();
        let second = resolver.resolve(PROFILE_ARN).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_new_lookup() {
        let (resolver, mock) = resolver_with_profile().await;

        resolver.resolve(PROFILE_ARN).await.unwrap();
        resolver.clear_cache().await;
        assert_eq!(resolver.cache_len().await, 0);

        resolver.resolve(PROFILE_ARN).await.unwrap();
        assert_eq!(mock.call_count().await, 2);
    }

    #[tokio::test]
    async fn test_uses_first_model_only() {
        let mock = MockControlPlane::new();
        mock.set_profile(
            PROFILE_ARN,
            vec![
                ProfileModel::new("arn:aws:bedrock:us-east-1::foundation-model/first.model-v1:0"),
                ProfileModel::new("arn:aws:bedrock:us-west-2::foundation-model/second.model-v1:0"),
            ],
        )
        .await;
        let resolver = InferenceProfileResolver::with_control_plane(mock);

        let model = resolver.resolve(PROFILE_ARN).await.unwrap();
        assert_eq!(model.model_id, "first.model-v1:0");
    }

    #[tokio::test]
    async fn test_no_models_returns_none_and_does_not_cache() {
        let mock = MockControlPlane::new();
        mock.set_profile(PROFILE_ARN, vec![]).await;
        let resolver = InferenceProfileResolver::with_control_plane(mock.clone());

        assert_eq!(resolver.resolve(PROFILE_ARN).await, None);
        assert_eq!(resolver.cache_len().await, 0);
        assert!(matches!(
            resolver.try_resolve(PROFILE_ARN).await,
            Err(Error::NoModels(_))
        ));
        assert_eq!(mock.call_count().await, 2);
    }

    #[tokio::test]
    async fn test_missing_model_arn_is_malformed() {
        let mock = MockControlPlane::new();
        mock.set_profile(PROFILE_ARN, vec![ProfileModel { model_arn: None }])
            .await;
        let resolver = InferenceProfileResolver::with_control_plane(mock);

        assert!(matches!(
            resolver.try_resolve(PROFILE_ARN).await,
            Err(Error::MalformedModelArn(_))
        ));
    }

    #[tokio::test]
    async fn test_unparseable_model_arn_is_malformed() {
        let mock = MockControlPlane::new();
        mock.set_profile(PROFILE_ARN, vec![ProfileModel::new("not-an-arn")])
            .await;
        let resolver = InferenceProfileResolver::with_control_plane(mock);

        assert_eq!(resolver.resolve(PROFILE_ARN).await, None);
        assert!(matches!(
            resolver.try_resolve(PROFILE_ARN).await,
            Err(Error::MalformedModelArn(arn)) if arn == "not-an-arn"
        ));
    }

    #[tokio::test]
    async fn test_lookup_failure_returns_none() {
        let mock = MockControlPlane::new();
        mock.set_failure(PROFILE_ARN, "AccessDeniedException").await;
        let resolver = InferenceProfileResolver::with_control_plane(mock);

        assert_eq!(resolver.resolve(PROFILE_ARN).await, None);
        assert!(matches!(
            resolver.try_resolve(PROFILE_ARN).await,
            Err(Error::Lookup(msg)) if msg.contains("AccessDenied")
        ));
        assert_eq!(resolver.cache_len().await, 0);
    }

    #[tokio::test]
    async fn test_disabled_resolver_never_calls_out() {
        let resolver = InferenceProfileResolver::<MockControlPlane>::disabled();
        assert!(!resolver.is_enabled());
        assert_eq!(resolver.resolve(PROFILE_ARN).await, None);
        assert!(matches!(
            resolver.try_resolve(PROFILE_ARN).await,
            Err(Error::Disabled)
        ));
    }

    #[tokio::test]
    async fn test_bad_config_yields_disabled_resolver() {
        let config = ResolverConfig::builder()
            .region("us-east-1")
            .static_keys("AKIA", "", None)
            .build();
        let resolver = InferenceProfileResolver::new(&config).await;

        assert!(!resolver.is_enabled());
        for _ in 0..3 {
            assert_eq!(resolver.resolve(PROFILE_ARN).await, None);
        }
        assert!(matches!(
            InferenceProfileResolver::try_new(&config).await,
            Err(Error::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_should_resolve_delegates() {
        let resolver = InferenceProfileResolver::<MockControlPlane>::disabled();
        assert!(resolver.should_resolve(PROFILE_ARN));
        assert!(!resolver.should_resolve("arn:aws:bedrock:us-east-1:1:provisioned-model/x"));
    }
}
