//! Configuration for the resolver's control-plane client
//!
//! Settings arrive as loosely-typed form fields ([`ProviderSettings`]). They
//! are folded into a [`ResolverConfig`] carrying exactly one [`AuthMode`], and
//! checked into a [`ControlPlaneSettings`] that the client is built from. Both
//! steps are pure so they can be tested without touching AWS.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Region used when nothing else is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default timeout for a single lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn secret(value: impl Into<String>) -> SecretString {
    SecretString::new(value.into().into_boxed_str())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn non_blank_secret(value: Option<&SecretString>) -> Option<&SecretString> {
    value.filter(|v| !v.expose_secret().trim().is_empty())
}

/// How the control-plane client authenticates. Exactly one applies.
#[derive(Debug, Clone, Default)]
pub enum AuthMode {
    /// Bedrock API key sent as a bearer token
    ApiKey(SecretString),

    /// Named profile from the shared AWS config/credentials files
    Profile(String),

    /// Static access key pair, optionally with a session token
    StaticKeys {
        /// Access key id
        access_key_id: String,
        /// Secret access key
        secret_access_key: SecretString,
        /// Session token for temporary credentials
        session_token: Option<SecretString>,
    },

    /// SDK default credential chain
    #[default]
    Default,
}

impl AuthMode {
    /// Short name for logs; never includes secret material.
    pub fn label(&self) -> &'static str {
        match self {
            AuthMode::ApiKey(_) => "api-key",
            AuthMode::Profile(_) => "profile",
            AuthMode::StaticKeys { .. } => "static-keys",
            AuthMode::Default => "default-chain",
        }
    }
}

/// Raw provider settings as edited in the settings panel.
///
/// Flags decide which of the overlapping fields are honoured; see
/// [`ResolverConfig::from_settings`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    /// AWS region
    pub region: Option<String>,

    /// Bedrock API key
    pub api_key: Option<SecretString>,

    /// Authenticate with `api_key`
    pub use_api_key: bool,

    /// Authenticate with `profile`
    pub use_profile: bool,

    /// Named AWS profile
    pub profile: Option<String>,

    /// Static access key id
    pub access_key_id: Option<String>,

    /// Static secret access key
    pub secret_access_key: Option<SecretString>,

    /// Session token for temporary credentials
    pub session_token: Option<SecretString>,

    /// Custom control-plane endpoint (VPC endpoint, proxy, test server)
    pub endpoint_url: Option<String>,

    /// Use `endpoint_url`
    pub use_endpoint: bool,
}

/// Configuration for the resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// AWS region the control-plane client targets
    pub region: String,

    /// Authentication mode
    pub auth: AuthMode,

    /// Endpoint override; `None` uses the SDK's default endpoint
    pub endpoint_url: Option<String>,

    /// Timeout for a single lookup
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            auth: AuthMode::Default,
            endpoint_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    /// Create a configuration for a region using the default credential chain.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Default::default()
        }
    }

    /// Create a new builder.
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::default()
    }

    /// Fold panel settings into a configuration.
    ///
    /// Authentication is picked in priority order:
    /// 1. API key, when enabled and non-empty
    /// 2. Named profile, when enabled and non-empty
    /// 3. Static keys, when both access key id and secret are non-empty
    /// 4. Default credential chain
    ///
    /// The endpoint applies only when enabled and non-empty.
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let region = non_blank(settings.region.as_deref())
            .unwrap_or(DEFAULT_REGION)
            .to_string();

        let api_key = non_blank_secret(settings.api_key.as_ref()).filter(|_| settings.use_api_key);
        let profile = non_blank(settings.profile.as_deref()).filter(|_| settings.use_profile);
        let access_key_id = non_blank(settings.access_key_id.as_deref());
        let secret_access_key = non_blank_secret(settings.secret_access_key.as_ref());

        let auth = if let Some(key) = api_key {
            AuthMode::ApiKey(key.clone())
        } else if let Some(profile) = profile {
            AuthMode::Profile(profile.to_string())
        } else if let (Some(access_key_id), Some(secret_access_key)) =
            (access_key_id, secret_access_key)
        {
            AuthMode::StaticKeys {
                access_key_id: access_key_id.to_string(),
                secret_access_key: secret_access_key.clone(),
                session_token: non_blank_secret(settings.session_token.as_ref()).cloned(),
            }
        } else {
            AuthMode::Default
        };

        let endpoint_url = non_blank(settings.endpoint_url.as_deref())
            .filter(|_| settings.use_endpoint)
            .map(str::to_string);

        Self {
            region,
            auth,
            endpoint_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `AWS_REGION`, then `AWS_DEFAULT_REGION`
    /// - `AWS_BEARER_TOKEN_BEDROCK` for API-key authentication
    /// - `AWS_PROFILE` for a named profile
    /// - `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_SESSION_TOKEN`
    /// - `BEDROCK_ENDPOINT_URL` for an endpoint override
    /// - `BEDROCK_RESOLVER_TIMEOUT` for the lookup timeout (in seconds)
    ///
    /// A `.env` file in the working directory is read first, if present.
    #[cfg(feature = "env")]
    pub fn from_env() -> Self {
        use std::env;

        let _ = dotenvy::dotenv();
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        let region = var("AWS_REGION").or_else(|| var("AWS_DEFAULT_REGION"));
        if region.is_none() {
            tracing::warn!("No AWS region specified, defaulting to {}", DEFAULT_REGION);
        }

        let api_key = var("AWS_BEARER_TOKEN_BEDROCK");
        let profile = var("AWS_PROFILE");
        let endpoint_url = var("BEDROCK_ENDPOINT_URL");

        let settings = ProviderSettings {
            region,
            use_api_key: api_key.is_some(),
            api_key: api_key.map(secret),
            use_profile: profile.is_some(),
            profile,
            access_key_id: var("AWS_ACCESS_KEY_ID"),
            secret_access_key: var("AWS_SECRET_ACCESS_KEY").map(secret),
            session_token: var("AWS_SESSION_TOKEN").map(secret),
            use_endpoint: endpoint_url.is_some(),
            endpoint_url,
        };

        let mut config = Self::from_settings(&settings);

        if let Some(timeout_secs) = var("BEDROCK_RESOLVER_TIMEOUT").and_then(|v| v.parse().ok()) {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        config
    }

    /// Check the configuration and produce the value the client is built from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if:
    /// - the region is empty or not a plausible region name
    /// - an API key, profile name or static key is empty
    /// - the endpoint is not an absolute `http`/`https` URL
    /// - the timeout is zero
    pub fn control_plane_settings(&self) -> Result<ControlPlaneSettings> {
        let region = self.region.trim();
        if !region_regex().is_match(region) {
            return Err(Error::Configuration(format!(
                "invalid AWS region: {:?}",
                self.region
            )));
        }

        match &self.auth {
            AuthMode::ApiKey(key) if key.expose_secret().trim().is_empty() => {
                return Err(Error::Configuration("API key is empty".to_string()));
            }
            AuthMode::Profile(name) if name.trim().is_empty() => {
                return Err(Error::Configuration("profile name is empty".to_string()));
            }
            AuthMode::StaticKeys {
                access_key_id,
                secret_access_key,
                ..
            } if access_key_id.trim().is_empty()
                || secret_access_key.expose_secret().trim().is_empty() =>
            {
                return Err(Error::Configuration(
                    "static credentials need both an access key id and a secret access key"
                        .to_string(),
                ));
            }
            _ => {}
        }

        let endpoint_url = match self.endpoint_url.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let parsed = url::Url::parse(raw).map_err(|e| {
                    Error::Configuration(format!("invalid endpoint URL {:?}: {}", raw, e))
                })?;
                if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
                    return Err(Error::Configuration(format!(
                        "endpoint URL must be http(s) with a host: {:?}",
                        raw
                    )));
                }
                Some(raw.trim_end_matches('/').to_string())
            }
            _ => None,
        };

        if self.timeout.is_zero() {
            return Err(Error::Configuration("timeout must be non-zero".to_string()));
        }

        Ok(ControlPlaneSettings {
            region: region.to_string(),
            auth: self.auth.clone(),
            endpoint_url,
            timeout: self.timeout,
        })
    }
}

fn region_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z]{2}(-[a-z]+)+-\d+$").expect("region regex is valid"))
}

/// Checked configuration a control-plane client is built from.
#[derive(Debug, Clone)]
pub struct ControlPlaneSettings {
    /// AWS region
    pub region: String,
    /// Authentication mode
    pub auth: AuthMode,
    /// Endpoint override, without trailing slash
    pub endpoint_url: Option<String>,
    /// Timeout for a single lookup
    pub timeout: Duration,
}

/// Builder for creating [`ResolverConfig`] with a fluent API.
#[derive(Debug, Default)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = region.into();
        self
    }

    /// Authenticate with a Bedrock API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.auth = AuthMode::ApiKey(secret(key));
        self
    }

    /// Authenticate with a named profile.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.config.auth = AuthMode::Profile(profile.into());
        self
    }

    /// Authenticate with a static key pair.
    pub fn static_keys(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        self.config.auth = AuthMode::StaticKeys {
            access_key_id: access_key_id.into(),
            secret_access_key: secret(secret_access_key),
            session_token: session_token.map(secret),
        };
        self
    }

    /// Override the control-plane endpoint.
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint_url = Some(url.into());
        self
    }

    /// Set the lookup timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ResolverConfig {
        self.config
    }
}
