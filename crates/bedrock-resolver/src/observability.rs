//! Structured logging for lookups
//!
//! All control-plane lookups are logged through this layer so that fields
//! stay consistent: `arn`, `model_id`, `elapsed_ms`, `error`.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use bedrock_resolver_protocol::ResolvedModel;

/// Lookup metadata for structured logging
#[derive(Debug, Clone)]
pub struct LookupMetadata<'a> {
    /// ARN being resolved
    pub arn: &'a str,
    start: Instant,
}

impl<'a> LookupMetadata<'a> {
    /// Start tracking a lookup for `arn`
    pub fn start(arn: &'a str) -> Self {
        debug!(arn = %arn, "Looking up inference profile");
        Self {
            arn,
            start: Instant::now(),
        }
    }

    /// Time since the lookup started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Log a successful lookup
    pub fn log_success(&self, model: &ResolvedModel) {
        info!(
            arn = %self.arn,
            model_id = %model.model_id,
            elapsed_ms = self.elapsed().as_millis(),
            "Resolved inference profile"
        );
    }

    /// Log a failed lookup
    pub fn log_failure(&self, error: &dyn std::error::Error) {
        warn!(
            arn = %self.arn,
            elapsed_ms = self.elapsed().as_millis(),
            error = %error,
            "Inference profile lookup failed"
        );
    }
}

/// Log a cache hit
pub fn log_cache_hit(arn: &str, model: &ResolvedModel) {
    debug!(arn = %arn, model_id = %model.model_id, "Inference profile cache hit");
}

/// Install a `tracing-subscriber` fmt layer filtered by `RUST_LOG`.
///
/// Falls back to `bedrock_resolver=info` when `RUST_LOG` is unset. Calling
/// this more than once is harmless.
#[cfg(feature = "trace")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bedrock_resolver=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
