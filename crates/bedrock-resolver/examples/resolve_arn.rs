//! Resolve an inference-profile ARN from the command line
//!
//! ## Prerequisites
//!
//! 1. AWS credentials configured (one of):
//!    - `AWS_BEARER_TOKEN_BEDROCK` (Bedrock API key)
//!    - `AWS_PROFILE`
//!    - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` (+ `AWS_SESSION_TOKEN`)
//!    - The default credential chain
//!
//! 2. AWS region configured via `AWS_REGION`
//!
//! ## Usage
//!
//! ```bash
//! AWS_REGION=us-east-1 cargo run --example resolve_arn --features trace -- \
//!     arn:aws:bedrock:us-east-1:123456789012:inference-profile/us.anthropic.claude-3-haiku-20240307-v1:0
//! ```

use std::sync::Arc;

use bedrock_resolver::{
    InferenceProfileResolver, ResolutionState, ResolverConfig, SettingsPanel,
    observability::init_tracing,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let arn = std::env::args()
        .nth(1)
        .ok_or("usage: resolve_arn <inference-profile-arn>")?;

    let config = ResolverConfig::from_env();
    println!("Region: {} (auth: {})", config.region, config.auth.label());

    let resolver = Arc::new(InferenceProfileResolver::try_new(&config).await?);
    let mut panel = SettingsPanel::new(resolver, config.region.clone());

    panel.on_arn_changed(arn.as_str()).await;

    if let Some(message) = panel.validation_error() {
        println!("Validation: {}", message);
    }

    match panel.state() {
        ResolutionState::Resolved { model_id } => println!("{} -> {}", arn, model_id),
        ResolutionState::Error { message } => println!("Error: {}", message),
        ResolutionState::Idle => println!("{} does not need resolving", arn),
        ResolutionState::Resolving => println!("{} is still resolving", arn),
    }

    Ok(())
}
