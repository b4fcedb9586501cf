//! Testing utilities
//!
//! Provides an in-memory [`ControlPlane`] so resolver and panel behaviour can
//! be exercised without AWS.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::client::{ControlPlane, ProfileModel};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
enum MockLookup {
    Models(Vec<ProfileModel>),
    Fail(String),
}

/// Mock control plane that answers from a table and records every lookup.
///
/// Clones share state, so a test can keep one handle while the resolver owns
/// another. Unknown identifiers fail with a `ResourceNotFoundException`
/// lookup error.
#[derive(Debug, Clone, Default)]
pub struct MockControlPlane {
    profiles: Arc<Mutex<HashMap<String, MockLookup>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockControlPlane {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer lookups for `identifier` with `models`.
    pub async fn set_profile(&self, identifier: impl Into<String>, models: Vec<ProfileModel>) {
        self.profiles
            .lock()
            .await
            .insert(identifier.into(), MockLookup::Models(models));
    }

    /// Fail lookups for `identifier` with `message`.
    pub async fn set_failure(&self, identifier: impl Into<String>, message: impl Into<String>) {
        self.profiles
            .lock()
            .await
            .insert(identifier.into(), MockLookup::Fail(message.into()));
    }

    /// Identifiers looked up so far, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    /// Number of lookups so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl ControlPlane for MockControlPlane {
    async fn inference_profile_models(&self, identifier: &str) -> Result<Vec<ProfileModel>> {
        self.calls.lock().await.push(identifier.to_string());

        match self.profiles.lock().await.get(identifier) {
            Some(MockLookup::Models(models)) => Ok(models.clone()),
            Some(MockLookup::Fail(message)) => Err(Error::Lookup(message.clone())),
            None => Err(Error::Lookup(format!(
                "ResourceNotFoundException: inference profile {} not found",
                identifier
            ))),
        }
    }
}
