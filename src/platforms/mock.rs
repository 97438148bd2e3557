//! Scripted capability for orchestration tests
//!
//! Available for all builds so integration-style tests can register scripted
//! destinations in a registry without touching real connectors. Records
//! every call so tests can assert on dispatch order and rendered content.

use crate::core::traits::{AssetRef, PlatformCapability, PlatformOutcome};
use crate::platforms::PlatformId;
use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use std::collections::HashMap;
use std::sync::Mutex;

/// What the mock does on each publish call
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return a successful outcome
    Succeed,
    /// Fail with the given message
    Fail(String),
}

/// Scripted platform capability
pub struct MockCapability {
    platform: PlatformId,
    behavior: MockBehavior,
    calls: Mutex<Vec<String>>,
}

impl MockCapability {
    /// Mock that always succeeds
    pub fn succeeding(platform: PlatformId) -> Self {
        Self {
            platform,
            behavior: MockBehavior::Succeed,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock that always fails with `message`
    pub fn failing<S: Into<String>>(platform: PlatformId, message: S) -> Self {
        Self {
            platform,
            behavior: MockBehavior::Fail(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of publish calls received
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Rendered content of every call, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformCapability for MockCapability {
    fn id(&self) -> PlatformId {
        self.platform
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        content: &str,
        _credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        self.calls.lock().unwrap().push(content.to_string());

        match &self.behavior {
            MockBehavior::Succeed => Ok(PlatformOutcome {
                external_id: format!("{}_mock", self.platform),
                url: format!("https://{}.example/mock", self.platform),
                metrics: HashMap::new(),
                published_at: Utc::now(),
            }),
            MockBehavior::Fail(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}
