//! Live/entertainment platform connectors

use crate::core::traits::{AssetRef, PlatformCapability, PlatformOutcome};
use crate::platforms::{require_credential, PlatformId};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use std::collections::HashMap;

/// Yalla connector
pub struct YallaCapability {
    _private: (),
}

impl Default for YallaCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl YallaCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for YallaCapability {
    fn id(&self) -> PlatformId {
        PlatformId::Yalla
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::Yalla, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("yl_{}", stamp),
            url: format!("https://yalla.live/video/{}", stamp),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        })
    }
}
