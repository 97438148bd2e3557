//! Short-form video platform connectors

use crate::core::traits::{AssetRef, PlatformCapability, PlatformOutcome};
use crate::platforms::{require_credential, PlatformId};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use std::collections::HashMap;

/// TikTok connector
pub struct TikTokCapability {
    _private: (),
}

impl Default for TikTokCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl TikTokCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for TikTokCapability {
    fn id(&self) -> PlatformId {
        PlatformId::TikTok
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::TikTok, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("tt_{}", stamp),
            url: format!("https://tiktok.com/@user/video/{}", stamp),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        })
    }
}

/// Kwai connector
pub struct KwaiCapability {
    _private: (),
}

impl Default for KwaiCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl KwaiCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for KwaiCapability {
    fn id(&self) -> PlatformId {
        PlatformId::Kwai
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::Kwai, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("kw_{}", stamp),
            url: format!("https://kwai.com/short-video/{}", stamp),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        })
    }
}

/// Douyin connector
pub struct DouyinCapability {
    _private: (),
}

impl Default for DouyinCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl DouyinCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for DouyinCapability {
    fn id(&self) -> PlatformId {
        PlatformId::Douyin
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::Douyin, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("dy_{}", stamp),
            url: format!("https://douyin.com/video/{}", stamp),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> AssetRef {
        AssetRef::new("https://cdn.example/video.mp4")
    }

    fn token() -> SecretString {
        SecretString::new("shortform-token-123456".to_string().into())
    }

    #[tokio::test]
    async fn test_tiktok_requires_credential() {
        let capability = TikTokCapability::new();

        let result = capability.publish(&asset(), "caption", None).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("TIKTOK_TOKEN"));
    }

    #[tokio::test]
    async fn test_tiktok_outcome_shape() {
        let capability = TikTokCapability::new();
        let token = token();

        let outcome = capability
            .publish(&asset(), "caption", Some(&token))
            .await
            .unwrap();

        assert!(outcome.external_id.starts_with("tt_"));
        assert!(outcome.url.contains("tiktok.com/@user/video/"));
        assert!(outcome.metrics.is_empty());
    }

    #[tokio::test]
    async fn test_kwai_outcome_shape() {
        let capability = KwaiCapability::new();
        let token = token();

        let outcome = capability
            .publish(&asset(), "caption", Some(&token))
            .await
            .unwrap();

        assert_eq!(capability.id(), PlatformId::Kwai);
        assert!(outcome.external_id.starts_with("kw_"));
    }

    #[tokio::test]
    async fn test_douyin_outcome_shape() {
        let capability = DouyinCapability::new();
        let token = token();

        let outcome = capability
            .publish(&asset(), "新视频", Some(&token))
            .await
            .unwrap();

        assert_eq!(capability.id(), PlatformId::Douyin);
        assert!(outcome.external_id.starts_with("dy_"));
        assert!(outcome.url.contains("douyin.com/video/"));
    }
}
