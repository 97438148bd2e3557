//! Long-form video platform connectors

use crate::core::traits::{AssetRef, PlatformCapability, PlatformOutcome};
use crate::platforms::{require_credential, PlatformId};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use std::collections::HashMap;

/// YouTube connector
pub struct YouTubeCapability {
    _private: (),
}

impl Default for YouTubeCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for YouTubeCapability {
    fn id(&self) -> PlatformId {
        PlatformId::YouTube
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::YouTube, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("yt_{}", stamp),
            url: format!("https://youtube.com/watch?v=yt_{}", stamp),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        })
    }
}

/// Twitch connector
pub struct TwitchCapability {
    _private: (),
}

impl Default for TwitchCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl TwitchCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for TwitchCapability {
    fn id(&self) -> PlatformId {
        PlatformId::Twitch
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::Twitch, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("tv_{}", stamp),
            url: format!("https://twitch.tv/videos/{}", stamp),
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
        SecretString::new("video-token-123456".to_string().into())
    }

    #[tokio::test]
    async fn test_youtube_requires_credential() {
        let capability = YouTubeCapability::new();

        let result = capability.publish(&asset(), "caption", None).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("YOUTUBE_TOKEN"));
    }

    #[tokio::test]
    async fn test_youtube_outcome_shape() {
        let capability = YouTubeCapability::new();
        let token = token();

        let outcome = capability
            .publish(&asset(), "caption", Some(&token))
            .await
            .unwrap();

        assert!(outcome.external_id.starts_with("yt_"));
        assert!(outcome.url.contains("youtube.com/watch?v="));
        assert!(outcome.metrics.is_empty());
    }

    #[tokio::test]
    async fn test_twitch_outcome_shape() {
        let capability = TwitchCapability::new();
        let token = token();

        let outcome = capability
            .publish(&asset(), "caption", Some(&token))
            .await
            .unwrap();

        assert_eq!(capability.id(), PlatformId::Twitch);
        assert!(outcome.external_id.starts_with("tv_"));
        assert!(outcome.url.contains("twitch.tv/videos/"));
    }
}
