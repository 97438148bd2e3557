//! Social network connectors

use crate::core::traits::{AssetRef, PlatformCapability, PlatformOutcome};
use crate::platforms::{require_credential, PlatformId};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use std::collections::HashMap;

/// Facebook connector
pub struct FacebookCapability {
    _private: (),
}

impl Default for FacebookCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl FacebookCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for FacebookCapability {
    fn id(&self) -> PlatformId {
        PlatformId::Facebook
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::Facebook, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("fb_{}", stamp),
            url: format!("https://facebook.com/permalink/fb_{}", stamp),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        })
    }
}

/// Twitter connector
pub struct TwitterCapability {
    _private: (),
}

impl Default for TwitterCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl TwitterCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for TwitterCapability {
    fn id(&self) -> PlatformId {
        PlatformId::Twitter
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::Twitter, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("tw_{}", stamp),
            url: format!("https://twitter.com/user/status/tw_{}", stamp),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        })
    }
}

/// Instagram connector
pub struct InstagramCapability {
    _private: (),
}

impl Default for InstagramCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl InstagramCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for InstagramCapability {
    fn id(&self) -> PlatformId {
        PlatformId::Instagram
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::Instagram, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("ig_{}", stamp),
            url: format!("https://instagram.com/p/ig_{}", stamp),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        })
    }
}

/// Snapchat connector
pub struct SnapchatCapability {
    _private: (),
}

impl Default for SnapchatCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapchatCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for SnapchatCapability {
    fn id(&self) -> PlatformId {
        PlatformId::Snapchat
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::Snapchat, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("sc_{}", stamp),
            url: format!("https://snapchat.com/spotlight/sc_{}", stamp),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        })
    }
}

/// LinkedIn connector
pub struct LinkedInCapability {
    _private: (),
}

impl Default for LinkedInCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkedInCapability {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl PlatformCapability for LinkedInCapability {
    fn id(&self) -> PlatformId {
        PlatformId::LinkedIn
    }

    async fn publish(
        &self,
        _asset: &AssetRef,
        _content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome> {
        let _token = require_credential(PlatformId::LinkedIn, credential)?;

        let stamp = Utc::now().timestamp_millis();
        Ok(PlatformOutcome {
            external_id: format!("li_{}", stamp),
            url: format!("https://linkedin.com/feed/update/li_{}", stamp),
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
        SecretString::new("social-token-123456".to_string().into())
    }

    #[tokio::test]
    async fn test_facebook_requires_credential() {
        let capability = FacebookCapability::new();

        let result = capability.publish(&asset(), "caption", None).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("FACEBOOK_TOKEN"));
    }

    #[tokio::test]
    async fn test_facebook_outcome_shape() {
        let capability = FacebookCapability::new();
        let token = token();

        let outcome = capability
            .publish(&asset(), "caption", Some(&token))
            .await
            .unwrap();

        assert!(outcome.external_id.starts_with("fb_"));
        assert!(outcome.url.contains("facebook.com/permalink/"));
        assert!(outcome.metrics.is_empty());
    }

    #[tokio::test]
    async fn test_twitter_outcome_shape() {
        let capability = TwitterCapability::new();
        let token = token();

        let outcome = capability
            .publish(&asset(), "caption", Some(&token))
            .await
            .unwrap();

        assert_eq!(capability.id(), PlatformId::Twitter);
        assert!(outcome.external_id.starts_with("tw_"));
        assert!(outcome.url.contains("twitter.com/user/status/"));
    }

    #[tokio::test]
    async fn test_instagram_outcome_shape() {
        let capability = InstagramCapability::new();
        let token = token();

        let outcome = capability
            .publish(&asset(), "caption", Some(&token))
            .await
            .unwrap();

        assert!(outcome.external_id.starts_with("ig_"));
        assert!(outcome.url.contains("instagram.com/p/"));
    }

    #[tokio::test]
    async fn test_snapchat_and_linkedin_ids() {
        assert_eq!(SnapchatCapability::new().id(), PlatformId::Snapchat);
        assert_eq!(LinkedInCapability::new().id(), PlatformId::LinkedIn);
    }
}
