//! Platform registry
//!
//! Maps platform identifiers to their capabilities. Contents are fixed at
//! construction; the registry is shared read-only state for the lifetime of
//! the process. A resolve miss is reported by the orchestrator as a
//! per-platform failure, never as a fatal error for the run.

use crate::core::traits::PlatformCapability;
use crate::platforms::live::YallaCapability;
use crate::platforms::messaging::{TamTamCapability, TelegramCapability};
use crate::platforms::shortform::{DouyinCapability, KwaiCapability, TikTokCapability};
use crate::platforms::social::{
    FacebookCapability, InstagramCapability, LinkedInCapability, SnapchatCapability,
    TwitterCapability,
};
use crate::platforms::video::{TwitchCapability, YouTubeCapability};
use crate::platforms::PlatformId;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of platform capabilities, keyed by [`PlatformId`]
pub struct PlatformRegistry {
    capabilities: HashMap<PlatformId, Arc<dyn PlatformCapability>>,
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl PlatformRegistry {
    /// Empty registry; capabilities must be registered explicitly
    pub fn new() -> Self {
        Self {
            capabilities: HashMap::new(),
        }
    }

    /// Registry with every built-in connector registered
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(YouTubeCapability::new()));
        registry.register(Arc::new(TikTokCapability::new()));
        registry.register(Arc::new(InstagramCapability::new()));
        registry.register(Arc::new(FacebookCapability::new()));
        registry.register(Arc::new(TwitterCapability::new()));
        registry.register(Arc::new(TelegramCapability::new()));
        registry.register(Arc::new(TamTamCapability::new()));
        registry.register(Arc::new(YallaCapability::new()));
        registry.register(Arc::new(KwaiCapability::new()));
        registry.register(Arc::new(DouyinCapability::new()));
        registry.register(Arc::new(SnapchatCapability::new()));
        registry.register(Arc::new(LinkedInCapability::new()));
        registry.register(Arc::new(TwitchCapability::new()));

        registry
    }

    /// Register a capability under its own id, replacing any existing one
    pub fn register(&mut self, capability: Arc<dyn PlatformCapability>) {
        self.capabilities.insert(capability.id(), capability);
    }

    /// Look up the capability for a platform
    pub fn resolve(&self, platform: PlatformId) -> Option<Arc<dyn PlatformCapability>> {
        self.capabilities.get(&platform).cloned()
    }

    /// Whether the platform has a registered capability
    pub fn contains(&self, platform: PlatformId) -> bool {
        self.capabilities.contains_key(&platform)
    }

    /// Registered platform ids, sorted by name for stable listings
    pub fn platforms(&self) -> Vec<PlatformId> {
        let mut platforms: Vec<_> = self.capabilities.keys().copied().collect();
        platforms.sort_by_key(|p| p.as_str());
        platforms
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}
