//! media-publisher
//!
//! Locale-aware publish orchestration: resolves a locale to its platform
//! set, adapts the caption per platform, and dispatches sequentially with
//! pacing, per-call failure isolation, and aggregated reporting for single
//! runs and per-user batches.

pub mod content;
pub mod core;
pub mod locales;
pub mod orchestration;
pub mod platforms;
pub mod security;

pub use crate::core::config::{OrchestratorConfig, PublisherConfig};
pub use crate::core::config_loader::{ConfigLoader, LoadedConfig};
pub use crate::core::error::PublishError;
pub use crate::core::pacing::{IntervalPacer, NoopPacer, Pacer};
pub use crate::core::retry::{RetryManager, RetryOptions};
pub use crate::core::traits::{
    AssetRef, BatchReport, LocaleReport, PlatformCapability, PlatformOutcome, PlatformResult,
    PublishRequest, UserPublishJob,
};
pub use locales::{LocaleProfile, LocaleProfileResolver};
pub use orchestration::{
    AnalyticsOptions, BatchCoordinator, PublishAnalytics, PublishOrchestrator,
};
pub use platforms::{ContentStyle, PlatformId, PlatformRegistry};
pub use security::CredentialStore;
