//! Configuration structures and types for the publish engine
//!
//! `PublisherConfig` is the serde file form; `OrchestratorConfig` is the
//! validated runtime form with concrete durations. File settings are merged
//! over built-in defaults, so every field of the file form is optional
//! except the schema version.

use crate::core::error::PublishError;
use crate::core::retry::RetryOptions;
use crate::locales::{LocaleProfile, TimeWindow};
use crate::platforms::PlatformId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Window used when a file profile omits `optimalTime`
const DEFAULT_WINDOW: &str = "19:00-22:00";

/// Root configuration object (file form)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublisherConfig {
    /// Schema version (required)
    pub version: String,

    /// Locale profiles merged over the built-in table, keyed by locale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<LocaleProfileConfig>>,

    /// Locale acting as the universal default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_locale: Option<String>,

    /// Inter-call pacing intervals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pacing: Option<PacingConfig>,

    /// Retry policy for platform calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryConfig>,

    /// Upper bound on a single platform call, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_timeout_ms: Option<u64>,
}

/// One locale profile entry (file form)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocaleProfileConfig {
    pub locale: String,

    /// Platform names; each must parse to a known platform id
    pub platforms: Vec<String>,

    #[serde(default)]
    pub hashtags: Vec<String>,

    /// `HH:MM-HH:MM` posting window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimal_time: Option<String>,
}

impl LocaleProfileConfig {
    /// Validate into the runtime profile form
    pub fn into_profile(self) -> Result<LocaleProfile, PublishError> {
        let mut platforms = Vec::with_capacity(self.platforms.len());
        for name in &self.platforms {
            let platform: PlatformId = name.parse().map_err(|_| PublishError::Config {
                message: format!("profile for {}: unknown platform '{}'", self.locale, name),
            })?;
            platforms.push(platform);
        }

        let optimal_window: TimeWindow = self
            .optimal_time
            .as_deref()
            .unwrap_or(DEFAULT_WINDOW)
            .parse()?;

        Ok(LocaleProfile {
            locale: self.locale,
            platforms,
            hashtags: self.hashtags,
            optimal_window,
        })
    }
}

/// Inter-call pacing intervals (file form)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PacingConfig {
    /// Pause after each platform call, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_delay_ms: Option<u64>,

    /// Pause after each user in a batch, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_delay_ms: Option<u64>,
}

/// Retry policy (file form)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RetryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_delay_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_delay_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backoff_multiplier: Option<f64>,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Pause after each platform call
    pub platform_delay: Duration,

    /// Pause after each user in a batch
    pub user_delay: Duration,

    /// Upper bound on a single platform call
    pub call_timeout: Duration,

    /// Retry policy for platform calls
    pub retry: RetryOptions,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            platform_delay: Duration::from_secs(1),
            user_delay: Duration::from_secs(2),
            call_timeout: Duration::from_secs(30),
            retry: RetryOptions::default(),
        }
    }
}

impl OrchestratorConfig {
    /// Merge file settings over the defaults
    pub fn from_file_config(config: &PublisherConfig) -> Self {
        let mut merged = Self::default();

        if let Some(pacing) = &config.pacing {
            if let Some(ms) = pacing.platform_delay_ms {
                merged.platform_delay = Duration::from_millis(ms);
            }
            if let Some(ms) = pacing.user_delay_ms {
                merged.user_delay = Duration::from_millis(ms);
            }
        }

        if let Some(ms) = config.call_timeout_ms {
            merged.call_timeout = Duration::from_millis(ms);
        }

        if let Some(retry) = &config.retry {
            if let Some(attempts) = retry.max_attempts {
                merged.retry.max_attempts = attempts;
            }
            if let Some(ms) = retry.initial_delay_ms {
                merged.retry.initial_delay = Duration::from_millis(ms);
            }
            if let Some(ms) = retry.max_delay_ms {
                merged.retry.max_delay = Duration::from_millis(ms);
            }
            if let Some(multiplier) = retry.backoff_multiplier {
                merged.retry.backoff_multiplier = multiplier;
            }
        }

        merged
    }

    /// Configuration without pacing pauses; for tests and dry runs
    pub fn without_pacing(mut self) -> Self {
        self.platform_delay = Duration::ZERO;
        self.user_delay = Duration::ZERO;
        self
    }
}
