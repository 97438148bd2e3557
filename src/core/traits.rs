//! Core trait and types for publish orchestration
//!
//! This module defines the uniform capability contract every destination
//! platform implements, together with the request/report types that flow
//! through an orchestration run.

use crate::platforms::PlatformId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Asset reference
// ============================================================================

/// Opaque reference to a generated media asset (URI or storage key)
///
/// Supplied by the upstream generation pipeline; the engine performs no
/// validation on media format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new<S: Into<String>>(reference: S) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

// ============================================================================
// Requests
// ============================================================================

/// One orchestration request: a single content item against one locale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Media asset to publish
    pub asset: AssetRef,

    /// Raw caption text before per-platform adaptation
    pub raw_text: String,

    /// Locale key selecting the profile (falls back when unknown)
    pub locale: String,

    /// Explicit platform override; raw names so unknown entries surface as
    /// per-platform failures instead of being rejected up front
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_subset: Option<Vec<String>>,
}

/// One user's entry in a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublishJob {
    pub user_id: String,

    pub locale: String,

    /// Per-user caption; the coordinator substitutes the default caption
    /// when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_subset: Option<Vec<String>>,
}

// ============================================================================
// Capability contract
// ============================================================================

/// Success payload returned by a platform capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformOutcome {
    /// Platform-assigned identifier of the published item
    pub external_id: String,

    /// Public URL of the published item
    pub url: String,

    /// Engagement metrics as reported by the platform
    #[serde(default)]
    pub metrics: HashMap<String, u64>,

    pub published_at: DateTime<Utc>,
}

/// Uniform publish contract, one implementation per destination platform
///
/// Implementations represent remote operations and may suspend; the
/// orchestrator awaits each call to completion and wraps it in a failure
/// boundary, so an `Err` here never aborts the remaining platforms.
#[async_trait]
pub trait PlatformCapability: Send + Sync {
    /// Identifier this capability publishes to
    fn id(&self) -> PlatformId;

    /// Publish one content item
    ///
    /// # Arguments
    ///
    /// * `asset` - Media asset reference
    /// * `content` - Platform-adapted caption text
    /// * `credential` - Credential for this platform, when configured;
    ///   absence must surface as a normal failure, not a panic
    async fn publish(
        &self,
        asset: &AssetRef,
        content: &str,
        credential: Option<&SecretString>,
    ) -> anyhow::Result<PlatformOutcome>;
}

// ============================================================================
// Results and reports
// ============================================================================

/// Result of one platform dispatch within a run
///
/// Exactly one of (`external_id` + `url`) or `error` is populated; metrics
/// are present only on success. Use the constructors to keep that invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformResult {
    /// Requested platform name (echoes unknown names verbatim)
    pub platform: String,

    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<HashMap<String, u64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl PlatformResult {
    /// Successful dispatch
    pub fn succeeded(platform: PlatformId, outcome: PlatformOutcome) -> Self {
        Self {
            platform: platform.as_str().to_string(),
            success: true,
            external_id: Some(outcome.external_id),
            url: Some(outcome.url),
            error: None,
            metrics: Some(outcome.metrics),
            published_at: Some(outcome.published_at),
        }
    }

    /// Failed dispatch; `platform` keeps the caller's raw name
    pub fn failed<P: Into<String>, E: Into<String>>(platform: P, error: E) -> Self {
        Self {
            platform: platform.into(),
            success: false,
            external_id: None,
            url: None,
            error: Some(error.into()),
            metrics: None,
            published_at: None,
        }
    }
}

/// Aggregated outcome of one orchestration run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleReport {
    pub locale: String,

    /// Set by the batch coordinator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    pub requested_platforms: usize,

    /// One entry per requested platform, in resolved order
    pub results: Vec<PlatformResult>,

    pub success_count: usize,

    pub failure_count: usize,

    /// Job-level error marker; set only when the orchestration itself failed
    /// (then all counts are zero)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LocaleReport {
    /// Build a report from dispatch results, deriving the counts
    pub fn from_results<S: Into<String>>(locale: S, results: Vec<PlatformResult>) -> Self {
        let success_count = results.iter().filter(|r| r.success).count();
        Self {
            locale: locale.into(),
            user_id: None,
            requested_platforms: results.len(),
            failure_count: results.len() - success_count,
            success_count,
            results,
            error: None,
        }
    }

    /// Report for a job whose orchestration failed before dispatching
    pub fn failed_job<S: Into<String>, E: Into<String>>(locale: S, error: E) -> Self {
        Self {
            locale: locale.into(),
            user_id: None,
            requested_platforms: 0,
            results: Vec::new(),
            success_count: 0,
            failure_count: 0,
            error: Some(error.into()),
        }
    }

    /// Human summary line
    pub fn summary(&self) -> String {
        match &self.error {
            Some(error) => format!("Publishing for {} failed: {}", self.locale, error),
            None => format!(
                "Published to {} of {} platforms for {}",
                self.success_count, self.requested_platforms, self.locale
            ),
        }
    }
}

/// Aggregated outcome of one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_users: usize,

    /// One entry per job, in submission order, tagged with the job's user id
    pub locale_reports: Vec<LocaleReport>,

    /// Sum of success_count across all locale reports
    pub total_successful_publishes: usize,
}

impl BatchReport {
    pub fn new(locale_reports: Vec<LocaleReport>) -> Self {
        Self {
            total_users: locale_reports.len(),
            total_successful_publishes: locale_reports
                .iter()
                .map(|r| r.success_count)
                .sum(),
            locale_reports,
        }
    }

    /// Human summary line
    pub fn summary(&self) -> String {
        format!(
            "Published for {} users, {} successful publishes across {} platform calls",
            self.total_users,
            self.total_successful_publishes,
            self.locale_reports
                .iter()
                .map(|r| r.requested_platforms)
                .sum::<usize>()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> PlatformOutcome {
        PlatformOutcome {
            external_id: "yt_1700000000000".to_string(),
            url: "https://youtube.com/watch?v=yt_1700000000000".to_string(),
            metrics: HashMap::new(),
            published_at: Utc::now(),
        }
    }

    #[test]
    fn test_asset_ref_emptiness() {
        assert!(AssetRef::new("  ").is_empty());
        assert!(!AssetRef::new("https://cdn.example/video.mp4").is_empty());
    }

    #[test]
    fn test_succeeded_result_shape() {
        let result = PlatformResult::succeeded(PlatformId::YouTube, outcome());

        assert_eq!(result.platform, "youtube");
        assert!(result.success);
        assert!(result.external_id.is_some());
        assert!(result.url.is_some());
        assert!(result.error.is_none());
        assert!(result.metrics.is_some());
    }

    #[test]
    fn test_failed_result_shape() {
        let result = PlatformResult::failed("unknown_platform", "unknown platform");

        assert_eq!(result.platform, "unknown_platform");
        assert!(!result.success);
        assert!(result.external_id.is_none());
        assert!(result.url.is_none());
        assert_eq!(result.error.as_deref(), Some("unknown platform"));
        assert!(result.metrics.is_none());
    }

    #[test]
    fn test_locale_report_counts() {
        let report = LocaleReport::from_results(
            "مصر",
            vec![
                PlatformResult::succeeded(PlatformId::Facebook, outcome()),
                PlatformResult::failed("tiktok", "boom"),
                PlatformResult::succeeded(PlatformId::YouTube, outcome()),
            ],
        );

        assert_eq!(report.requested_platforms, 3);
        assert_eq!(report.success_count, 2);
        assert_eq!(report.failure_count, 1);
        assert_eq!(
            report.success_count + report.failure_count,
            report.results.len()
        );
        assert!(report.error.is_none());
        assert_eq!(report.summary(), "Published to 2 of 3 platforms for مصر");
    }

    #[test]
    fn test_failed_job_report_is_empty_but_consistent() {
        let report = LocaleReport::failed_job("مصر", "invalid publish request");

        assert_eq!(report.requested_platforms, 0);
        assert_eq!(report.results.len(), 0);
        assert_eq!(report.success_count + report.failure_count, 0);
        assert!(report.error.is_some());
    }

    #[test]
    fn test_batch_report_totals() {
        let mut first = LocaleReport::from_results(
            "السعودية",
            vec![PlatformResult::succeeded(PlatformId::TikTok, outcome())],
        );
        first.user_id = Some("user1".to_string());
        let mut second = LocaleReport::failed_job("مصر", "boom");
        second.user_id = Some("user2".to_string());

        let batch = BatchReport::new(vec![first, second]);

        assert_eq!(batch.total_users, 2);
        assert_eq!(batch.total_successful_publishes, 1);
        assert_eq!(
            batch.locale_reports[0].user_id.as_deref(),
            Some("user1")
        );
    }

    #[test]
    fn test_report_serialization_skips_empty_fields() {
        let result = PlatformResult::failed("tiktok", "boom");
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("\"error\":\"boom\""));
        assert!(!json.contains("external_id"));
        assert!(!json.contains("metrics"));
    }

    #[test]
    fn test_user_job_deserializes_camel_case() {
        let json = r#"{"userId":"user1","locale":"مصر","platformSubset":["facebook"]}"#;
        let job: UserPublishJob = serde_json::from_str(json).unwrap();

        assert_eq!(job.user_id, "user1");
        assert!(job.content.is_none());
        assert_eq!(job.platform_subset.as_deref(), Some(&["facebook".to_string()][..]));
    }
}
