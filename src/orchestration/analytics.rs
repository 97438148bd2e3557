//! Publish analytics
//!
//! Tracks per-platform publish outcomes across orchestration runs. The
//! store is injected, explicitly-owned state: callers decide where it lives
//! and when reports are recorded. Persistence is a JSON file under
//! `.media-publisher/` in the working directory.
//!
//! Features:
//! - Flatten LocaleReports into per-platform records
//! - Filter and query records by platform, locale, user, and time range
//! - Calculate statistics (success rate per platform)
//! - Generate reports in Markdown and JSON formats

use crate::core::traits::LocaleReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;

/// Analytics record for a single platform dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub locale: String,
    pub platform: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Options for filtering analytics records
#[derive(Debug, Clone, Default)]
pub struct AnalyticsOptions {
    pub platform: Option<String>,
    pub locale: Option<String>,
    pub user_id: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub success_only: bool,
    pub failures_only: bool,
    pub limit: Option<usize>,
}

/// Platform-specific statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformStatistics {
    pub platform: String,
    pub attempts: usize,
    pub successes: usize,
    pub failures: usize,
    pub success_rate: f64,
    pub last_publish: DateTime<Utc>,
}

/// Time range for statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Overall publishing statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishStatistics {
    pub total_attempts: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub success_rate: f64,
    pub by_platform: HashMap<String, PlatformStatistics>,
    pub time_range: TimeRange,
}

/// Comprehensive analytics report
#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    pub generated_at: DateTime<Utc>,
    pub statistics: PublishStatistics,
    pub recent_records: Vec<AnalyticsRecord>,
    pub markdown_summary: String,
    pub json_data: String,
}

/// Data file structure
#[derive(Debug, Serialize, Deserialize)]
struct AnalyticsDataFile {
    version: String,
    records: Vec<AnalyticsRecord>,
    last_updated: String,
}

/// Publish outcome store with filtering, statistics, and reports
pub struct PublishAnalytics {
    records: Vec<AnalyticsRecord>,
    data_file_path: PathBuf,
}

impl PublishAnalytics {
    /// Store rooted at `base_dir`
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        let data_file_path = base_dir
            .into()
            .join(".media-publisher")
            .join("analytics.json");

        Self {
            records: Vec::new(),
            data_file_path,
        }
    }

    /// Load existing data; a missing file starts an empty store
    pub async fn initialize(&mut self) -> Result<(), anyhow::Error> {
        match self.load_records().await {
            Ok(()) => Ok(()),
            Err(_) => {
                self.records = Vec::new();
                Ok(())
            }
        }
    }

    /// Record every platform result of one orchestration run
    pub async fn record_report(&mut self, report: &LocaleReport) -> Result<(), anyhow::Error> {
        for result in &report.results {
            self.records.push(AnalyticsRecord {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: report.user_id.clone(),
                locale: report.locale.clone(),
                platform: result.platform.clone(),
                success: result.success,
                error: result.error.clone(),
                timestamp: result.published_at.unwrap_or_else(Utc::now),
            });
        }

        self.save_records().await
    }

    /// Get filtered records, most recent first
    pub fn get_records(&self, options: &AnalyticsOptions) -> Vec<AnalyticsRecord> {
        let mut filtered: Vec<_> = self
            .records
            .iter()
            .filter(|r| {
                if let Some(ref platform) = options.platform
                    && &r.platform != platform
                {
                    return false;
                }

                if let Some(ref locale) = options.locale
                    && &r.locale != locale
                {
                    return false;
                }

                if let Some(ref user_id) = options.user_id
                    && r.user_id.as_ref() != Some(user_id)
                {
                    return false;
                }

                if let Some(start_date) = options.start_date
                    && r.timestamp < start_date
                {
                    return false;
                }

                if let Some(end_date) = options.end_date
                    && r.timestamp > end_date
                {
                    return false;
                }

                if options.success_only && !r.success {
                    return false;
                }

                if options.failures_only && r.success {
                    return false;
                }

                true
            })
            .cloned()
            .collect();

        filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        if let Some(limit) = options.limit {
            filtered.truncate(limit);
        }

        filtered
    }

    /// Calculate statistics from filtered records
    pub fn get_statistics(&self, options: &AnalyticsOptions) -> PublishStatistics {
        let records = self.get_records(options);

        if records.is_empty() {
            return Self::empty_statistics();
        }

        let success_count = records.iter().filter(|r| r.success).count();
        let failure_count = records.len() - success_count;

        let by_platform = Self::platform_statistics(&records);

        let timestamps: Vec<_> = records.iter().map(|r| r.timestamp).collect();
        let start = *timestamps.iter().min().unwrap();
        let end = *timestamps.iter().max().unwrap();

        PublishStatistics {
            total_attempts: records.len(),
            success_count,
            failure_count,
            success_rate: (success_count as f64 / records.len() as f64) * 100.0,
            by_platform,
            time_range: TimeRange { start, end },
        }
    }

    /// Generate a comprehensive report
    pub async fn generate_report(
        &self,
        options: &AnalyticsOptions,
    ) -> Result<AnalyticsReport, anyhow::Error> {
        let statistics = self.get_statistics(options);

        let mut recent_options = options.clone();
        if recent_options.limit.is_none() {
            recent_options.limit = Some(10);
        }
        let recent_records = self.get_records(&recent_options);

        let markdown_summary = Self::markdown_summary(&statistics, &recent_records);
        let json_data = serde_json::to_string_pretty(&serde_json::json!({
            "generatedAt": Utc::now().to_rfc3339(),
            "statistics": &statistics,
            "recentRecords": &recent_records,
        }))?;

        Ok(AnalyticsReport {
            generated_at: Utc::now(),
            statistics,
            recent_records,
            markdown_summary,
            json_data,
        })
    }

    /// Clear all analytics data
    pub async fn clear_data(&mut self) -> Result<(), anyhow::Error> {
        self.records.clear();
        self.save_records().await
    }

    // Private methods

    async fn load_records(&mut self) -> Result<(), anyhow::Error> {
        let data = fs::read_to_string(&self.data_file_path).await?;
        let parsed: AnalyticsDataFile = serde_json::from_str(&data)?;
        self.records = parsed.records;
        Ok(())
    }

    async fn save_records(&self) -> Result<(), anyhow::Error> {
        let dir = self.data_file_path.parent().unwrap();
        fs::create_dir_all(dir).await?;

        let data = AnalyticsDataFile {
            version: "1.0".to_string(),
            records: self.records.clone(),
            last_updated: Utc::now().to_rfc3339(),
        };

        let json = serde_json::to_string_pretty(&data)?;
        fs::write(&self.data_file_path, json).await?;

        Ok(())
    }

    fn platform_statistics(records: &[AnalyticsRecord]) -> HashMap<String, PlatformStatistics> {
        let mut platform_map: HashMap<String, Vec<&AnalyticsRecord>> = HashMap::new();

        for record in records {
            platform_map
                .entry(record.platform.clone())
                .or_default()
                .push(record);
        }

        platform_map
            .into_iter()
            .map(|(platform, platform_records)| {
                let successes = platform_records.iter().filter(|r| r.success).count();
                let attempts = platform_records.len();
                let most_recent = platform_records
                    .iter()
                    .max_by_key(|r| r.timestamp)
                    .unwrap();

                let stats = PlatformStatistics {
                    platform: platform.clone(),
                    attempts,
                    successes,
                    failures: attempts - successes,
                    success_rate: (successes as f64 / attempts as f64) * 100.0,
                    last_publish: most_recent.timestamp,
                };

                (platform, stats)
            })
            .collect()
    }

    fn empty_statistics() -> PublishStatistics {
        PublishStatistics {
            total_attempts: 0,
            success_count: 0,
            failure_count: 0,
            success_rate: 0.0,
            by_platform: HashMap::new(),
            time_range: TimeRange {
                start: Utc::now(),
                end: Utc::now(),
            },
        }
    }

    fn markdown_summary(
        statistics: &PublishStatistics,
        recent_records: &[AnalyticsRecord],
    ) -> String {
        let mut lines = Vec::new();

        lines.push("# Publishing Analytics Report\n".to_string());
        lines.push(format!("**Generated**: {}\n", Utc::now().to_rfc3339()));

        lines.push("## Overall Statistics\n".to_string());
        lines.push(format!("- **Total Attempts**: {}", statistics.total_attempts));
        lines.push(format!("- **Successful**: {}", statistics.success_count));
        lines.push(format!("- **Failed**: {}", statistics.failure_count));
        lines.push(format!("- **Success Rate**: {:.2}%\n", statistics.success_rate));

        if !statistics.by_platform.is_empty() {
            lines.push("## Platform Statistics\n".to_string());
            lines.push(
                "| Platform | Attempts | Successes | Failures | Success Rate |".to_string(),
            );
            lines.push(
                "|----------|----------|-----------|----------|--------------|".to_string(),
            );

            let mut platforms: Vec<_> = statistics.by_platform.values().collect();
            platforms.sort_by(|a, b| a.platform.cmp(&b.platform));
            for stats in platforms {
                lines.push(format!(
                    "| {} | {} | {} | {} | {:.1}% |",
                    stats.platform,
                    stats.attempts,
                    stats.successes,
                    stats.failures,
                    stats.success_rate
                ));
            }
            lines.push(String::new());
        }

        if !recent_records.is_empty() {
            lines.push("## Recent Publishes\n".to_string());
            lines.push("| Timestamp | User | Locale | Platform | Status |".to_string());
            lines.push("|-----------|------|--------|----------|--------|".to_string());

            for record in recent_records {
                let status = if record.success {
                    "✅ Success"
                } else {
                    "❌ Failed"
                };
                lines.push(format!(
                    "| {} | {} | {} | {} | {} |",
                    record.timestamp.format("%Y-%m-%d %H:%M"),
                    record.user_id.as_deref().unwrap_or("-"),
                    record.locale,
                    record.platform,
                    status
                ));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}
