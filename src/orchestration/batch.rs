//! Batch coordinator
//!
//! Publishes one asset for an ordered list of users, each with their own
//! locale, caption, and optional platform override. Jobs run strictly
//! sequentially with a coarser pacing interval between users. A job whose
//! orchestration fails outright is recorded with an error marker and the
//! batch moves on; the batch itself never fails.

use crate::core::traits::{AssetRef, BatchReport, LocaleReport, PublishRequest, UserPublishJob};
use crate::orchestration::publisher::PublishOrchestrator;

/// Caption used when a job carries no content of its own
pub const DEFAULT_CAPTION: &str = "فيديو متميز";

/// Coordinates orchestration runs across a batch of users
pub struct BatchCoordinator {
    orchestrator: PublishOrchestrator,
}

impl BatchCoordinator {
    pub fn new(orchestrator: PublishOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Run every job in order and aggregate the outcome
    pub async fn run(&self, asset: &AssetRef, jobs: &[UserPublishJob]) -> BatchReport {
        println!("\n👥 Batch publishing for {} users", jobs.len());

        let user_delay = self.orchestrator.config().user_delay;
        let pacer = self.orchestrator.pacer();

        let mut reports = Vec::with_capacity(jobs.len());
        for job in jobs {
            println!("\n📤 Publishing for user {} ({})", job.user_id, job.locale);

            let request = PublishRequest {
                asset: asset.clone(),
                raw_text: job
                    .content
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CAPTION.to_string()),
                locale: job.locale.clone(),
                platform_subset: job.platform_subset.clone(),
            };

            let mut report = match self.orchestrator.run(&request).await {
                Ok(report) => report,
                Err(error) => {
                    eprintln!("  ❌ {}: {}", job.user_id, error);
                    LocaleReport::failed_job(job.locale.clone(), error.to_string())
                }
            };
            report.user_id = Some(job.user_id.clone());
            reports.push(report);

            pacer.pause(user_delay).await;
        }

        let report = BatchReport::new(reports);
        Self::print_summary(&report);
        report
    }

    /// Print batch summary
    fn print_summary(report: &BatchReport) {
        println!("\n{}", "=".repeat(60));
        println!("📊 Batch Publish Summary");
        println!("{}", "=".repeat(60));

        for locale_report in &report.locale_reports {
            let user = locale_report.user_id.as_deref().unwrap_or("-");
            match &locale_report.error {
                Some(error) => println!("  ❌ {}: {}", user, error),
                None => println!(
                    "  ✅ {}: {}/{} platforms",
                    user, locale_report.success_count, locale_report.requested_platforms
                ),
            }
        }

        println!("{}", "=".repeat(60));
        println!("{}\n", report.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::OrchestratorConfig;
    use crate::core::pacing::NoopPacer;
    use crate::platforms::mock::MockCapability;
    use crate::platforms::{PlatformId, PlatformRegistry};
    use std::sync::Arc;

    fn job(user_id: &str, locale: &str, subset: Option<Vec<&str>>) -> UserPublishJob {
        UserPublishJob {
            user_id: user_id.to_string(),
            locale: locale.to_string(),
            content: None,
            platform_subset: subset
                .map(|names| names.into_iter().map(|n| n.to_string()).collect()),
        }
    }

    fn coordinator(platforms: &[PlatformId]) -> BatchCoordinator {
        let mut registry = PlatformRegistry::new();
        for platform in platforms {
            registry.register(Arc::new(MockCapability::succeeding(*platform)));
        }
        let orchestrator =
            PublishOrchestrator::new(OrchestratorConfig::default().without_pacing())
                .with_registry(registry)
                .with_pacer(Arc::new(NoopPacer));
        BatchCoordinator::new(orchestrator)
    }

    #[tokio::test]
    async fn test_batch_preserves_job_order() {
        use PlatformId::*;
        let coordinator = coordinator(&[Facebook, TikTok, YouTube]);
        let jobs = vec![
            job("user1", "مصر", Some(vec!["facebook"])),
            job("user2", "مصر", Some(vec!["tiktok"])),
            job("user3", "مصر", Some(vec!["youtube"])),
        ];
        let asset = AssetRef::new("https://cdn.example/video.mp4");

        let report = coordinator.run(&asset, &jobs).await;

        let users: Vec<_> = report
            .locale_reports
            .iter()
            .map(|r| r.user_id.clone().unwrap())
            .collect();
        assert_eq!(users, vec!["user1", "user2", "user3"]);
    }

    #[tokio::test]
    async fn test_failed_job_does_not_halt_batch() {
        use PlatformId::*;
        let coordinator = coordinator(&[Facebook]);
        // Job 1 fails at the orchestrator level (blank locale); job 2 is
        // unaffected.
        let jobs = vec![
            job("user1", " ", Some(vec!["facebook"])),
            job("user2", "مصر", Some(vec!["facebook"])),
        ];
        let asset = AssetRef::new("https://cdn.example/video.mp4");

        let report = coordinator.run(&asset, &jobs).await;

        assert_eq!(report.locale_reports.len(), 2);

        let first = &report.locale_reports[0];
        assert!(first.error.is_some());
        assert_eq!(first.requested_platforms, 0);
        assert_eq!(first.user_id.as_deref(), Some("user1"));

        let second = &report.locale_reports[1];
        assert!(second.error.is_none());
        assert_eq!(second.success_count, 1);
    }

    #[tokio::test]
    async fn test_total_successes_summed_across_jobs() {
        use PlatformId::*;
        let coordinator = coordinator(&[Facebook, TikTok]);
        let jobs = vec![
            job("user1", "مصر", Some(vec!["facebook", "tiktok"])),
            job("user2", "مصر", Some(vec!["facebook", "unknown_platform"])),
        ];
        let asset = AssetRef::new("https://cdn.example/video.mp4");

        let report = coordinator.run(&asset, &jobs).await;

        assert_eq!(report.total_users, 2);
        assert_eq!(report.total_successful_publishes, 3);
    }

    #[tokio::test]
    async fn test_default_caption_applied_when_content_missing() {
        use PlatformId::*;
        let mut registry = PlatformRegistry::new();
        let mock = Arc::new(MockCapability::succeeding(Facebook));
        registry.register(mock.clone());
        let orchestrator =
            PublishOrchestrator::new(OrchestratorConfig::default().without_pacing())
                .with_registry(registry)
                .with_pacer(Arc::new(NoopPacer));
        let coordinator = BatchCoordinator::new(orchestrator);
        let jobs = vec![job("user1", "مصر", Some(vec!["facebook"]))];
        let asset = AssetRef::new("https://cdn.example/video.mp4");

        coordinator.run(&asset, &jobs).await;

        let calls = mock.calls();
        assert!(calls[0].starts_with(DEFAULT_CAPTION));
    }

    #[tokio::test]
    async fn test_per_user_content_overrides_default() {
        use PlatformId::*;
        let mut registry = PlatformRegistry::new();
        let mock = Arc::new(MockCapability::succeeding(Facebook));
        registry.register(mock.clone());
        let orchestrator =
            PublishOrchestrator::new(OrchestratorConfig::default().without_pacing())
                .with_registry(registry)
                .with_pacer(Arc::new(NoopPacer));
        let coordinator = BatchCoordinator::new(orchestrator);
        let mut custom = job("user1", "مصر", Some(vec!["facebook"]));
        custom.content = Some("محتوى خاص".to_string());
        let asset = AssetRef::new("https://cdn.example/video.mp4");

        coordinator.run(&asset, &[custom]).await;

        assert!(mock.calls()[0].starts_with("محتوى خاص"));
    }

    #[tokio::test]
    async fn test_empty_batch_yields_empty_report() {
        let coordinator = coordinator(&[]);
        let asset = AssetRef::new("https://cdn.example/video.mp4");

        let report = coordinator.run(&asset, &[]).await;

        assert_eq!(report.total_users, 0);
        assert_eq!(report.total_successful_publishes, 0);
        assert!(report.locale_reports.is_empty());
    }
}
