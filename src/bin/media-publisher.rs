//! Media Publisher CLI
//!
//! Locale-aware multi-platform publishing assistant

use anyhow::Result;
use clap::{Parser, Subcommand};
use media_publisher::{
    AnalyticsOptions, AssetRef, BatchCoordinator, ConfigLoader, CredentialStore,
    PublishAnalytics, PublishOrchestrator, PublishRequest, UserPublishJob,
};
use std::path::PathBuf;
use std::process;

/// Locale-aware multi-platform publishing assistant
#[derive(Parser)]
#[command(name = "media-publisher")]
#[command(version = "0.1.0")]
#[command(about = "Locale-aware multi-platform publishing assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish one asset for a single locale
    Publish {
        /// Asset reference (URI or storage key)
        #[arg(value_name = "ASSET")]
        asset: String,

        /// Target locale (falls back to the default profile when unknown)
        #[arg(short, long)]
        locale: String,

        /// Raw caption text (hashtags are injected per locale)
        #[arg(short, long)]
        text: Option<String>,

        /// Comma-separated platform override (defaults to the locale profile)
        #[arg(short, long)]
        platforms: Option<String>,

        /// Directory holding the .publisher.* configuration file
        #[arg(long, default_value = ".")]
        config_dir: PathBuf,

        /// Disable inter-call pacing pauses
        #[arg(long)]
        no_pacing: bool,
    },

    /// Publish one asset for a batch of users from a jobs file
    Batch {
        /// Asset reference (URI or storage key)
        #[arg(value_name = "ASSET")]
        asset: String,

        /// Jobs file (JSON or YAML list of user jobs)
        #[arg(value_name = "JOBS_FILE")]
        jobs_file: PathBuf,

        /// Directory holding the .publisher.* configuration file
        #[arg(long, default_value = ".")]
        config_dir: PathBuf,

        /// Disable inter-call pacing pauses
        #[arg(long)]
        no_pacing: bool,
    },

    /// List supported platforms and credential status
    Platforms,

    /// List configured locale profiles
    Locales {
        /// Directory holding the .publisher.* configuration file
        #[arg(long, default_value = ".")]
        config_dir: PathBuf,
    },

    /// Display publishing statistics
    Stats {
        /// Filter by platform
        #[arg(short, long)]
        platform: Option<String>,

        /// Filter by locale
        #[arg(short, long)]
        locale: Option<String>,

        /// Filter by user id
        #[arg(short, long)]
        user: Option<String>,

        /// Show only successful publishes
        #[arg(long)]
        success_only: bool,

        /// Show only failed publishes
        #[arg(long)]
        failures_only: bool,

        /// Show statistics for last N days
        #[arg(long, default_value = "30")]
        days: usize,
    },
}

#[tokio::main]
async fn main() {
    let result = run().await;

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("\n❌ Error");
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Publish {
            asset,
            locale,
            text,
            platforms,
            config_dir,
            no_pacing,
        } => publish_command(asset, locale, text, platforms, config_dir, no_pacing).await,
        Commands::Batch {
            asset,
            jobs_file,
            config_dir,
            no_pacing,
        } => batch_command(asset, jobs_file, config_dir, no_pacing).await,
        Commands::Platforms => platforms_command(),
        Commands::Locales { config_dir } => locales_command(config_dir).await,
        Commands::Stats {
            platform,
            locale,
            user,
            success_only,
            failures_only,
            days,
        } => stats_command(platform, locale, user, success_only, failures_only, days).await,
    }
}

async fn build_orchestrator(
    config_dir: &PathBuf,
    no_pacing: bool,
) -> Result<PublishOrchestrator> {
    let loaded = ConfigLoader::load(config_dir).await?;

    if let Some(ref source) = loaded.source {
        println!("🔧 Configuration: {}", source.display());
    }

    let mut config = loaded.orchestrator;
    if no_pacing {
        config = config.without_pacing();
    }

    Ok(PublishOrchestrator::new(config).with_locales(loaded.resolver))
}

async fn publish_command(
    asset: String,
    locale: String,
    text: Option<String>,
    platforms: Option<String>,
    config_dir: PathBuf,
    no_pacing: bool,
) -> Result<i32> {
    println!("\n📦 media-publisher\n");

    let orchestrator = build_orchestrator(&config_dir, no_pacing).await?;

    let request = PublishRequest {
        asset: AssetRef::new(asset),
        raw_text: text.unwrap_or_default(),
        locale,
        platform_subset: platforms.map(|list| {
            list.split(',')
                .map(|name| name.trim().to_string())
                .collect()
        }),
    };

    match orchestrator.run(&request).await {
        Ok(report) => {
            let mut analytics = PublishAnalytics::new(".");
            if let Err(e) = analytics.initialize().await {
                eprintln!("⚠️  Failed to initialize analytics: {}", e);
            }
            if let Err(e) = analytics.record_report(&report).await {
                eprintln!("⚠️  Failed to record analytics: {}", e);
            }

            if report.failure_count == 0 {
                println!("\n✅ Publishing completed successfully!");
                Ok(0)
            } else {
                println!("\n❌ Publishing completed with failures");
                for result in report.results.iter().filter(|r| !r.success) {
                    eprintln!("  - {}: {}", result.platform, result.error.as_deref().unwrap_or("unknown error"));
                }
                Ok(1)
            }
        }
        Err(e) => {
            eprintln!("\n❌ Publishing failed: {}", e);
            Ok(1)
        }
    }
}

async fn batch_command(
    asset: String,
    jobs_file: PathBuf,
    config_dir: PathBuf,
    no_pacing: bool,
) -> Result<i32> {
    println!("\n📦 media-publisher (Batch Mode)\n");

    let content = tokio::fs::read_to_string(&jobs_file).await?;
    let jobs: Vec<UserPublishJob> = if jobs_file
        .extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
    {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    if jobs.is_empty() {
        eprintln!("⚠️  Jobs file contains no jobs");
        return Ok(1);
    }

    let orchestrator = build_orchestrator(&config_dir, no_pacing).await?;
    let coordinator = BatchCoordinator::new(orchestrator);

    let report = coordinator.run(&AssetRef::new(asset), &jobs).await;

    let mut analytics = PublishAnalytics::new(".");
    if let Err(e) = analytics.initialize().await {
        eprintln!("⚠️  Failed to initialize analytics: {}", e);
    }
    for locale_report in &report.locale_reports {
        if let Err(e) = analytics.record_report(locale_report).await {
            eprintln!(
                "⚠️  Failed to record analytics for {}: {}",
                locale_report.locale, e
            );
        }
    }

    let clean = report
        .locale_reports
        .iter()
        .all(|r| r.error.is_none() && r.failure_count == 0);

    if clean {
        println!("✅ Batch publishing completed successfully!");
        Ok(0)
    } else {
        println!("❌ Batch publishing completed with errors");
        Ok(1)
    }
}

fn platforms_command() -> Result<i32> {
    println!("\n📋 Supported Platforms\n");

    let credentials = CredentialStore::from_env();

    for platform in media_publisher::PlatformId::ALL {
        let credential = if credentials.has_credential(*platform) {
            "✅ credential set"
        } else {
            "⚠️  no credential"
        };
        println!(
            "  {:<10} style: {:<12} {} ({})",
            platform.as_str(),
            format!("{:?}", platform.style()),
            credential,
            platform.token_var()
        );
    }

    println!();
    Ok(0)
}

async fn locales_command(config_dir: PathBuf) -> Result<i32> {
    println!("\n🌍 Locale Profiles\n");

    let loaded = ConfigLoader::load(&config_dir).await?;

    for profile in loaded.resolver.profiles() {
        let platforms: Vec<_> = profile.platforms.iter().map(|p| p.as_str()).collect();
        println!("  {}", profile.locale);
        println!("    platforms: {}", platforms.join(", "));
        println!("    hashtags:  {}", profile.hashtags.join(" "));
        println!("    window:    {}", profile.optimal_window);
    }

    println!();
    Ok(0)
}

async fn stats_command(
    platform: Option<String>,
    locale: Option<String>,
    user: Option<String>,
    success_only: bool,
    failures_only: bool,
    days: usize,
) -> Result<i32> {
    println!("\n📊 Publishing Statistics\n");

    let mut analytics = PublishAnalytics::new(".");
    analytics.initialize().await?;

    let start_date = chrono::Utc::now() - chrono::Duration::days(days as i64);

    let options = AnalyticsOptions {
        platform,
        locale,
        user_id: user,
        start_date: Some(start_date),
        end_date: None,
        success_only,
        failures_only,
        limit: None,
    };

    let report = analytics.generate_report(&options).await?;

    println!("{}", report.markdown_summary);

    Ok(0)
}
