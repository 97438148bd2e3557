//! Orchestration layer
//!
//! The publish orchestrator runs one content item against one locale's
//! platform set; the batch coordinator sequences orchestrator runs across
//! users; analytics aggregates the outcomes.

pub mod analytics;
pub mod batch;
pub mod publisher;

pub use analytics::{AnalyticsOptions, AnalyticsRecord, PublishAnalytics};
pub use batch::{BatchCoordinator, DEFAULT_CAPTION};
pub use publisher::PublishOrchestrator;
