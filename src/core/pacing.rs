//! Inter-call pacing
//!
//! Dispatch is paced to avoid tripping upstream rate limits: one interval
//! between platform calls, a coarser one between users in a batch. The
//! pacing policy is injected behind a trait so orchestration tests run
//! without wall-clock delays.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// Pacing abstraction between external calls
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Suspend for the given pacing interval
    async fn pause(&self, interval: Duration);
}

/// Wall-clock pacer backed by the tokio timer
#[derive(Debug, Default)]
pub struct IntervalPacer;

#[async_trait]
impl Pacer for IntervalPacer {
    async fn pause(&self, interval: Duration) {
        sleep(interval).await;
    }
}

/// Pacer that returns immediately; for tests
#[derive(Debug, Default)]
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self, _interval: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_interval_pacer_waits() {
        let pacer = IntervalPacer;
        let start = Instant::now();

        pacer.pause(Duration::from_millis(30)).await;

        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_noop_pacer_returns_immediately() {
        let pacer = NoopPacer;
        let start = Instant::now();

        pacer.pause(Duration::from_secs(60)).await;

        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
