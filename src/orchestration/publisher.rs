//! Publish orchestrator
//!
//! Runs one content item against a resolved platform set: resolves the
//! locale profile, adapts the caption per platform, and dispatches
//! sequentially with pacing between calls. Every platform-level failure is
//! converted into a structured result so a single bad destination never
//! aborts the rest of the run; only a malformed request fails the run as a
//! whole, and even that is caught again at the batch boundary.

use crate::content::ContentTemplater;
use crate::core::config::OrchestratorConfig;
use crate::core::error::PublishError;
use crate::core::pacing::{IntervalPacer, Pacer};
use crate::core::retry::RetryManager;
use crate::core::traits::{LocaleReport, PlatformResult, PublishRequest};
use crate::locales::{LocaleProfile, LocaleProfileResolver};
use crate::platforms::{PlatformId, PlatformRegistry};
use crate::security::CredentialStore;
use std::sync::Arc;
use tokio::time::timeout;

/// Main publish orchestrator
pub struct PublishOrchestrator {
    registry: PlatformRegistry,
    locales: LocaleProfileResolver,
    templater: ContentTemplater,
    credentials: CredentialStore,
    retry: RetryManager,
    pacer: Arc<dyn Pacer>,
    config: OrchestratorConfig,
}

impl PublishOrchestrator {
    /// Orchestrator over the built-in registry, profile table, and
    /// environment credentials
    pub fn new(config: OrchestratorConfig) -> Self {
        Self {
            registry: PlatformRegistry::with_builtin(),
            locales: LocaleProfileResolver::with_defaults(),
            templater: ContentTemplater::new(),
            credentials: CredentialStore::from_env(),
            retry: RetryManager::new(config.retry.clone()),
            pacer: Arc::new(IntervalPacer),
            config,
        }
    }

    /// Replace the platform registry
    pub fn with_registry(mut self, registry: PlatformRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the locale profile resolver
    pub fn with_locales(mut self, locales: LocaleProfileResolver) -> Self {
        self.locales = locales;
        self
    }

    /// Replace the credential source
    pub fn with_credentials(mut self, credentials: CredentialStore) -> Self {
        self.credentials = credentials;
        self
    }

    /// Replace the pacing policy
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub(crate) fn pacer(&self) -> Arc<dyn Pacer> {
        Arc::clone(&self.pacer)
    }

    /// Run one orchestration: dispatch the request to every resolved
    /// platform in order
    ///
    /// Returns `Err` only for a malformed request; per-platform failures are
    /// recorded inside the report.
    pub async fn run(&self, request: &PublishRequest) -> Result<LocaleReport, PublishError> {
        self.validate(request)?;

        let profile = self.locales.resolve(&request.locale);
        let platform_names = self
            .locales
            .platforms_for(&request.locale, request.platform_subset.as_deref());

        println!(
            "\n🌍 Publishing for {} across {} platforms",
            request.locale,
            platform_names.len()
        );

        let mut results = Vec::with_capacity(platform_names.len());
        for name in &platform_names {
            let result = self.dispatch(request, profile, name).await;

            match (&result.url, &result.error) {
                (Some(url), _) => println!("  ✅ {}: {}", name, url),
                (None, Some(error)) => println!("  ❌ {}: {}", name, error),
                _ => {}
            }
            results.push(result);

            // Pause after every platform, the trailing one included, to
            // stay under upstream rate limits.
            self.pacer.pause(self.config.platform_delay).await;
        }

        let report = LocaleReport::from_results(request.locale.clone(), results);
        println!("📊 {}", report.summary());

        Ok(report)
    }

    fn validate(&self, request: &PublishRequest) -> Result<(), PublishError> {
        if request.asset.is_empty() {
            return Err(PublishError::InvalidRequest {
                message: "empty asset reference".to_string(),
            });
        }
        if request.locale.trim().is_empty() {
            return Err(PublishError::InvalidRequest {
                message: "blank locale key".to_string(),
            });
        }
        Ok(())
    }

    /// Dispatch one platform; every failure mode ends up as a result
    async fn dispatch(
        &self,
        request: &PublishRequest,
        profile: &LocaleProfile,
        name: &str,
    ) -> PlatformResult {
        let platform = match name.parse::<PlatformId>() {
            Ok(platform) => platform,
            Err(error) => return PlatformResult::failed(name, error.to_string()),
        };

        let Some(capability) = self.registry.resolve(platform) else {
            return PlatformResult::failed(
                name,
                PublishError::UnknownPlatform {
                    name: name.to_string(),
                }
                .to_string(),
            );
        };

        let content = self.templater.render(&request.raw_text, platform, profile);
        let credential = self.credentials.credential(platform);

        let call = self
            .retry
            .retry(|| {
                let capability = Arc::clone(&capability);
                let asset = request.asset.clone();
                let content = content.clone();
                let credential = credential.clone();
                let call_timeout = self.config.call_timeout;
                async move {
                    match timeout(
                        call_timeout,
                        capability.publish(&asset, &content, credential.as_ref()),
                    )
                    .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(PublishError::CallTimeout { platform }.into()),
                    }
                }
            })
            .await;

        match call {
            Ok(outcome) => PlatformResult::succeeded(platform, outcome),
            Err(error) => PlatformResult::failed(name, error.to_string()),
        }
    }
}
