//! Configuration file loader
//!
//! Probes the working directory for a publisher configuration file,
//! deserializes it by extension, validates the locale profile entries, and
//! merges the result over the built-in defaults. A directory without a
//! configuration file yields the defaults unchanged.

use crate::core::config::{OrchestratorConfig, PublisherConfig};
use crate::core::error::PublishError;
use crate::locales::{default_profiles, LocaleProfileResolver, FALLBACK_LOCALE};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Recognized configuration file names, probed in order
pub const CONFIG_FILENAMES: &[&str] = &[
    ".publisher.yaml",
    ".publisher.yml",
    ".publisher.json",
    ".publisher.toml",
];

/// Fully merged configuration ready for engine construction
#[derive(Debug)]
pub struct LoadedConfig {
    pub orchestrator: OrchestratorConfig,
    pub resolver: LocaleProfileResolver,
    /// File the settings came from; `None` means pure defaults
    pub source: Option<PathBuf>,
}

/// Configuration file loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `dir`, falling back to built-in defaults
    pub async fn load(dir: &Path) -> Result<LoadedConfig, PublishError> {
        for filename in CONFIG_FILENAMES {
            let path = dir.join(filename);
            if fs::metadata(&path).await.is_ok() {
                let content = fs::read_to_string(&path).await.map_err(|e| {
                    PublishError::Config {
                        message: format!("cannot read {}: {}", path.display(), e),
                    }
                })?;
                let config = Self::parse(&content, filename)?;
                let mut loaded = Self::build(config)?;
                loaded.source = Some(path);
                return Ok(loaded);
            }
        }

        Ok(LoadedConfig {
            orchestrator: OrchestratorConfig::default(),
            resolver: LocaleProfileResolver::with_defaults(),
            source: None,
        })
    }

    /// Deserialize by file extension
    fn parse(content: &str, filename: &str) -> Result<PublisherConfig, PublishError> {
        let parse_error = |e: String| PublishError::Config {
            message: format!("cannot parse {}: {}", filename, e),
        };

        if filename.ends_with(".yaml") || filename.ends_with(".yml") {
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
        } else if filename.ends_with(".json") {
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))
        } else {
            toml::from_str(content).map_err(|e| parse_error(e.to_string()))
        }
    }

    /// Validate and merge file settings over the built-ins
    fn build(config: PublisherConfig) -> Result<LoadedConfig, PublishError> {
        let orchestrator = OrchestratorConfig::from_file_config(&config);

        let mut profiles = default_profiles();
        if let Some(entries) = config.locales.clone() {
            for entry in entries {
                let profile = entry.into_profile()?;
                // A file entry overrides the built-in profile of the same
                // locale, otherwise extends the table.
                match profiles.iter_mut().find(|p| p.locale == profile.locale) {
                    Some(existing) => *existing = profile,
                    None => profiles.push(profile),
                }
            }
        }

        let fallback = config
            .fallback_locale
            .clone()
            .unwrap_or_else(|| FALLBACK_LOCALE.to_string());
        let resolver = LocaleProfileResolver::new(profiles, fallback)?;

        Ok(LoadedConfig {
            orchestrator,
            resolver,
            source: None,
        })
    }
}
