//! Credential lookup with memory-safe handling and masking
//!
//! One secret per platform, resolved by the `<PLATFORM_ID>_TOKEN` naming
//! convention from the environment, using the `secrecy` crate to prevent
//! accidental token exposure in console output. In-memory overrides take
//! precedence over the environment so tests and embedding callers can inject
//! credentials without touching process state. Absence of a credential is a
//! per-call condition, never an error at lookup time.

use crate::platforms::PlatformId;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::env;

/// Credential source for platform capabilities
#[derive(Default)]
pub struct CredentialStore {
    overrides: HashMap<PlatformId, SecretString>,
}

impl CredentialStore {
    /// Store resolving purely from the environment
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Add an in-memory credential, shadowing the environment
    pub fn with_token(mut self, platform: PlatformId, token: &str) -> Self {
        self.set_token(platform, token);
        self
    }

    /// Insert or replace an in-memory credential
    pub fn set_token(&mut self, platform: PlatformId, token: &str) {
        self.overrides
            .insert(platform, SecretString::new(token.to_string().into()));
    }

    /// Credential for the platform, if configured
    ///
    /// Overrides win; otherwise the `<PLATFORM_ID>_TOKEN` environment
    /// variable is consulted.
    pub fn credential(&self, platform: PlatformId) -> Option<SecretString> {
        if let Some(token) = self.overrides.get(&platform) {
            return Some(token.clone());
        }
        let value = env::var(platform.token_var()).ok()?;
        Some(SecretString::new(value.into()))
    }

    /// Whether a credential is configured for the platform
    pub fn has_credential(&self, platform: PlatformId) -> bool {
        self.credential(platform).is_some()
    }

    /// Platforms that currently resolve to a credential
    pub fn configured_platforms(&self) -> Vec<PlatformId> {
        PlatformId::ALL
            .iter()
            .copied()
            .filter(|p| self.has_credential(*p))
            .collect()
    }

    /// Masks a token for safe console output
    ///
    /// Shows only the first 3 and last 3 characters; tokens shorter than 10
    /// characters are fully masked.
    pub fn mask_token(&self, token: &str) -> String {
        if token.len() < 10 {
            return "****".to_string();
        }

        let prefix: String = token.chars().take(3).collect();
        let suffix: String = token
            .chars()
            .rev()
            .take(3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{}...{}", prefix, suffix)
    }

    /// Masks every configured credential appearing in `text`
    pub fn mask_tokens_in_string(&self, text: &str) -> String {
        let mut masked = text.to_string();

        for platform in PlatformId::ALL {
            if let Some(token) = self.credential(*platform) {
                let token_str = token.expose_secret();
                if token_str.is_empty() {
                    continue;
                }
                if let Ok(pattern) = Regex::new(&regex::escape(token_str)) {
                    let replacement = self.mask_token(token_str);
                    masked = pattern
                        .replace_all(&masked, replacement.as_str())
                        .to_string();
                }
            }
        }

        masked
    }
}
