//! Error handling for publish orchestration
//!
//! Platform-level failures are recovered inside the dispatch loop and turned
//! into structured results; only orchestrator-level errors escape `run`, and
//! only as far as the batch boundary. Error types carry stable codes using
//! the thiserror crate for ergonomic error handling.

use crate::platforms::PlatformId;
use thiserror::Error;

/// Main error type for publish orchestration
#[derive(Error, Debug)]
pub enum PublishError {
    // Per-platform errors, converted to failed PlatformResults by the loop
    #[error("unknown platform: {name}")]
    UnknownPlatform { name: String },

    #[error("[{platform}] missing credential ({var})", var = .platform.token_var())]
    CredentialMissing { platform: PlatformId },

    #[error("[{platform}] publish call failed: {message}")]
    PublishCallFailure { platform: PlatformId, message: String },

    #[error("[{platform}] publish call timed out")]
    CallTimeout { platform: PlatformId },

    // Orchestrator-level errors, fatal to one job only
    #[error("invalid publish request: {message}")]
    InvalidRequest { message: String },

    // Startup errors
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl PublishError {
    /// Name of the platform this error relates to, if any
    pub fn platform_name(&self) -> Option<&str> {
        match self {
            Self::UnknownPlatform { name } => Some(name),
            Self::CredentialMissing { platform }
            | Self::PublishCallFailure { platform, .. }
            | Self::CallTimeout { platform } => Some(platform.as_str()),
            Self::InvalidRequest { .. } | Self::Config { .. } => None,
        }
    }

    /// Check if this error class is transient
    ///
    /// Transient errors are candidates for retry; the rest fail fast.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PublishCallFailure { .. } | Self::CallTimeout { .. }
        )
    }

    /// Get stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownPlatform { .. } => "UNKNOWN_PLATFORM",
            Self::CredentialMissing { .. } => "CREDENTIAL_MISSING",
            Self::PublishCallFailure { .. } => "PUBLISH_CALL_FAILED",
            Self::CallTimeout { .. } => "CALL_TIMEOUT",
            Self::InvalidRequest { .. } => "INVALID_REQUEST",
            Self::Config { .. } => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_platform_error() {
        let error = PublishError::UnknownPlatform {
            name: "myspace".to_string(),
        };

        assert_eq!(error.platform_name(), Some("myspace"));
        assert!(!error.is_recoverable());
        assert_eq!(error.code(), "UNKNOWN_PLATFORM");
        assert!(error.to_string().contains("myspace"));
    }

    #[test]
    fn test_credential_missing_names_env_var() {
        let error = PublishError::CredentialMissing {
            platform: PlatformId::TikTok,
        };

        assert_eq!(error.platform_name(), Some("tiktok"));
        assert_eq!(error.code(), "CREDENTIAL_MISSING");
        assert!(!error.is_recoverable());
        let display = error.to_string();
        assert!(display.contains("TIKTOK_TOKEN"));
        assert!(display.contains("missing credential"));
    }

    #[test]
    fn test_publish_call_failure_with_message() {
        let error = PublishError::PublishCallFailure {
            platform: PlatformId::Facebook,
            message: "quota exceeded".to_string(),
        };

        assert_eq!(error.platform_name(), Some("facebook"));
        assert!(error.is_recoverable());
        assert_eq!(error.code(), "PUBLISH_CALL_FAILED");
        assert!(error.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_call_timeout_is_recoverable() {
        let error = PublishError::CallTimeout {
            platform: PlatformId::YouTube,
        };

        assert!(error.is_recoverable());
        assert_eq!(error.code(), "CALL_TIMEOUT");
    }

    #[test]
    fn test_invalid_request_has_no_platform() {
        let error = PublishError::InvalidRequest {
            message: "empty asset reference".to_string(),
        };

        assert_eq!(error.platform_name(), None);
        assert!(!error.is_recoverable());
        assert_eq!(error.code(), "INVALID_REQUEST");
    }

    #[test]
    fn test_config_error() {
        let error = PublishError::Config {
            message: "profile for مصر has an empty platform list".to_string(),
        };

        assert_eq!(error.platform_name(), None);
        assert_eq!(error.code(), "CONFIG_ERROR");
        assert!(error.to_string().contains("مصر"));
    }
}
