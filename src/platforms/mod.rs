//! Destination platforms
//!
//! Platform identifiers, the capability registry, and one connector module
//! per platform family. Connectors carry the uniform publish contract; the
//! remote API integration itself lives outside this crate.

pub mod id;
pub mod live;
pub mod messaging;
pub mod mock;
pub mod registry;
pub mod shortform;
pub mod social;
pub mod video;

pub use id::{ContentStyle, PlatformId};
pub use registry::PlatformRegistry;

use crate::core::error::PublishError;
use secrecy::SecretString;

/// Resolve the credential argument or fail the call
///
/// Absence is a normal per-call failure surfaced through the result channel,
/// per the capability contract.
pub(crate) fn require_credential<'a>(
    platform: PlatformId,
    credential: Option<&'a SecretString>,
) -> Result<&'a SecretString, PublishError> {
    credential.ok_or(PublishError::CredentialMissing { platform })
}
