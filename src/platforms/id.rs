//! Platform identifiers and content-style families
//!
//! Destinations are keyed by a closed enum rather than free-form strings so
//! that everything configured at startup (profiles, registry entries) is
//! checked when it is built. Raw request input is parsed through [`FromStr`],
//! and an unparseable name surfaces as a per-platform failure downstream.

use crate::core::error::PublishError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A destination platform known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    YouTube,
    TikTok,
    Instagram,
    Facebook,
    Twitter,
    Telegram,
    TamTam,
    Yalla,
    Kwai,
    Douyin,
    Snapchat,
    LinkedIn,
    Twitch,
}

/// Content adaptation family for a platform
///
/// Groups platforms by how the caption is adapted before dispatch:
/// character-limited microblogs, short-form video apps that take the platform
/// name as an extra hashtag, photo/story apps that take a follow CTA, and
/// everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStyle {
    Microblog,
    ShortVideo,
    PhotoStory,
    Standard,
}

impl PlatformId {
    /// Every platform with a built-in capability, in registry order
    pub const ALL: &'static [PlatformId] = &[
        PlatformId::YouTube,
        PlatformId::TikTok,
        PlatformId::Instagram,
        PlatformId::Facebook,
        PlatformId::Twitter,
        PlatformId::Telegram,
        PlatformId::TamTam,
        PlatformId::Yalla,
        PlatformId::Kwai,
        PlatformId::Douyin,
        PlatformId::Snapchat,
        PlatformId::LinkedIn,
        PlatformId::Twitch,
    ];

    /// Canonical lowercase name, as used in profiles and request subsets
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformId::YouTube => "youtube",
            PlatformId::TikTok => "tiktok",
            PlatformId::Instagram => "instagram",
            PlatformId::Facebook => "facebook",
            PlatformId::Twitter => "twitter",
            PlatformId::Telegram => "telegram",
            PlatformId::TamTam => "tamtam",
            PlatformId::Yalla => "yalla",
            PlatformId::Kwai => "kwai",
            PlatformId::Douyin => "douyin",
            PlatformId::Snapchat => "snapchat",
            PlatformId::LinkedIn => "linkedin",
            PlatformId::Twitch => "twitch",
        }
    }

    /// Environment variable holding this platform's credential
    ///
    /// Naming convention: `<PLATFORM_ID>_TOKEN`.
    pub fn token_var(&self) -> &'static str {
        match self {
            PlatformId::YouTube => "YOUTUBE_TOKEN",
            PlatformId::TikTok => "TIKTOK_TOKEN",
            PlatformId::Instagram => "INSTAGRAM_TOKEN",
            PlatformId::Facebook => "FACEBOOK_TOKEN",
            PlatformId::Twitter => "TWITTER_TOKEN",
            PlatformId::Telegram => "TELEGRAM_TOKEN",
            PlatformId::TamTam => "TAMTAM_TOKEN",
            PlatformId::Yalla => "YALLA_TOKEN",
            PlatformId::Kwai => "KWAI_TOKEN",
            PlatformId::Douyin => "DOUYIN_TOKEN",
            PlatformId::Snapchat => "SNAPCHAT_TOKEN",
            PlatformId::LinkedIn => "LINKEDIN_TOKEN",
            PlatformId::Twitch => "TWITCH_TOKEN",
        }
    }

    /// Content adaptation family for this platform
    pub fn style(&self) -> ContentStyle {
        match self {
            PlatformId::Twitter => ContentStyle::Microblog,
            PlatformId::TikTok | PlatformId::Kwai | PlatformId::Douyin => {
                ContentStyle::ShortVideo
            }
            PlatformId::Instagram | PlatformId::Snapchat => ContentStyle::PhotoStory,
            _ => ContentStyle::Standard,
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformId {
    type Err = PublishError;

    /// Case-insensitive parse of a platform name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        PlatformId::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| PublishError::UnknownPlatform {
                name: s.to_string(),
            })
    }
}
