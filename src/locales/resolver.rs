//! Locale profiles and resolution
//!
//! A locale profile decides which platforms a publish run targets, which
//! hashtags are injected, and the optimal posting window for that market.
//! The profile table is built once at startup (built-ins, optionally
//! overridden from configuration) and read-only afterwards. Resolution is
//! total: an unknown locale falls back to the designated default profile so
//! every request always has a usable platform set.

use crate::core::error::PublishError;
use crate::platforms::PlatformId;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Locale whose profile serves as the universal default
pub const FALLBACK_LOCALE: &str = "الولايات المتحدة";

// ============================================================================
// Time window
// ============================================================================

/// Time-of-day range, e.g. `18:00-22:00`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether `t` falls inside the window; windows crossing midnight wrap
    pub fn contains(&self, t: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= t && t <= self.end
        } else {
            t >= self.start || t <= self.end
        }
    }
}

impl FromStr for TimeWindow {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PublishError::Config {
            message: format!("invalid time window '{}', expected HH:MM-HH:MM", s),
        };

        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").map_err(|_| invalid())?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").map_err(|_| invalid())?;

        Ok(Self::new(start, end))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

impl TryFrom<String> for TimeWindow {
    type Error = PublishError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeWindow> for String {
    fn from(window: TimeWindow) -> Self {
        window.to_string()
    }
}

// ============================================================================
// Locale profile
// ============================================================================

/// Publishing profile for one locale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleProfile {
    /// Locale display name, unique per table
    pub locale: String,

    /// Default platform set; insertion order is dispatch priority
    pub platforms: Vec<PlatformId>,

    /// Hashtags injected into every caption for this locale
    pub hashtags: Vec<String>,

    /// Optimal posting window for this market
    pub optimal_window: TimeWindow,
}

fn window(raw: &str) -> TimeWindow {
    raw.parse().expect("built-in window is well-formed")
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Built-in locale profile table
pub fn default_profiles() -> Vec<LocaleProfile> {
    use PlatformId::*;

    vec![
        LocaleProfile {
            locale: "السعودية".to_string(),
            platforms: vec![TikTok, Snapchat, TamTam, YouTube],
            hashtags: tags(&["#السعودية", "#الرياض", "#جدة"]),
            optimal_window: window("18:00-22:00"),
        },
        LocaleProfile {
            locale: "مصر".to_string(),
            platforms: vec![Facebook, TikTok, YouTube, Instagram],
            hashtags: tags(&["#مصر", "#القاهرة", "#مصري"]),
            optimal_window: window("20:00-23:00"),
        },
        LocaleProfile {
            locale: "الإمارات".to_string(),
            platforms: vec![Instagram, TikTok, Snapchat, LinkedIn],
            hashtags: tags(&["#الإمارات", "#دبي", "#أبوظبي"]),
            optimal_window: window("17:00-21:00"),
        },
        LocaleProfile {
            locale: FALLBACK_LOCALE.to_string(),
            platforms: vec![YouTube, TikTok, Instagram, Twitter],
            hashtags: tags(&["#USA", "#America", "#US"]),
            optimal_window: window("19:00-22:00"),
        },
        LocaleProfile {
            locale: "الصين".to_string(),
            platforms: vec![Douyin, TikTok],
            hashtags: tags(&["#中国", "#抖音", "#视频"]),
            optimal_window: window("19:00-21:00"),
        },
    ]
}

// ============================================================================
// Resolver
// ============================================================================

/// Maps locale keys to profiles, with a guaranteed fallback
#[derive(Debug)]
pub struct LocaleProfileResolver {
    profiles: HashMap<String, LocaleProfile>,
    fallback: String,
}

impl LocaleProfileResolver {
    /// Resolver over the built-in profile table
    pub fn with_defaults() -> Self {
        Self::new(default_profiles(), FALLBACK_LOCALE)
            .expect("built-in profile table is valid")
    }

    /// Resolver over an explicit profile table
    ///
    /// Validates the table invariants: non-empty platform lists, unique
    /// locale keys, and a fallback locale that exists in the table.
    pub fn new<S: Into<String>>(
        profiles: Vec<LocaleProfile>,
        fallback: S,
    ) -> Result<Self, PublishError> {
        let fallback = fallback.into();
        let mut table = HashMap::with_capacity(profiles.len());

        for profile in profiles {
            if profile.platforms.is_empty() {
                return Err(PublishError::Config {
                    message: format!("profile for {} has an empty platform list", profile.locale),
                });
            }
            if table.insert(profile.locale.clone(), profile).is_some() {
                return Err(PublishError::Config {
                    message: "duplicate locale in profile table".to_string(),
                });
            }
        }

        if !table.contains_key(&fallback) {
            return Err(PublishError::Config {
                message: format!("fallback locale '{}' has no profile", fallback),
            });
        }

        Ok(Self {
            profiles: table,
            fallback,
        })
    }

    /// Resolve a locale to its profile, falling back for unknown keys
    pub fn resolve(&self, locale: &str) -> &LocaleProfile {
        self.profiles
            .get(locale)
            .unwrap_or_else(|| &self.profiles[&self.fallback])
    }

    /// Effective ordered platform-name list for one request
    ///
    /// A non-empty explicit subset is the caller's override and is used
    /// verbatim, even when it names platforms outside the profile (or
    /// platforms that do not exist at all); otherwise the profile's default
    /// list applies.
    pub fn platforms_for(&self, locale: &str, subset: Option<&[String]>) -> Vec<String> {
        match subset {
            Some(names) if !names.is_empty() => names.to_vec(),
            _ => self
                .resolve(locale)
                .platforms
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        }
    }

    /// Whether the locale has its own profile (false means fallback applies)
    pub fn is_known(&self, locale: &str) -> bool {
        self.profiles.contains_key(locale)
    }

    /// All profiles, sorted by locale key for stable listings
    pub fn profiles(&self) -> Vec<&LocaleProfile> {
        let mut profiles: Vec<_> = self.profiles.values().collect();
        profiles.sort_by(|a, b| a.locale.cmp(&b.locale));
        profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_parse_and_display() {
        let window: TimeWindow = "18:00-22:00".parse().unwrap();

        assert_eq!(window.to_string(), "18:00-22:00");
        assert!(window.contains(NaiveTime::from_hms_opt(20, 30, 0).unwrap()));
        assert!(!window.contains(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
    }

    #[test]
    fn test_time_window_wraps_midnight() {
        let window: TimeWindow = "22:00-02:00".parse().unwrap();

        assert!(window.contains(NaiveTime::from_hms_opt(23, 30, 0).unwrap()));
        assert!(window.contains(NaiveTime::from_hms_opt(1, 0, 0).unwrap()));
        assert!(!window.contains(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn test_time_window_rejects_garbage() {
        assert!("18:00".parse::<TimeWindow>().is_err());
        assert!("25:00-26:00".parse::<TimeWindow>().is_err());
        assert!("evening".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn test_resolve_known_locale() {
        let resolver = LocaleProfileResolver::with_defaults();
        let profile = resolver.resolve("مصر");

        assert_eq!(profile.locale, "مصر");
        assert_eq!(
            profile.platforms,
            vec![
                PlatformId::Facebook,
                PlatformId::TikTok,
                PlatformId::YouTube,
                PlatformId::Instagram
            ]
        );
    }

    #[test]
    fn test_unknown_locale_falls_back_deterministically() {
        let resolver = LocaleProfileResolver::with_defaults();

        let first = resolver.resolve("أطلانتس");
        let second = resolver.resolve("أطلانتس");

        assert_eq!(first.locale, FALLBACK_LOCALE);
        assert_eq!(second.locale, FALLBACK_LOCALE);
        assert!(!resolver.is_known("أطلانتس"));
    }

    #[test]
    fn test_platforms_for_profile_defaults() {
        let resolver = LocaleProfileResolver::with_defaults();

        let platforms = resolver.platforms_for("السعودية", None);

        assert_eq!(platforms, vec!["tiktok", "snapchat", "tamtam", "youtube"]);
    }

    #[test]
    fn test_platforms_for_subset_is_verbatim() {
        let resolver = LocaleProfileResolver::with_defaults();

        // Subset may reference platforms outside the locale's default list,
        // and even names that are not platforms at all.
        let subset = vec!["telegram".to_string(), "unknown_platform".to_string()];
        let platforms = resolver.platforms_for("مصر", Some(&subset));

        assert_eq!(platforms, subset);
    }

    #[test]
    fn test_empty_subset_uses_profile() {
        let resolver = LocaleProfileResolver::with_defaults();

        let platforms = resolver.platforms_for("مصر", Some(&[]));

        assert_eq!(platforms, vec!["facebook", "tiktok", "youtube", "instagram"]);
    }

    #[test]
    fn test_empty_platform_list_rejected() {
        let profile = LocaleProfile {
            locale: "مصر".to_string(),
            platforms: vec![],
            hashtags: vec![],
            optimal_window: "20:00-23:00".parse().unwrap(),
        };

        let result = LocaleProfileResolver::new(vec![profile], "مصر");

        assert!(matches!(result, Err(PublishError::Config { .. })));
    }

    #[test]
    fn test_duplicate_locale_rejected() {
        let mut profiles = default_profiles();
        profiles.push(profiles[0].clone());

        let result = LocaleProfileResolver::new(profiles, FALLBACK_LOCALE);

        assert!(matches!(result, Err(PublishError::Config { .. })));
    }

    #[test]
    fn test_missing_fallback_rejected() {
        let profiles = vec![LocaleProfile {
            locale: "مصر".to_string(),
            platforms: vec![PlatformId::Facebook],
            hashtags: vec![],
            optimal_window: "20:00-23:00".parse().unwrap(),
        }];

        let result = LocaleProfileResolver::new(profiles, "الصين");

        assert!(matches!(result, Err(PublishError::Config { .. })));
    }

    #[test]
    fn test_profiles_listing_is_sorted() {
        let resolver = LocaleProfileResolver::with_defaults();
        let profiles = resolver.profiles();

        assert_eq!(profiles.len(), 5);
        let locales: Vec<_> = profiles.iter().map(|p| p.locale.clone()).collect();
        let mut sorted = locales.clone();
        sorted.sort();
        assert_eq!(locales, sorted);
    }
}
