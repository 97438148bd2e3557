//! Per-platform caption adaptation
//!
//! Rendering is pure and deterministic: the same (text, platform, profile)
//! triple always yields the same caption. Adaptation policy follows the
//! platform's content-style family.

use crate::locales::LocaleProfile;
use crate::platforms::{ContentStyle, PlatformId};

/// Character budget for microblog platforms, applied before hashtags
pub const MICROBLOG_MAX_CHARS: usize = 280;

/// Call-to-action appended on photo/story platforms
const FOLLOW_SUFFIX: &str = "✨ @followus";

/// Renders the platform-specific caption for one dispatch
#[derive(Debug, Default)]
pub struct ContentTemplater;

impl ContentTemplater {
    pub fn new() -> Self {
        Self
    }

    /// Render the caption for `platform` under `profile`
    ///
    /// Output is never empty: with blank raw text the locale's hashtag line
    /// (plus any family suffix) constitutes the content.
    pub fn render(&self, raw_text: &str, platform: PlatformId, profile: &LocaleProfile) -> String {
        let hashtags = self.hashtag_line(profile);

        match platform.style() {
            ContentStyle::Microblog => {
                let truncated = truncate_chars(raw_text, MICROBLOG_MAX_CHARS);
                join_blocks(&truncated, &hashtags)
            }
            ContentStyle::ShortVideo => {
                let body = join_blocks(raw_text, &hashtags);
                format!("{}\n#{}", body, platform.as_str())
            }
            ContentStyle::PhotoStory => {
                let body = join_blocks(raw_text, &hashtags);
                format!("{}\n{}", body, FOLLOW_SUFFIX)
            }
            ContentStyle::Standard => join_blocks(raw_text, &hashtags),
        }
    }

    /// The locale's hashtags joined by single spaces
    pub fn hashtag_line(&self, profile: &LocaleProfile) -> String {
        profile.hashtags.join(" ")
    }
}

/// Join caption body and hashtag line, dropping whichever is empty
fn join_blocks(body: &str, hashtags: &str) -> String {
    match (body.is_empty(), hashtags.is_empty()) {
        (false, false) => format!("{}\n\n{}", body, hashtags),
        (false, true) => body.to_string(),
        (true, _) => hashtags.to_string(),
    }
}

/// Truncate on a char boundary; captions are routinely non-ASCII
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locales::default_profiles;

    fn profile(locale: &str) -> LocaleProfile {
        default_profiles()
            .into_iter()
            .find(|p| p.locale == locale)
            .unwrap()
    }

    #[test]
    fn test_render_is_pure() {
        let templater = ContentTemplater::new();
        let profile = profile("مصر");

        let first = templater.render("فيديو متميز", PlatformId::TikTok, &profile);
        let second = templater.render("فيديو متميز", PlatformId::TikTok, &profile);

        assert_eq!(first, second);
    }

    #[test]
    fn test_standard_platform_appends_hashtags() {
        let templater = ContentTemplater::new();
        let profile = profile("مصر");

        let content = templater.render("video of the day", PlatformId::YouTube, &profile);

        assert_eq!(content, "video of the day\n\n#مصر #القاهرة #مصري");
    }

    #[test]
    fn test_short_video_appends_platform_hashtag() {
        let templater = ContentTemplater::new();
        let profile = profile("الصين");

        let content = templater.render("新视频", PlatformId::Douyin, &profile);

        assert!(content.starts_with("新视频\n\n"));
        assert!(content.ends_with("\n#douyin"));
    }

    #[test]
    fn test_photo_story_appends_follow_cta() {
        let templater = ContentTemplater::new();
        let profile = profile("الإمارات");

        let content = templater.render("لقطات دبي", PlatformId::Instagram, &profile);

        assert!(content.ends_with("\n✨ @followus"));
    }

    #[test]
    fn test_microblog_truncates_before_hashtags() {
        let templater = ContentTemplater::new();
        let profile = profile("الولايات المتحدة");
        let long_text = "x".repeat(400);

        let content = templater.render(&long_text, PlatformId::Twitter, &profile);

        let (body, hashtags) = content.split_once("\n\n").unwrap();
        assert_eq!(body.chars().count(), MICROBLOG_MAX_CHARS);
        assert_eq!(hashtags, "#USA #America #US");
    }

    #[test]
    fn test_microblog_truncation_is_char_boundary_safe() {
        let templater = ContentTemplater::new();
        let profile = profile("مصر");
        let long_text = "م".repeat(400);

        let content = templater.render(&long_text, PlatformId::Twitter, &profile);

        let (body, _) = content.split_once("\n\n").unwrap();
        assert_eq!(body.chars().count(), MICROBLOG_MAX_CHARS);
    }

    #[test]
    fn test_short_text_is_not_truncated() {
        let templater = ContentTemplater::new();
        let profile = profile("الولايات المتحدة");

        let content = templater.render("short caption", PlatformId::Twitter, &profile);

        assert!(content.starts_with("short caption\n\n"));
    }

    #[test]
    fn test_empty_text_yields_hashtags_only() {
        let templater = ContentTemplater::new();
        let profile = profile("مصر");

        let content = templater.render("", PlatformId::Facebook, &profile);

        assert_eq!(content, "#مصر #القاهرة #مصري");
        assert!(!content.is_empty());
    }

    #[test]
    fn test_empty_text_short_video_still_tags_platform() {
        let templater = ContentTemplater::new();
        let profile = profile("مصر");

        let content = templater.render("", PlatformId::TikTok, &profile);

        assert_eq!(content, "#مصر #القاهرة #مصري\n#tiktok");
    }
}
