pub mod resolver;

pub use resolver::{
    default_profiles, LocaleProfile, LocaleProfileResolver, TimeWindow, FALLBACK_LOCALE,
};
