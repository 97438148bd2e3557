pub mod templater;

pub use templater::{ContentTemplater, MICROBLOG_MAX_CHARS};
