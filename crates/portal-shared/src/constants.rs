//! Application-wide constants

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Preference key under which the navigation layout blob is stored per user.
pub const NAVIGATION_PREFERENCE_KEY: &str = "navigation";

pub const MAX_TAG_LENGTH: usize = 50;
pub const MAX_TOPIC_TAGS: usize = 32;
pub const MAX_SEARCH_LENGTH: usize = 200;

/// Topic nesting levels, roots included. Deeper rows are re-rooted.
pub const MAX_TOPIC_DEPTH: usize = 64;
