use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration constants for the bot
/// Base URL of the remote download API
/// Read from API_BASE_URL environment variable
/// The same service also answers search lookups
pub static API_BASE_URL: Lazy<String> =
    Lazy::new(|| env::var("API_BASE_URL").unwrap_or_else(|_| "https://shrutibots.site".to_string()));

/// Download folder path
/// Read from DOWNLOAD_DIR environment variable
/// Default: downloads (relative to the working directory)
pub static DOWNLOAD_DIR: Lazy<String> = Lazy::new(|| env::var("DOWNLOAD_DIR").unwrap_or_else(|_| "downloads".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: melodika.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "melodika.log".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Remote API configuration
pub mod api {
    use super::Duration;

    /// Bounded wait for the token-request phase (in seconds)
    pub const TOKEN_TIMEOUT_SECS: u64 = 10;

    /// TCP connect timeout for all API calls (in seconds)
    pub const CONNECT_TIMEOUT_SECS: u64 = 30;

    /// Token-request timeout duration
    ///
    /// The streaming phase intentionally has no timeout: downloads may be
    /// large, so cancellation is caller-driven only.
    pub fn token_timeout() -> Duration {
        Duration::from_secs(TOKEN_TIMEOUT_SECS)
    }

    /// Connect timeout duration
    pub fn connect_timeout() -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }
}

/// Search lookup configuration
pub mod search {
    use super::Duration;

    /// Timeout for a single search request (in seconds)
    pub const TIMEOUT_SECS: u64 = 10;

    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }
}
