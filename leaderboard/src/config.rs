//! Play service client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::LeaderboardError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.gdevelop.io/play";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ENTRIES_MAX_COUNT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeouts: Timeouts,
    pub entries_max_count: u32,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            auth_token: None,
            timeouts: Timeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            entries_max_count: DEFAULT_ENTRIES_MAX_COUNT,
        }
    }
}

impl LeaderboardConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `LEADERBOARD_API_BASE_URL`: default `https://api.gdevelop.io/play`
    /// - `LEADERBOARD_AUTH_TOKEN`: bearer token, none by default
    /// - `LEADERBOARD_REQUEST_TIMEOUT_SECS`: default 30
    /// - `LEADERBOARD_CONNECT_TIMEOUT_SECS`: default 10
    /// - `LEADERBOARD_ENTRIES_MAX_COUNT`: default 20
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::ConfigParse`] for a numeric value that does not parse.
    pub fn from_env() -> Result<Self, LeaderboardError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LeaderboardConfig::from_env`] with an explicit variable source.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::ConfigParse`] for a numeric value that does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LeaderboardError> {
        let base_url = lookup("LEADERBOARD_API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let auth_token = lookup("LEADERBOARD_AUTH_TOKEN").filter(|token| !token.is_empty());
        let timeouts = Timeouts {
            request_secs: parse_or(&lookup, "LEADERBOARD_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_or(&lookup, "LEADERBOARD_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        let entries_max_count = parse_or(&lookup, "LEADERBOARD_ENTRIES_MAX_COUNT", DEFAULT_ENTRIES_MAX_COUNT)?;

        Ok(Self {
            base_url: normalize_base_url(&base_url),
            auth_token,
            timeouts,
            entries_max_count,
        })
    }

    /// Replace the base URL, trimming trailing slashes.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, LeaderboardError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| LeaderboardError::ConfigParse(format!("{key}: `{raw}` is not a valid number"))),
    }
}
