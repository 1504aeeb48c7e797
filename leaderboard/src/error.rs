//! Leaderboard errors.

use uuid::Uuid;

/// Errors produced by the panel controller, the provider, and the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    /// No connectivity; data operations are not attempted.
    #[error("an internet connection is required to administrate leaderboards")]
    Offline,

    /// Another request from this panel is still in flight.
    #[error("a leaderboard request is already pending")]
    Busy,

    /// The action conflicts with an open rename.
    #[error("finish or cancel renaming the leaderboard first")]
    EditingInProgress,

    /// The action needs an open rename.
    #[error("the leaderboard name is not being edited")]
    NotEditing,

    /// No leaderboard is selected.
    #[error("no leaderboard selected")]
    NoCurrentLeaderboard,

    /// The id is not part of the loaded list.
    #[error("leaderboard not found: {0}")]
    NotFound(Uuid),

    /// The HTTP request could not be sent or its body not read.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The service returned a non-success status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// Writing to the clipboard failed.
    #[error("clipboard write failed: {0}")]
    Clipboard(String),
}

impl LeaderboardError {
    /// Grepable code for logs and CLI output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Offline => "E_OFFLINE",
            Self::Busy => "E_BUSY",
            Self::EditingInProgress => "E_EDITING_IN_PROGRESS",
            Self::NotEditing => "E_NOT_EDITING",
            Self::NoCurrentLeaderboard => "E_NO_CURRENT_LEADERBOARD",
            Self::NotFound(_) => "E_LEADERBOARD_NOT_FOUND",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::Clipboard(_) => "E_CLIPBOARD",
        }
    }

    /// Whether trying the same action again may succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Busy | Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. }
        )
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
