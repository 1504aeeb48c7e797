//! Wire types shared with the play service.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Name given to leaderboards created from the panel.
pub const DEFAULT_LEADERBOARD_NAME: &str = "New leaderboard";

/// Ranking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Lower scores rank first.
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    /// Higher scores rank first.
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Human label shown next to the sort toggle.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Asc => "Lower is better",
            Self::Desc => "Higher is better",
        }
    }

    /// Parse `asc`/`desc` in any case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// A leaderboard of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub id: Uuid,
    pub name: String,
    pub sort: SortOrder,
    /// Entries submitted before this instant are ignored. Moved forward by a reset.
    #[serde(with = "time::serde::rfc3339")]
    pub start_datetime: OffsetDateTime,
}

/// One submitted score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub leaderboard_id: Uuid,
    pub player_name: String,
    pub score: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLeaderboardPayload {
    pub name: String,
    pub sort: SortOrder,
}

impl Default for CreateLeaderboardPayload {
    fn default() -> Self {
        Self { name: DEFAULT_LEADERBOARD_NAME.to_owned(), sort: SortOrder::Asc }
    }
}

/// Partial update; absent fields are left unchanged by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLeaderboardPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

impl UpdateLeaderboardPayload {
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), sort: None }
    }

    #[must_use]
    pub fn sort(sort: SortOrder) -> Self {
        Self { name: None, sort: Some(sort) }
    }

    /// Apply the present fields to `leaderboard`.
    pub fn apply_to(&self, leaderboard: &mut Leaderboard) {
        if let Some(name) = &self.name {
            leaderboard.name.clone_from(name);
        }
        if let Some(sort) = self.sort {
            leaderboard.sort = sort;
        }
    }
}
