//! Play service contract for leaderboards. Enables mocking in tests.

use uuid::Uuid;

use crate::error::LeaderboardError;
use crate::types::{CreateLeaderboardPayload, Leaderboard, LeaderboardEntry, UpdateLeaderboardPayload};

/// Remote leaderboard operations, scoped by game.
#[async_trait::async_trait]
pub trait LeaderboardApi: Send + Sync {
    /// All leaderboards of a game.
    ///
    /// # Errors
    ///
    /// Returns a [`LeaderboardError`] if the request fails or the response is malformed.
    async fn list_leaderboards(&self, game_id: Uuid) -> Result<Vec<Leaderboard>, LeaderboardError>;

    /// Create a leaderboard and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns a [`LeaderboardError`] if the request fails or the response is malformed.
    async fn create_leaderboard(
        &self,
        game_id: Uuid,
        payload: &CreateLeaderboardPayload,
    ) -> Result<Leaderboard, LeaderboardError>;

    /// Update name and/or sort direction and return the updated leaderboard.
    ///
    /// # Errors
    ///
    /// Returns a [`LeaderboardError`] if the request fails or the response is malformed.
    async fn update_leaderboard(
        &self,
        game_id: Uuid,
        leaderboard_id: Uuid,
        payload: &UpdateLeaderboardPayload,
    ) -> Result<Leaderboard, LeaderboardError>;

    /// Delete every entry and restart the leaderboard from now.
    ///
    /// # Errors
    ///
    /// Returns a [`LeaderboardError`] if the request fails or the response is malformed.
    async fn reset_leaderboard(&self, game_id: Uuid, leaderboard_id: Uuid) -> Result<Leaderboard, LeaderboardError>;

    /// Best entries of a leaderboard, in rank order.
    ///
    /// # Errors
    ///
    /// Returns a [`LeaderboardError`] if the request fails or the response is malformed.
    async fn list_entries(&self, game_id: Uuid, leaderboard_id: Uuid) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;
}
