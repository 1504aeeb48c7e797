//! Play service HTTP client.
//!
//! Thin `reqwest` wrapper over the leaderboard endpoints. URL building and
//! response decoding are pure functions so they can be tested without a
//! server.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::api::LeaderboardApi;
use crate::config::LeaderboardConfig;
use crate::error::LeaderboardError;
use crate::types::{CreateLeaderboardPayload, Leaderboard, LeaderboardEntry, UpdateLeaderboardPayload};

// =============================================================================
// ENDPOINTS
// =============================================================================

fn leaderboards_endpoint(base_url: &str, game_id: Uuid) -> String {
    format!("{base_url}/game/{game_id}/leaderboard")
}

fn leaderboard_endpoint(base_url: &str, game_id: Uuid, leaderboard_id: Uuid) -> String {
    format!("{base_url}/game/{game_id}/leaderboard/{leaderboard_id}")
}

fn reset_endpoint(base_url: &str, game_id: Uuid, leaderboard_id: Uuid) -> String {
    format!("{}/reset", leaderboard_endpoint(base_url, game_id, leaderboard_id))
}

fn entries_endpoint(base_url: &str, game_id: Uuid, leaderboard_id: Uuid, max_count: u32) -> String {
    format!(
        "{}/entries?maxCount={max_count}",
        leaderboard_endpoint(base_url, game_id, leaderboard_id)
    )
}

fn parse_body<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, LeaderboardError> {
    if !(200..300).contains(&status) {
        return Err(LeaderboardError::ApiResponse { status, body: text.to_owned() });
    }
    serde_json::from_str(text).map_err(|e| LeaderboardError::ApiParse(e.to_string()))
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpLeaderboardApi {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
    entries_max_count: u32,
}

impl HttpLeaderboardApi {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: LeaderboardConfig) -> Result<Self, LeaderboardError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LeaderboardError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url,
            auth_token: config.auth_token,
            entries_max_count: config.entries_max_count,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, LeaderboardError> {
        let response = builder
            .send()
            .await
            .map_err(|e| LeaderboardError::ApiRequest(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LeaderboardError::ApiRequest(e.to_string()))?;
        debug!(status, bytes = text.len(), "play service responded");
        parse_body(status, &text)
    }
}

#[async_trait::async_trait]
impl LeaderboardApi for HttpLeaderboardApi {
    async fn list_leaderboards(&self, game_id: Uuid) -> Result<Vec<Leaderboard>, LeaderboardError> {
        let url = leaderboards_endpoint(&self.base_url, game_id);
        self.send(self.request(Method::GET, &url)).await
    }

    async fn create_leaderboard(
        &self,
        game_id: Uuid,
        payload: &CreateLeaderboardPayload,
    ) -> Result<Leaderboard, LeaderboardError> {
        let url = leaderboards_endpoint(&self.base_url, game_id);
        self.send(self.request(Method::POST, &url).json(payload)).await
    }

    async fn update_leaderboard(
        &self,
        game_id: Uuid,
        leaderboard_id: Uuid,
        payload: &UpdateLeaderboardPayload,
    ) -> Result<Leaderboard, LeaderboardError> {
        let url = leaderboard_endpoint(&self.base_url, game_id, leaderboard_id);
        self.send(self.request(Method::PATCH, &url).json(payload)).await
    }

    async fn reset_leaderboard(&self, game_id: Uuid, leaderboard_id: Uuid) -> Result<Leaderboard, LeaderboardError> {
        let url = reset_endpoint(&self.base_url, game_id, leaderboard_id);
        self.send(self.request(Method::PUT, &url)).await
    }

    async fn list_entries(&self, game_id: Uuid, leaderboard_id: Uuid) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let url = entries_endpoint(&self.base_url, game_id, leaderboard_id, self.entries_max_count);
        self.send(self.request(Method::GET, &url)).await
    }
}
