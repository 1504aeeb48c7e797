//! In-memory play service for the leaderboard endpoints.
//!
//! DESIGN
//! ======
//! Mirrors the routes `leaderboard::HttpLeaderboardApi` calls, scoped by
//! game, plus entry submission so demos have something to rank. State lives
//! in a cloneable [`MockLeaderboardStore`]; tests keep a handle to seed and
//! inspect it while the router serves requests.
//!
//! ERROR HANDLING
//! ==============
//! Unknown leaderboards answer 404. Authentication is not checked.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, patch, post, put};
use leaderboard::{CreateLeaderboardPayload, Leaderboard, LeaderboardEntry, SortOrder, UpdateLeaderboardPayload};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Game {
    leaderboards: Vec<Leaderboard>,
    entries: HashMap<Uuid, Vec<LeaderboardEntry>>,
}

impl Game {
    fn leaderboard_mut(&mut self, leaderboard_id: Uuid) -> Result<&mut Leaderboard, StatusCode> {
        self.leaderboards
            .iter_mut()
            .find(|l| l.id == leaderboard_id)
            .ok_or(StatusCode::NOT_FOUND)
    }
}

/// Shared service state. Clones see the same games.
#[derive(Debug, Clone, Default)]
pub struct MockLeaderboardStore {
    games: Arc<Mutex<HashMap<Uuid, Game>>>,
}

impl MockLeaderboardStore {
    fn games(&self) -> MutexGuard<'_, HashMap<Uuid, Game>> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a leaderboard with its entries to `game_id`.
    pub fn seed(&self, game_id: Uuid, leaderboard: Leaderboard, entries: Vec<LeaderboardEntry>) {
        let mut games = self.games();
        let game = games.entry(game_id).or_default();
        game.entries.insert(leaderboard.id, entries);
        game.leaderboards.push(leaderboard);
    }

    /// Current leaderboards of `game_id`.
    #[must_use]
    pub fn leaderboards(&self, game_id: Uuid) -> Vec<Leaderboard> {
        self.games()
            .get(&game_id)
            .map(|game| game.leaderboards.clone())
            .unwrap_or_default()
    }

    /// Stored entries of a leaderboard, unranked.
    #[must_use]
    pub fn entries(&self, game_id: Uuid, leaderboard_id: Uuid) -> Vec<LeaderboardEntry> {
        self.games()
            .get(&game_id)
            .and_then(|game| game.entries.get(&leaderboard_id).cloned())
            .unwrap_or_default()
    }
}

pub fn router(store: MockLeaderboardStore) -> Router {
    Router::new()
        .route(
            "/game/{game_id}/leaderboard",
            get(list_leaderboards).post(create_leaderboard),
        )
        .route("/game/{game_id}/leaderboard/{leaderboard_id}", patch(update_leaderboard))
        .route("/game/{game_id}/leaderboard/{leaderboard_id}/reset", put(reset_leaderboard))
        .route("/game/{game_id}/leaderboard/{leaderboard_id}/entries", get(list_entries))
        .route("/game/{game_id}/leaderboard/{leaderboard_id}/entry", post(submit_entry))
        .with_state(store)
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /game/:game_id/leaderboard`
async fn list_leaderboards(
    State(store): State<MockLeaderboardStore>,
    Path(game_id): Path<Uuid>,
) -> Json<Vec<Leaderboard>> {
    Json(store.leaderboards(game_id))
}

/// `POST /game/:game_id/leaderboard`
async fn create_leaderboard(
    State(store): State<MockLeaderboardStore>,
    Path(game_id): Path<Uuid>,
    Json(payload): Json<CreateLeaderboardPayload>,
) -> Json<Leaderboard> {
    let created = Leaderboard {
        id: Uuid::new_v4(),
        name: payload.name,
        sort: payload.sort,
        start_datetime: OffsetDateTime::now_utc(),
    };
    info!(%game_id, leaderboard_id = %created.id, "mock leaderboard created");
    store.seed(game_id, created.clone(), Vec::new());
    Json(created)
}

/// `PATCH /game/:game_id/leaderboard/:leaderboard_id`
async fn update_leaderboard(
    State(store): State<MockLeaderboardStore>,
    Path((game_id, leaderboard_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateLeaderboardPayload>,
) -> Result<Json<Leaderboard>, StatusCode> {
    let mut games = store.games();
    let leaderboard = games
        .get_mut(&game_id)
        .ok_or(StatusCode::NOT_FOUND)?
        .leaderboard_mut(leaderboard_id)?;
    payload.apply_to(leaderboard);
    Ok(Json(leaderboard.clone()))
}

/// `PUT /game/:game_id/leaderboard/:leaderboard_id/reset`
async fn reset_leaderboard(
    State(store): State<MockLeaderboardStore>,
    Path((game_id, leaderboard_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Leaderboard>, StatusCode> {
    let mut games = store.games();
    let game = games.get_mut(&game_id).ok_or(StatusCode::NOT_FOUND)?;
    let leaderboard = game.leaderboard_mut(leaderboard_id)?;
    leaderboard.start_datetime = OffsetDateTime::now_utc();
    let reset = leaderboard.clone();
    game.entries.insert(leaderboard_id, Vec::new());
    info!(%game_id, %leaderboard_id, "mock leaderboard reset");
    Ok(Json(reset))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntriesQuery {
    max_count: Option<usize>,
}

/// `GET /game/:game_id/leaderboard/:leaderboard_id/entries?maxCount=N`
///
/// Best entries first, counting only those submitted since the start date.
async fn list_entries(
    State(store): State<MockLeaderboardStore>,
    Path((game_id, leaderboard_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<EntriesQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, StatusCode> {
    let mut games = store.games();
    let game = games.get_mut(&game_id).ok_or(StatusCode::NOT_FOUND)?;
    let leaderboard = game.leaderboard_mut(leaderboard_id)?.clone();
    let mut ranked: Vec<LeaderboardEntry> = game
        .entries
        .get(&leaderboard_id)
        .into_iter()
        .flatten()
        .filter(|entry| entry.created_at >= leaderboard.start_datetime)
        .cloned()
        .collect();
    ranked.sort_by(|a, b| match leaderboard.sort {
        SortOrder::Asc => a.score.total_cmp(&b.score),
        SortOrder::Desc => b.score.total_cmp(&a.score),
    });
    if let Some(max_count) = query.max_count {
        ranked.truncate(max_count);
    }
    Ok(Json(ranked))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEntryBody {
    pub player_name: String,
    pub score: f64,
}

/// `POST /game/:game_id/leaderboard/:leaderboard_id/entry`
async fn submit_entry(
    State(store): State<MockLeaderboardStore>,
    Path((game_id, leaderboard_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<SubmitEntryBody>,
) -> Result<Json<LeaderboardEntry>, StatusCode> {
    let mut games = store.games();
    let game = games.get_mut(&game_id).ok_or(StatusCode::NOT_FOUND)?;
    game.leaderboard_mut(leaderboard_id)?;
    let entry = LeaderboardEntry {
        id: Uuid::new_v4(),
        leaderboard_id,
        player_name: body.player_name,
        score: body.score,
        created_at: OffsetDateTime::now_utc(),
    };
    game.entries.entry(leaderboard_id).or_default().push(entry.clone());
    Ok(Json(entry))
}
