use std::time::Duration;

use axum::Router;
use fixtures::mock_leaderboard_api::{self, MockLeaderboardStore};
use fixtures::mock_user_api::{self, STORY_DELAY_MS};
use leaderboard::{Leaderboard, LeaderboardEntry, SortOrder};
use time::OffsetDateTime;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum FixturesError {
    #[error("invalid {var}: `{value}`")]
    InvalidEnv { var: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn env_or<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, FixturesError> {
    match std::env::var(var) {
        Ok(value) => value.parse().map_err(|_| FixturesError::InvalidEnv { var, value }),
        Err(_) => Ok(default),
    }
}

/// One leaderboard with a few scores so the admin panel has something to show.
fn seed_demo_game(store: &MockLeaderboardStore, game_id: Uuid) {
    let now = OffsetDateTime::now_utc();
    let best_times = Leaderboard {
        id: Uuid::new_v4(),
        name: "Best times".into(),
        sort: SortOrder::Asc,
        start_datetime: now - time::Duration::days(7),
    };
    let entries = [("LuniMoon", 42.7), ("alex_", 51.2), ("Player 3", 63.0)]
        .into_iter()
        .map(|(player_name, score)| LeaderboardEntry {
            id: Uuid::new_v4(),
            leaderboard_id: best_times.id,
            player_name: player_name.into(),
            score,
            created_at: now,
        })
        .collect();
    store.seed(game_id, best_times, entries);
}

#[tokio::main]
async fn main() -> Result<(), FixturesError> {
    tracing_subscriber::fmt::init();

    let port: u16 = env_or("PORT", 4000)?;
    let delay = Duration::from_millis(env_or("USER_API_DELAY_MS", STORY_DELAY_MS)?);
    let game_id: Uuid = env_or("LEADERBOARD_GAME_ID", Uuid::new_v4())?;

    let store = MockLeaderboardStore::default();
    seed_demo_game(&store, game_id);

    let app = Router::new()
        .nest("/user", mock_user_api::router(delay))
        .nest("/play", mock_leaderboard_api::router(store))
        .layer(TraceLayer::new_for_http());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, %game_id, delay_ms = delay.as_millis(), "fixtures listening");
    axum::serve(listener, app).await?;
    Ok(())
}
