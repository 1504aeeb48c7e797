//! Mock user service for the version history story.
//!
//! Only `GET /user-public-profile` is answered, with the story's author
//! profiles. Anything else is logged as unexpected and answered with a 504
//! and a `null` body, so a screen calling more than it should fails loudly.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::Json;
use axum::routing::get;
use tracing::error;

use crate::version_history::{UserPublicProfile, user_public_profiles_by_ids};

/// Response delay used by the story.
pub const STORY_DELAY_MS: u64 = 1000;
pub const STORY_DELAY: Duration = Duration::from_millis(STORY_DELAY_MS);

#[derive(Clone)]
struct UserApiState {
    delay: Duration,
    profiles: Arc<BTreeMap<String, UserPublicProfile>>,
}

/// Router answering every request after `delay`.
pub fn router(delay: Duration) -> Router {
    let state = UserApiState { delay, profiles: Arc::new(user_public_profiles_by_ids()) };
    Router::new()
        .route(
            "/user-public-profile",
            get(user_public_profiles).fallback(unexpected_call),
        )
        .fallback(unexpected_call)
        .with_state(state)
}

/// `GET /user-public-profile`: profiles keyed by user id.
async fn user_public_profiles(
    State(state): State<UserApiState>,
) -> Json<BTreeMap<String, UserPublicProfile>> {
    tokio::time::sleep(state.delay).await;
    Json(state.profiles.as_ref().clone())
}

async fn unexpected_call(State(state): State<UserApiState>, method: Method, uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    tokio::time::sleep(state.delay).await;
    error!("Unexpected call to {uri} ({method})");
    (StatusCode::GATEWAY_TIMEOUT, Json(serde_json::Value::Null))
}
