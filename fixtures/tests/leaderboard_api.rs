//! The leaderboard HTTP client and panel against the in-memory play service.

use std::sync::Mutex;

use fixtures::mock_leaderboard_api::{self, MockLeaderboardStore};
use leaderboard::admin::{AdminView, ResetOutcome};
use leaderboard::interaction::ConfirmDialog;
use leaderboard::{
    CreateLeaderboardPayload, HttpLeaderboardApi, Leaderboard, LeaderboardAdmin, LeaderboardApi, LeaderboardConfig,
    LeaderboardEntry, OnlineStatus, SortOrder, UpdateLeaderboardPayload,
};
use time::OffsetDateTime;
use uuid::Uuid;

async fn client(store: MockLeaderboardStore) -> HttpLeaderboardApi {
    let addr = fixtures::spawn(mock_leaderboard_api::router(store)).await.unwrap();
    let config = LeaderboardConfig::default().with_base_url(&format!("http://{addr}"));
    HttpLeaderboardApi::new(config).unwrap()
}

fn seeded(store: &MockLeaderboardStore, game_id: Uuid, sort: SortOrder, scores: &[f64]) -> Leaderboard {
    let now = OffsetDateTime::now_utc();
    let leaderboard = Leaderboard {
        id: Uuid::new_v4(),
        name: "Best times".into(),
        sort,
        start_datetime: now - time::Duration::hours(1),
    };
    let entries = scores
        .iter()
        .enumerate()
        .map(|(i, score)| LeaderboardEntry {
            id: Uuid::new_v4(),
            leaderboard_id: leaderboard.id,
            player_name: format!("Player {}", i + 1),
            score: *score,
            created_at: now,
        })
        .collect();
    store.seed(game_id, leaderboard.clone(), entries);
    leaderboard
}

struct Yes(Mutex<u32>);

#[async_trait::async_trait]
impl ConfirmDialog for Yes {
    async fn confirm(&self, _message: &str) -> bool {
        *self.0.lock().unwrap() += 1;
        true
    }
}

// =============================================================================
// HttpLeaderboardApi
// =============================================================================

#[tokio::test]
async fn list_is_scoped_by_game() {
    let store = MockLeaderboardStore::default();
    let game_id = Uuid::new_v4();
    let expected = seeded(&store, game_id, SortOrder::Asc, &[]);
    seeded(&store, Uuid::new_v4(), SortOrder::Desc, &[1.0]);
    let api = client(store).await;

    let listed = api.list_leaderboards(game_id).await.unwrap();

    assert_eq!(listed, vec![expected]);
    assert!(api.list_leaderboards(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_then_update_round_trips_through_service() {
    let store = MockLeaderboardStore::default();
    let game_id = Uuid::new_v4();
    let api = client(store.clone()).await;

    let created = api
        .create_leaderboard(game_id, &CreateLeaderboardPayload::default())
        .await
        .unwrap();
    let renamed = api
        .update_leaderboard(game_id, created.id, &UpdateLeaderboardPayload::name("Fastest runs"))
        .await
        .unwrap();
    let flipped = api
        .update_leaderboard(game_id, created.id, &UpdateLeaderboardPayload::sort(SortOrder::Desc))
        .await
        .unwrap();

    assert_eq!(created.name, "New leaderboard");
    assert_eq!(renamed.name, "Fastest runs");
    assert_eq!(flipped.name, "Fastest runs");
    assert_eq!(flipped.sort, SortOrder::Desc);
    assert_eq!(store.leaderboards(game_id), vec![flipped]);
}

#[tokio::test]
async fn entries_are_ranked_and_capped() {
    let store = MockLeaderboardStore::default();
    let game_id = Uuid::new_v4();
    let scores: Vec<f64> = (0..30).map(f64::from).collect();
    let ascending = seeded(&store, game_id, SortOrder::Asc, &scores);
    let descending = seeded(&store, game_id, SortOrder::Desc, &[3.0, 9.0, 1.0]);
    let api = client(store).await;

    let best_low = api.list_entries(game_id, ascending.id).await.unwrap();
    let best_high = api.list_entries(game_id, descending.id).await.unwrap();

    assert_eq!(best_low.len(), 20);
    assert_eq!(best_low[0].score, 0.0);
    let high: Vec<f64> = best_high.iter().map(|e| e.score).collect();
    assert_eq!(high, vec![9.0, 3.0, 1.0]);
}

#[tokio::test]
async fn reset_moves_start_and_drops_entries() {
    let store = MockLeaderboardStore::default();
    let game_id = Uuid::new_v4();
    let leaderboard = seeded(&store, game_id, SortOrder::Asc, &[5.0, 6.0]);
    let api = client(store.clone()).await;

    let reset = api.reset_leaderboard(game_id, leaderboard.id).await.unwrap();

    assert!(reset.start_datetime > leaderboard.start_datetime);
    assert!(api.list_entries(game_id, leaderboard.id).await.unwrap().is_empty());
    assert!(store.entries(game_id, leaderboard.id).is_empty());
}

#[tokio::test]
async fn unknown_leaderboard_is_api_response_404() {
    let store = MockLeaderboardStore::default();
    let game_id = Uuid::new_v4();
    seeded(&store, game_id, SortOrder::Asc, &[]);
    let api = client(store).await;

    let err = api
        .update_leaderboard(game_id, Uuid::new_v4(), &UpdateLeaderboardPayload::name("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, leaderboard::LeaderboardError::ApiResponse { status: 404, .. }));
    assert!(!err.retryable());
}

// =============================================================================
// LeaderboardAdmin end to end
// =============================================================================

#[tokio::test]
async fn panel_administers_a_game_over_http() {
    let store = MockLeaderboardStore::default();
    let game_id = Uuid::new_v4();
    let api = client(store.clone()).await;
    let panel = LeaderboardAdmin::for_game(api, game_id, OnlineStatus::default());

    panel.mount().await.unwrap();
    assert!(matches!(panel.view(), AdminView::Empty(_)));

    let created = panel.create_first().await.unwrap();
    panel.begin_rename().unwrap();
    panel.set_draft("My Board").unwrap();
    panel.submit_rename().await.unwrap();
    panel.toggle_sort().await.unwrap();

    let stored = store.leaderboards(game_id);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, created.id);
    assert_eq!(stored[0].name, "My Board");
    assert_eq!(stored[0].sort, SortOrder::Desc);

    let dialog = Yes(Mutex::new(0));
    let outcome = panel.reset(&dialog).await.unwrap();
    assert!(matches!(outcome, ResetOutcome::Reset(ref reset) if reset.id == created.id));
    assert_eq!(*dialog.0.lock().unwrap(), 1);

    let AdminView::Ready(ready) = panel.view() else {
        panic!("expected ready view");
    };
    assert_eq!(ready.entries, Some(Vec::new()));
    assert_eq!(ready.current.unwrap().name, "My Board");
}
