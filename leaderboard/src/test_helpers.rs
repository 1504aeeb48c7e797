//! In-memory play service for provider and panel tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use time::OffsetDateTime;
use time::macros::datetime;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::api::LeaderboardApi;
use crate::error::LeaderboardError;
use crate::types::{CreateLeaderboardPayload, Leaderboard, LeaderboardEntry, SortOrder, UpdateLeaderboardPayload};

pub(crate) const START: OffsetDateTime = datetime!(2022-03-01 10:00 UTC);
pub(crate) const RESET_START: OffsetDateTime = datetime!(2022-04-15 08:30 UTC);

pub(crate) fn leaderboard(name: &str, sort: SortOrder) -> Leaderboard {
    Leaderboard { id: Uuid::new_v4(), name: name.into(), sort, start_datetime: START }
}

pub(crate) fn entry(leaderboard_id: Uuid, player_name: &str, score: f64) -> LeaderboardEntry {
    LeaderboardEntry {
        id: Uuid::new_v4(),
        leaderboard_id,
        player_name: player_name.into(),
        score,
        created_at: START,
    }
}

#[derive(Default)]
pub(crate) struct MockApi {
    pub(crate) leaderboards: Mutex<Vec<Leaderboard>>,
    pub(crate) entries: Mutex<HashMap<Uuid, Vec<LeaderboardEntry>>>,
    pub(crate) calls: Mutex<Vec<String>>,
    updates: Mutex<Vec<serde_json::Value>>,
    fail_next: Mutex<Option<LeaderboardError>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockApi {
    pub(crate) fn with_leaderboards(leaderboards: Vec<Leaderboard>) -> Self {
        let api = Self::default();
        *api.leaderboards.lock().unwrap() = leaderboards;
        api
    }

    pub(crate) fn set_entries(&self, leaderboard_id: Uuid, entries: Vec<LeaderboardEntry>) {
        self.entries.lock().unwrap().insert(leaderboard_id, entries);
    }

    /// Make the next call fail with `error`.
    pub(crate) fn fail_next(&self, error: LeaderboardError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    /// Hold the next call until the returned handle is notified.
    pub(crate) fn hold_next(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Body of every update request, serialized as it goes on the wire.
    pub(crate) fn updates(&self) -> Vec<serde_json::Value> {
        self.updates.lock().unwrap().clone()
    }

    async fn enter(&self, call: String) -> Result<(), LeaderboardError> {
        self.calls.lock().unwrap().push(call);
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let failure = self.fail_next.lock().unwrap().take();
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn modify(&self, leaderboard_id: Uuid, change: impl FnOnce(&mut Leaderboard)) -> Result<Leaderboard, LeaderboardError> {
        let mut leaderboards = self.leaderboards.lock().unwrap();
        let found = leaderboards
            .iter_mut()
            .find(|l| l.id == leaderboard_id)
            .ok_or(LeaderboardError::ApiResponse { status: 404, body: "not found".into() })?;
        change(found);
        Ok(found.clone())
    }
}

#[async_trait::async_trait]
impl LeaderboardApi for MockApi {
    async fn list_leaderboards(&self, _game_id: Uuid) -> Result<Vec<Leaderboard>, LeaderboardError> {
        self.enter("list".into()).await?;
        Ok(self.leaderboards.lock().unwrap().clone())
    }

    async fn create_leaderboard(
        &self,
        _game_id: Uuid,
        payload: &CreateLeaderboardPayload,
    ) -> Result<Leaderboard, LeaderboardError> {
        self.enter("create".into()).await?;
        let created = leaderboard(&payload.name, payload.sort);
        self.leaderboards.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_leaderboard(
        &self,
        _game_id: Uuid,
        leaderboard_id: Uuid,
        payload: &UpdateLeaderboardPayload,
    ) -> Result<Leaderboard, LeaderboardError> {
        let body = serde_json::to_value(payload).unwrap();
        self.updates.lock().unwrap().push(body);
        self.enter(format!("update {leaderboard_id}")).await?;
        self.modify(leaderboard_id, |l| payload.apply_to(l))
    }

    async fn reset_leaderboard(&self, _game_id: Uuid, leaderboard_id: Uuid) -> Result<Leaderboard, LeaderboardError> {
        self.enter(format!("reset {leaderboard_id}")).await?;
        let reset = self.modify(leaderboard_id, |l| l.start_datetime = RESET_START)?;
        self.entries.lock().unwrap().remove(&leaderboard_id);
        Ok(reset)
    }

    async fn list_entries(&self, _game_id: Uuid, leaderboard_id: Uuid) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        self.enter(format!("entries {leaderboard_id}")).await?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&leaderboard_id)
            .cloned()
            .unwrap_or_default())
    }
}
