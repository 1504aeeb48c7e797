//! Leaderboard state for one game: the loaded list, the selection, and the
//! entries being browsed.
//!
//! DESIGN
//! ======
//! The provider is what the panel reads from and mutates through. Cached
//! values sit behind a plain mutex that is only held to copy data in or out,
//! never across a service call, so readers (the panel's `view`) are never
//! blocked by a slow request.
//!
//! ERROR HANDLING
//! ==============
//! Service errors are returned unchanged and leave the cache as it was. A
//! failed first load keeps `leaderboards` at `None`, which the panel shows
//! as a retryable error.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};
use uuid::Uuid;

use crate::api::LeaderboardApi;
use crate::error::LeaderboardError;
use crate::types::{CreateLeaderboardPayload, Leaderboard, LeaderboardEntry, UpdateLeaderboardPayload};

/// Entries of the selected leaderboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Browsing {
    /// `None` until fetched for the current selection.
    pub entries: Option<Vec<LeaderboardEntry>>,
}

#[derive(Debug, Default)]
struct Store {
    leaderboards: Option<Vec<Leaderboard>>,
    current_leaderboard_id: Option<Uuid>,
    browsing: Browsing,
}

/// Cached leaderboard data of one game plus the service it came from.
pub struct LeaderboardProvider<A> {
    api: A,
    game_id: Uuid,
    store: Mutex<Store>,
}

impl<A: LeaderboardApi> LeaderboardProvider<A> {
    pub fn new(api: A, game_id: Uuid) -> Self {
        Self { api, game_id, store: Mutex::new(Store::default()) }
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Loaded leaderboards, `None` until the first successful list.
    #[must_use]
    pub fn leaderboards(&self) -> Option<Vec<Leaderboard>> {
        self.store().leaderboards.clone()
    }

    #[must_use]
    pub fn current_leaderboard_id(&self) -> Option<Uuid> {
        self.store().current_leaderboard_id
    }

    /// The selected leaderboard, if it is part of the loaded list.
    #[must_use]
    pub fn current_leaderboard(&self) -> Option<Leaderboard> {
        let store = self.store();
        let current = store.current_leaderboard_id?;
        store
            .leaderboards
            .as_ref()?
            .iter()
            .find(|leaderboard| leaderboard.id == current)
            .cloned()
    }

    #[must_use]
    pub fn browsing(&self) -> Browsing {
        self.store().browsing.clone()
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Fetch the list. When nothing valid is selected, the first leaderboard
    /// is selected and its entries fetched.
    ///
    /// # Errors
    ///
    /// Returns the service error; the cached list is left unchanged.
    pub async fn list_leaderboards(&self) -> Result<Vec<Leaderboard>, LeaderboardError> {
        let leaderboards = self.api.list_leaderboards(self.game_id).await?;
        info!(game_id = %self.game_id, count = leaderboards.len(), "leaderboards listed");

        let select = {
            let mut store = self.store();
            store.leaderboards = Some(leaderboards.clone());
            let still_valid = store
                .current_leaderboard_id
                .is_some_and(|current| leaderboards.iter().any(|l| l.id == current));
            if still_valid {
                None
            } else {
                store.current_leaderboard_id = None;
                store.browsing = Browsing::default();
                leaderboards.first().map(|first| first.id)
            }
        };
        if let Some(first) = select {
            self.select_leaderboard(first).await?;
        }
        Ok(leaderboards)
    }

    /// Create a leaderboard and add it to the list. Does not change the selection.
    ///
    /// # Errors
    ///
    /// Returns the service error.
    pub async fn create_leaderboard(&self, payload: &CreateLeaderboardPayload) -> Result<Leaderboard, LeaderboardError> {
        let created = self.api.create_leaderboard(self.game_id, payload).await?;
        info!(leaderboard_id = %created.id, name = %created.name, "leaderboard created");
        self.store()
            .leaderboards
            .get_or_insert_with(Vec::new)
            .push(created.clone());
        Ok(created)
    }

    /// Select a loaded leaderboard and fetch its entries.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::NotFound`] for ids outside the loaded list,
    /// or the service error from fetching entries.
    pub async fn select_leaderboard(&self, leaderboard_id: Uuid) -> Result<(), LeaderboardError> {
        {
            let mut store = self.store();
            let known = store
                .leaderboards
                .as_ref()
                .is_some_and(|all| all.iter().any(|l| l.id == leaderboard_id));
            if !known {
                return Err(LeaderboardError::NotFound(leaderboard_id));
            }
            store.current_leaderboard_id = Some(leaderboard_id);
            store.browsing = Browsing::default();
        }
        self.fetch_entries().await
    }

    /// Re-fetch the entries of the selected leaderboard.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::NoCurrentLeaderboard`] or the service error.
    pub async fn fetch_entries(&self) -> Result<(), LeaderboardError> {
        let current = self
            .current_leaderboard_id()
            .ok_or(LeaderboardError::NoCurrentLeaderboard)?;
        let entries = match self.api.list_entries(self.game_id, current).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, leaderboard_id = %current, "leaderboard entries fetch failed");
                return Err(e);
            }
        };
        let mut store = self.store();
        // The selection may have moved on while the request was in flight.
        if store.current_leaderboard_id == Some(current) {
            store.browsing.entries = Some(entries);
        }
        Ok(())
    }

    /// Update the selected leaderboard and replace it in the list.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::NoCurrentLeaderboard`] or the service error.
    pub async fn update_leaderboard(&self, payload: &UpdateLeaderboardPayload) -> Result<Leaderboard, LeaderboardError> {
        let current = self
            .current_leaderboard_id()
            .ok_or(LeaderboardError::NoCurrentLeaderboard)?;
        let updated = self
            .api
            .update_leaderboard(self.game_id, current, payload)
            .await?;
        info!(leaderboard_id = %updated.id, name = %updated.name, sort = ?updated.sort, "leaderboard updated");
        self.replace(updated.clone());
        Ok(updated)
    }

    /// Reset the selected leaderboard, then re-fetch its (now empty) entries.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::NoCurrentLeaderboard`] or the service error.
    pub async fn reset_leaderboard(&self) -> Result<Leaderboard, LeaderboardError> {
        let current = self
            .current_leaderboard_id()
            .ok_or(LeaderboardError::NoCurrentLeaderboard)?;
        let reset = self.api.reset_leaderboard(self.game_id, current).await?;
        info!(leaderboard_id = %reset.id, start = %reset.start_datetime, "leaderboard reset");
        self.replace(reset.clone());
        self.store().browsing = Browsing::default();
        self.fetch_entries().await?;
        Ok(reset)
    }

    fn replace(&self, leaderboard: Leaderboard) {
        let mut store = self.store();
        if let Some(slot) = store
            .leaderboards
            .as_mut()
            .and_then(|all| all.iter_mut().find(|l| l.id == leaderboard.id))
        {
            *slot = leaderboard;
        }
    }
}
