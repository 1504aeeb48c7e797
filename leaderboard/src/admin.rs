//! Leaderboard administration panel controller.
//!
//! DESIGN
//! ======
//! The panel is headless: hosts call the intent methods (`create`,
//! `submit_rename`, `toggle_sort`, ...) and render whatever [`AdminView`]
//! `view()` describes. Every method takes `&self`, so a host can share one
//! panel between event handlers.
//!
//! At most one service request per panel is in flight. Intents claim a
//! single request slot before calling the provider; a second intent arriving
//! meanwhile gets [`LeaderboardError::Busy`] immediately instead of being
//! queued. The slot is an RAII guard, so it is released (and the host's
//! loading callback told) however the request ends, including when its
//! future is dropped.
//!
//! ERROR HANDLING
//! ==============
//! Offline, every data intent fails with [`LeaderboardError::Offline`]
//! without touching the service, and `view()` shows the offline
//! placeholder. A failed first list shows a retryable error placeholder.
//! Mutation failures are returned to the caller with the slot released.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};
use uuid::Uuid;

use crate::api::LeaderboardApi;
use crate::connectivity::Connectivity;
use crate::display::{break_uuid, format_date, start_date_tooltip};
use crate::error::LeaderboardError;
use crate::interaction::{Clipboard, ConfirmDialog, RESET_CONFIRMATION_MESSAGE};
use crate::provider::LeaderboardProvider;
use crate::types::{CreateLeaderboardPayload, Leaderboard, LeaderboardEntry, SortOrder, UpdateLeaderboardPayload};

pub const OFFLINE_MESSAGE: &str = "An internet connection is required to administrate your game's leaderboards.";
pub const LOAD_ERROR_MESSAGE: &str = "An error ocurred when retrieving leaderboards, please try again later.";

/// Host callback told when a mutation starts (`true`) and settles (`false`).
pub type LoadingCallback = Box<dyn Fn(bool) + Send + Sync>;

// =============================================================================
// VIEW MODEL
// =============================================================================

/// What the panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminView {
    /// Replaces the whole panel while offline.
    Offline { message: &'static str },
    /// The leaderboard list is being fetched.
    Loading,
    /// The list could not be fetched; `retry()` is offered.
    LoadError { message: &'static str },
    /// The game has no leaderboard yet; `create_first()` is offered.
    Empty(EmptyPlaceholder),
    Ready(ReadyView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyPlaceholder {
    pub title: &'static str,
    pub description: &'static str,
    pub action_label: &'static str,
}

const EMPTY_PLACEHOLDER: EmptyPlaceholder = EmptyPlaceholder {
    title: "Create your game's first leaderboard",
    description: "Leaderboards help retain your players",
    action_label: "Create a leaderboard",
};

/// A button or field and whether it currently accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardOption {
    pub id: Uuid,
    pub name: String,
}

/// Name row: a selector over the list, or the rename text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameField {
    Selector { selected: Option<Uuid> },
    Editing { draft: String, enabled: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyView {
    pub options: Vec<LeaderboardOption>,
    pub name_field: NameField,
    pub create: Control,
    pub current: Option<CurrentLeaderboardCard>,
    pub entries: Option<Vec<LeaderboardEntry>>,
}

/// Details and actions of the selected leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentLeaderboardCard {
    pub id: Uuid,
    /// First and last id segments; the full id is the hover text.
    pub short_id: String,
    pub name: String,
    pub start_date: String,
    pub start_date_tooltip: String,
    pub sort: SortOrder,
    pub sort_label: &'static str,
    /// Only present while renaming.
    pub cancel: Option<Control>,
    /// "Rename", or "Save" while renaming.
    pub rename: Control,
    pub copy_id: Control,
    pub reset: Control,
    pub toggle_sort: Control,
}

/// Keys the rename field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResetOutcome {
    /// The user declined; no request was sent.
    Declined,
    Reset(Leaderboard),
}

// =============================================================================
// REQUEST SLOT
// =============================================================================

#[derive(Debug, Default)]
struct PanelState {
    is_editing_name: bool,
    draft_name: String,
    is_request_pending: bool,
    list_requested: bool,
}

/// What an intent requires of the rename state besides a free slot.
#[derive(Debug, Clone, Copy)]
enum Guard {
    Any,
    NotRenaming,
    Renaming,
}

/// Occupied request slot. Dropping it frees the slot.
struct RequestSlot<'a> {
    state: &'a Mutex<PanelState>,
    on_loading: Option<&'a (dyn Fn(bool) + Send + Sync)>,
}

impl Drop for RequestSlot<'_> {
    fn drop(&mut self) {
        lock(self.state).is_request_pending = false;
        if let Some(on_loading) = self.on_loading {
            on_loading(false);
        }
    }
}

fn lock(state: &Mutex<PanelState>) -> MutexGuard<'_, PanelState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Panel controller over a [`LeaderboardProvider`].
pub struct LeaderboardAdmin<A, C> {
    provider: LeaderboardProvider<A>,
    connectivity: C,
    on_loading: Option<LoadingCallback>,
    state: Mutex<PanelState>,
}

impl<A: LeaderboardApi, C: Connectivity> LeaderboardAdmin<A, C> {
    pub fn new(provider: LeaderboardProvider<A>, connectivity: C) -> Self {
        Self { provider, connectivity, on_loading: None, state: Mutex::new(PanelState::default()) }
    }

    /// Panel with its own provider for `game_id`.
    pub fn for_game(api: A, game_id: Uuid, connectivity: C) -> Self {
        Self::new(LeaderboardProvider::new(api, game_id), connectivity)
    }

    /// Register the host's loading callback.
    #[must_use]
    pub fn with_loading_callback(mut self, on_loading: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_loading = Some(Box::new(on_loading));
        self
    }

    #[must_use]
    pub fn provider(&self) -> &LeaderboardProvider<A> {
        &self.provider
    }

    #[must_use]
    pub fn is_request_pending(&self) -> bool {
        lock(&self.state).is_request_pending
    }

    #[must_use]
    pub fn is_editing_name(&self) -> bool {
        lock(&self.state).is_editing_name
    }

    fn admit(&self, state: &PanelState, guard: Guard) -> Result<(), LeaderboardError> {
        if !self.connectivity.is_online() {
            return Err(LeaderboardError::Offline);
        }
        if state.is_request_pending {
            return Err(LeaderboardError::Busy);
        }
        match guard {
            Guard::NotRenaming if state.is_editing_name => Err(LeaderboardError::EditingInProgress),
            Guard::Renaming if !state.is_editing_name => Err(LeaderboardError::NotEditing),
            _ => Ok(()),
        }
    }

    fn claim(&self, guard: Guard, notify: bool) -> Result<RequestSlot<'_>, LeaderboardError> {
        {
            let mut state = lock(&self.state);
            self.admit(&state, guard)?;
            state.is_request_pending = true;
        }
        let on_loading = if notify { self.on_loading.as_deref() } else { None };
        if let Some(on_loading) = on_loading {
            on_loading(true);
        }
        Ok(RequestSlot { state: &self.state, on_loading })
    }

    // =========================================================================
    // LIST
    // =========================================================================

    /// First display: request the list once if it is not loaded yet.
    /// Does nothing offline.
    ///
    /// # Errors
    ///
    /// Returns the list error; the view then shows the retry placeholder.
    pub async fn mount(&self) -> Result<(), LeaderboardError> {
        if !self.connectivity.is_online() || self.provider.leaderboards().is_some() {
            return Ok(());
        }
        let already_requested = std::mem::replace(&mut lock(&self.state).list_requested, true);
        if already_requested {
            return Ok(());
        }
        self.load_list().await
    }

    /// User-initiated reload after a failed list.
    ///
    /// # Errors
    ///
    /// Returns the list error.
    pub async fn retry(&self) -> Result<(), LeaderboardError> {
        lock(&self.state).list_requested = true;
        self.load_list().await
    }

    async fn load_list(&self) -> Result<(), LeaderboardError> {
        let slot = self.claim(Guard::Any, false)?;
        let result = self.provider.list_leaderboards().await;
        drop(slot);
        if let Err(e) = &result {
            warn!(error = %e, game_id = %self.provider.game_id(), "leaderboard list failed");
        }
        result.map(|_| ())
    }

    // =========================================================================
    // INTENTS
    // =========================================================================

    /// Empty-state call to action: create the game's first leaderboard.
    ///
    /// # Errors
    ///
    /// Returns availability errors or the service error.
    pub async fn create_first(&self) -> Result<Leaderboard, LeaderboardError> {
        self.create_with(Guard::Any).await
    }

    /// Add button: create a default leaderboard and select it.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::EditingInProgress`] while renaming,
    /// availability errors, or the service error.
    pub async fn create(&self) -> Result<Leaderboard, LeaderboardError> {
        self.create_with(Guard::NotRenaming).await
    }

    async fn create_with(&self, guard: Guard) -> Result<Leaderboard, LeaderboardError> {
        let slot = self.claim(guard, true)?;
        let created = self
            .provider
            .create_leaderboard(&CreateLeaderboardPayload::default())
            .await?;
        self.provider.select_leaderboard(created.id).await?;
        drop(slot);
        Ok(created)
    }

    /// Switch the selected leaderboard. The selector is replaced by the name
    /// field while renaming, so the draft always targets the leaderboard it
    /// was taken from.
    ///
    /// # Errors
    ///
    /// Returns availability errors, [`LeaderboardError::EditingInProgress`]
    /// while renaming, [`LeaderboardError::NotFound`], or the service error
    /// from fetching entries.
    pub async fn select(&self, leaderboard_id: Uuid) -> Result<(), LeaderboardError> {
        let slot = self.claim(Guard::NotRenaming, false)?;
        let result = self.provider.select_leaderboard(leaderboard_id).await;
        drop(slot);
        result
    }

    /// Enter rename mode with the current name as draft.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::Busy`] while a request is pending or
    /// [`LeaderboardError::NoCurrentLeaderboard`].
    pub fn begin_rename(&self) -> Result<(), LeaderboardError> {
        let current = self
            .provider
            .current_leaderboard()
            .ok_or(LeaderboardError::NoCurrentLeaderboard)?;
        let mut state = lock(&self.state);
        if state.is_request_pending {
            return Err(LeaderboardError::Busy);
        }
        state.draft_name = current.name;
        state.is_editing_name = true;
        Ok(())
    }

    /// Replace the rename draft.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::NotEditing`] outside rename mode or
    /// [`LeaderboardError::Busy`] while the field is disabled.
    pub fn set_draft(&self, text: impl Into<String>) -> Result<(), LeaderboardError> {
        let mut state = lock(&self.state);
        if !state.is_editing_name {
            return Err(LeaderboardError::NotEditing);
        }
        if state.is_request_pending {
            return Err(LeaderboardError::Busy);
        }
        state.draft_name = text.into();
        Ok(())
    }

    /// Leave rename mode without saving.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::Busy`] while a request is pending or
    /// [`LeaderboardError::NotEditing`].
    pub fn cancel_rename(&self) -> Result<(), LeaderboardError> {
        let mut state = lock(&self.state);
        if state.is_request_pending {
            return Err(LeaderboardError::Busy);
        }
        if !state.is_editing_name {
            return Err(LeaderboardError::NotEditing);
        }
        state.is_editing_name = false;
        Ok(())
    }

    /// Save the draft as the new name. Rename mode ends once the update succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::NotEditing`], availability errors, or the
    /// service error (rename mode stays open).
    pub async fn submit_rename(&self) -> Result<Leaderboard, LeaderboardError> {
        let slot = self.claim(Guard::Renaming, true)?;
        let draft = lock(&self.state).draft_name.clone();
        let updated = self
            .provider
            .update_leaderboard(&UpdateLeaderboardPayload::name(draft))
            .await?;
        lock(&self.state).is_editing_name = false;
        drop(slot);
        Ok(updated)
    }

    /// Key press in the rename field; Enter submits.
    ///
    /// # Errors
    ///
    /// Same as [`LeaderboardAdmin::submit_rename`] for Enter.
    pub async fn key_press(&self, key: Key) -> Result<(), LeaderboardError> {
        if key != Key::Enter || !self.is_editing_name() {
            return Ok(());
        }
        self.submit_rename().await.map(|_| ())
    }

    /// Flip between "lower is better" and "higher is better".
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::EditingInProgress`] while renaming,
    /// availability errors, or the service error.
    pub async fn toggle_sort(&self) -> Result<Leaderboard, LeaderboardError> {
        let slot = self.claim(Guard::NotRenaming, true)?;
        let current = self
            .provider
            .current_leaderboard()
            .ok_or(LeaderboardError::NoCurrentLeaderboard)?;
        let updated = self
            .provider
            .update_leaderboard(&UpdateLeaderboardPayload::sort(current.sort.toggled()))
            .await?;
        drop(slot);
        Ok(updated)
    }

    /// Delete every entry of the selected leaderboard after the user confirms.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::EditingInProgress`] while renaming,
    /// availability errors, or the service error.
    pub async fn reset(&self, dialog: &dyn ConfirmDialog) -> Result<ResetOutcome, LeaderboardError> {
        self.admit(&lock(&self.state), Guard::NotRenaming)?;
        if self.provider.current_leaderboard().is_none() {
            return Err(LeaderboardError::NoCurrentLeaderboard);
        }
        if !dialog.confirm(RESET_CONFIRMATION_MESSAGE).await {
            info!("leaderboard reset declined");
            return Ok(ResetOutcome::Declined);
        }
        // State may have moved while the dialog was open.
        let slot = self.claim(Guard::NotRenaming, true)?;
        let reset = self.provider.reset_leaderboard().await?;
        drop(slot);
        Ok(ResetOutcome::Reset(reset))
    }

    /// Copy the full id of the selected leaderboard.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::NoCurrentLeaderboard`] or the clipboard error.
    pub fn copy_id(&self, clipboard: &dyn Clipboard) -> Result<Uuid, LeaderboardError> {
        let current = self
            .provider
            .current_leaderboard()
            .ok_or(LeaderboardError::NoCurrentLeaderboard)?;
        clipboard.write_text(&current.id.to_string())?;
        Ok(current.id)
    }

    // =========================================================================
    // VIEW
    // =========================================================================

    /// Describe what the panel shows right now.
    #[must_use]
    pub fn view(&self) -> AdminView {
        if !self.connectivity.is_online() {
            return AdminView::Offline { message: OFFLINE_MESSAGE };
        }
        let (editing, draft, pending, list_requested) = {
            let state = lock(&self.state);
            (state.is_editing_name, state.draft_name.clone(), state.is_request_pending, state.list_requested)
        };

        let Some(leaderboards) = self.provider.leaderboards() else {
            return if pending || !list_requested {
                AdminView::Loading
            } else {
                AdminView::LoadError { message: LOAD_ERROR_MESSAGE }
            };
        };
        if leaderboards.is_empty() {
            return AdminView::Empty(EMPTY_PLACEHOLDER);
        }

        let current = self.provider.current_leaderboard();
        let name_field = if editing {
            NameField::Editing { draft, enabled: !pending }
        } else {
            NameField::Selector { selected: current.as_ref().map(|l| l.id) }
        };
        let card = current.map(|leaderboard| CurrentLeaderboardCard {
            id: leaderboard.id,
            short_id: break_uuid(&leaderboard.id.to_string()),
            start_date: format_date(leaderboard.start_datetime),
            start_date_tooltip: start_date_tooltip(leaderboard.start_datetime),
            sort: leaderboard.sort,
            sort_label: leaderboard.sort.label(),
            name: leaderboard.name,
            cancel: editing.then_some(Control { label: "Cancel", enabled: !pending }),
            rename: Control { label: if editing { "Save" } else { "Rename" }, enabled: !pending },
            copy_id: Control { label: "Copy", enabled: true },
            reset: Control { label: "Reset leaderboard", enabled: !pending && !editing },
            toggle_sort: Control { label: "Change sort direction", enabled: !pending && !editing },
        });

        AdminView::Ready(ReadyView {
            options: leaderboards
                .into_iter()
                .map(|l| LeaderboardOption { id: l.id, name: l.name })
                .collect(),
            name_field,
            create: Control { label: "Add", enabled: !editing && !pending },
            current: card,
            entries: self.provider.browsing().entries,
        })
    }
}
