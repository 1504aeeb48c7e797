//! Leaderboard administration for a game dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! A game owner manages the leaderboards of one game through a remote play
//! service: list, create, rename, flip sort direction, reset, and browse
//! entries. This crate is the headless half of that panel. The
//! [`provider::LeaderboardProvider`] caches what the service returned, and
//! [`admin::LeaderboardAdmin`] turns user intents into service calls and
//! describes what the panel should show as an [`admin::AdminView`].
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Wire types: leaderboards, entries, payloads |
//! | [`api`] | Service trait |
//! | [`http`] | `reqwest` implementation of the service trait |
//! | [`config`] | Environment-driven client configuration |
//! | [`provider`] | Cached leaderboard list, selection, entries |
//! | [`admin`] | Panel controller and view model |
//! | [`connectivity`] | Online/offline signal |
//! | [`interaction`] | Confirmation and clipboard seams |
//! | [`display`] | Id truncation and date formatting |
//! | [`error`] | Crate error type |

pub mod admin;
pub mod api;
pub mod config;
pub mod connectivity;
pub mod display;
pub mod error;
pub mod http;
pub mod interaction;
pub mod provider;
pub mod types;

#[cfg(test)]
mod test_helpers;

pub use admin::{AdminView, LeaderboardAdmin};
pub use api::LeaderboardApi;
pub use config::LeaderboardConfig;
pub use connectivity::{Connectivity, OnlineStatus};
pub use error::LeaderboardError;
pub use http::HttpLeaderboardApi;
pub use provider::LeaderboardProvider;
pub use types::{CreateLeaderboardPayload, Leaderboard, LeaderboardEntry, SortOrder, UpdateLeaderboardPayload};
