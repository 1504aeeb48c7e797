//! Story fixtures and mock services for the game dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Dashboard screens are developed and demoed against canned data instead of
//! the live services. This crate holds that data and serves it over HTTP so
//! the real clients can be pointed at it.
//!
//! | Module | Role |
//! |--------|------|
//! | [`version_history`] | Project versions and author profiles of the version history story |
//! | [`mock_user_api`] | User service answering only the public profile lookup |
//! | [`mock_leaderboard_api`] | In-memory play service for the leaderboard endpoints |

pub mod mock_leaderboard_api;
pub mod mock_user_api;
pub mod version_history;

use std::net::SocketAddr;

use axum::Router;
use tracing::error;

/// Serve `router` on an ephemeral localhost port and return the bound address.
///
/// # Errors
///
/// Returns the I/O error if the port cannot be bound.
pub async fn spawn(router: Router) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!(error = %e, %addr, "mock server stopped");
        }
    });
    Ok(addr)
}
