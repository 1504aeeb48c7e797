//! User-interaction seams the panel needs from its host.
//!
//! DESIGN
//! ======
//! Resetting a leaderboard is destructive, so the panel asks the host to
//! confirm first. The question is an awaited request/response step: the
//! reset future suspends until the host answers, and nothing else in the
//! host is blocked meanwhile.

use crate::error::LeaderboardError;

/// Shown before a reset. Must spell out that the reset cannot be undone.
pub const RESET_CONFIRMATION_MESSAGE: &str = "All current entries will be deleted, are you sure you want to reset this leaderboard? This can't be undone.";

/// Modal yes/no question.
#[async_trait::async_trait]
pub trait ConfirmDialog: Send + Sync {
    /// Ask `message` and resolve with the user's answer.
    async fn confirm(&self, message: &str) -> bool;
}

/// Text clipboard.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard content with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::Clipboard`] if the host refuses the write.
    fn write_text(&self, text: &str) -> Result<(), LeaderboardError>;
}
