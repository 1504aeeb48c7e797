//! Terminal implementations of the panel's interaction seams.

use leaderboard::LeaderboardError;
use leaderboard::interaction::{Clipboard, ConfirmDialog};
use tracing::warn;

/// Asks on the terminal through `dialoguer`. Defaults to "no".
pub struct TerminalConfirm;

#[async_trait::async_trait]
impl ConfirmDialog for TerminalConfirm {
    async fn confirm(&self, message: &str) -> bool {
        let prompt = message.to_owned();
        let answer = tokio::task::spawn_blocking(move || {
            dialoguer::Confirm::with_theme(&dialoguer::theme::ColorfulTheme::default())
                .with_prompt(prompt)
                .default(false)
                .interact()
        })
        .await;
        match answer {
            Ok(Ok(confirmed)) => confirmed,
            Ok(Err(e)) => {
                warn!(error = %e, "confirmation prompt failed; treating as declined");
                false
            }
            Err(e) => {
                warn!(error = %e, "confirmation prompt task failed; treating as declined");
                false
            }
        }
    }
}

/// Answers yes without asking, for `--yes`.
pub struct AssumeYes;

#[async_trait::async_trait]
impl ConfirmDialog for AssumeYes {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// A terminal has no clipboard; the text goes to stdout for piping.
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&self, text: &str) -> Result<(), LeaderboardError> {
        println!("{text}");
        Ok(())
    }
}
