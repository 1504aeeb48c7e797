//! Plain-text rendering of the panel view.

#[cfg(test)]
#[path = "output_test.rs"]
mod output_test;

use leaderboard::admin::{AdminView, CurrentLeaderboardCard, ReadyView};
use leaderboard::display::format_short_datetime;
use leaderboard::LeaderboardEntry;

/// Lines describing the view as a whole: placeholders, or the selected card.
pub fn view_lines(view: &AdminView) -> Vec<String> {
    match view {
        AdminView::Offline { message } | AdminView::LoadError { message } => vec![(*message).to_owned()],
        AdminView::Loading => vec!["Loading leaderboards...".to_owned()],
        AdminView::Empty(placeholder) => vec![
            placeholder.title.to_owned(),
            placeholder.description.to_owned(),
            format!("Run `create` to {}.", placeholder.action_label.to_lowercase()),
        ],
        AdminView::Ready(ready) => match &ready.current {
            Some(card) => card_lines(card),
            None => vec!["No leaderboard selected.".to_owned()],
        },
    }
}

/// Leaderboard names, the selected one marked with `*`.
pub fn option_lines(ready: &ReadyView) -> Vec<String> {
    let selected = ready.current.as_ref().map(|card| card.id);
    ready
        .options
        .iter()
        .map(|option| {
            let marker = if Some(option.id) == selected { '*' } else { ' ' };
            format!("{marker} {}  {}", option.id, option.name)
        })
        .collect()
}

pub fn card_lines(card: &CurrentLeaderboardCard) -> Vec<String> {
    vec![
        format!("Name:       {}", card.name),
        format!("Id:         {} ({})", card.short_id, card.id),
        format!("Start date: {}", card.start_date),
        format!("Sort:       {}", card.sort_label),
    ]
}

/// Rank table; ties keep service order.
pub fn entry_lines(entries: &[LeaderboardEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No entries yet.".to_owned()];
    }
    entries
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            format!(
                "{:>3}. {:<24} {:>12} {}",
                rank + 1,
                entry.player_name,
                entry.score,
                format_short_datetime(entry.created_at)
            )
        })
        .collect()
}
