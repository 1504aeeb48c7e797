mod host;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use leaderboard::admin::{AdminView, ResetOutcome};
use leaderboard::types::DEFAULT_LEADERBOARD_NAME;
use leaderboard::{HttpLeaderboardApi, LeaderboardAdmin, LeaderboardConfig, LeaderboardError, OnlineStatus, SortOrder};
use tracing::debug;
use uuid::Uuid;

use crate::host::{AssumeYes, StdoutClipboard, TerminalConfirm};

type Panel = LeaderboardAdmin<HttpLeaderboardApi, OnlineStatus>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Leaderboard(#[from] LeaderboardError),
    #[error("invalid sort direction `{0}`; expected asc or desc")]
    InvalidSort(String),
    #[error("the game has no leaderboard yet; run `create` first")]
    NoLeaderboard,
}

impl CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Leaderboard(e) => e.error_code(),
            Self::InvalidSort(_) => "E_INVALID_SORT",
            Self::NoLeaderboard => "E_NO_LEADERBOARD",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "leaderboard-admin", about = "Administrate the leaderboards of a game")]
struct Cli {
    #[arg(long, env = "LEADERBOARD_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "LEADERBOARD_AUTH_TOKEN", hide_env_values = true)]
    auth_token: Option<String>,

    #[arg(long, env = "LEADERBOARD_GAME_ID")]
    game_id: Uuid,

    /// Act on this leaderboard instead of the first one.
    #[arg(long)]
    leaderboard: Option<Uuid>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the game's leaderboards.
    List,
    /// Show the selected leaderboard.
    Show,
    /// Create a leaderboard and select it.
    Create {
        #[arg(long, default_value = DEFAULT_LEADERBOARD_NAME)]
        name: String,
        /// `asc` (lower is better) or `desc` (higher is better).
        #[arg(long, default_value = "asc")]
        sort: String,
    },
    /// Rename the selected leaderboard.
    Rename { name: String },
    /// Flip the sort direction of the selected leaderboard.
    ToggleSort,
    /// Delete every entry of the selected leaderboard.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Show the best entries of the selected leaderboard.
    Entries,
    /// Print the full id of the selected leaderboard.
    CopyId,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error [{}]: {e}", e.error_code());
            ExitCode::FAILURE
        }
    }
}

fn config(cli: &Cli) -> Result<LeaderboardConfig, CliError> {
    let mut config = LeaderboardConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    if cli.auth_token.is_some() {
        config.auth_token.clone_from(&cli.auth_token);
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let api = HttpLeaderboardApi::new(config(&cli)?)?;
    debug!(base_url = api.base_url(), game_id = %cli.game_id, "connecting to play service");
    let panel = LeaderboardAdmin::for_game(api, cli.game_id, OnlineStatus::default())
        .with_loading_callback(|loading| debug!(loading, "leaderboard request"));

    panel.mount().await?;
    if let Some(leaderboard_id) = cli.leaderboard {
        panel.select(leaderboard_id).await?;
    }

    match cli.command {
        Command::List => run_list(&panel),
        Command::Show => {
            print_lines(&output::view_lines(&panel.view()));
            Ok(())
        }
        Command::Create { name, sort } => run_create(&panel, &name, &sort).await,
        Command::Rename { name } => {
            require_selection(&panel)?;
            panel.begin_rename()?;
            panel.set_draft(name)?;
            panel.submit_rename().await?;
            print_lines(&output::view_lines(&panel.view()));
            Ok(())
        }
        Command::ToggleSort => {
            require_selection(&panel)?;
            panel.toggle_sort().await?;
            print_lines(&output::view_lines(&panel.view()));
            Ok(())
        }
        Command::Reset { yes } => {
            require_selection(&panel)?;
            let outcome = if yes {
                panel.reset(&AssumeYes).await?
            } else {
                panel.reset(&TerminalConfirm).await?
            };
            match outcome {
                ResetOutcome::Declined => println!("Reset cancelled."),
                ResetOutcome::Reset(reset) => println!("Leaderboard \"{}\" reset.", reset.name),
            }
            Ok(())
        }
        Command::Entries => {
            require_selection(&panel)?;
            let AdminView::Ready(ready) = panel.view() else {
                return Err(CliError::NoLeaderboard);
            };
            print_lines(&output::entry_lines(&ready.entries.unwrap_or_default()));
            Ok(())
        }
        Command::CopyId => {
            require_selection(&panel)?;
            panel.copy_id(&StdoutClipboard)?;
            Ok(())
        }
    }
}

fn run_list(panel: &Panel) -> Result<(), CliError> {
    match panel.view() {
        AdminView::Ready(ready) => print_lines(&output::option_lines(&ready)),
        other => print_lines(&output::view_lines(&other)),
    }
    Ok(())
}

async fn run_create(panel: &Panel, name: &str, sort: &str) -> Result<(), CliError> {
    let sort = SortOrder::parse(sort).ok_or_else(|| CliError::InvalidSort(sort.to_owned()))?;
    let created = panel.create().await?;
    if name != created.name {
        panel.begin_rename()?;
        panel.set_draft(name)?;
        panel.submit_rename().await?;
    }
    if sort != created.sort {
        panel.toggle_sort().await?;
    }
    print_lines(&output::view_lines(&panel.view()));
    Ok(())
}

fn require_selection(panel: &Panel) -> Result<(), CliError> {
    match panel.provider().current_leaderboard() {
        Some(_) => Ok(()),
        None => Err(CliError::NoLeaderboard),
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
