use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pumpmaster_application::{PumpListUseCase, SessionUseCase};
use pumpmaster_core::pump::{FilterOptionsSource, PumpService};
use pumpmaster_infrastructure::{
    FileTokenStore, FixtureAuthService, FixturePumpService, PumpMasterPaths, SettingsService,
};

mod app;
mod render;

use app::{ConsoleApp, Outcome};

const COMMANDS: &[&str] = &[
    "delete", "filter", "help", "list", "login", "logout", "mode", "page", "quit", "search",
    "select", "size", "whoami",
];

/// REPL helper that provides command completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        // Only the command word completes; arguments are free-form
        if line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let first = line.split_whitespace().next().unwrap_or("");
        if self.commands.iter().any(|cmd| cmd == first) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.is_empty() || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// Console for browsing and managing pump devices.
#[derive(Parser)]
#[command(name = "pumpmaster")]
#[command(about = "PumpMaster console - browse and manage pump devices", long_about = None)]
struct Cli {
    /// Disable the simulated network latency of the fixture backend
    #[arg(long)]
    no_latency: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

/// Routes structured logs to a JSON file so the prompt stays clean.
fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let logs_dir = PumpMasterPaths::logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(logs_dir.join("console.log"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_writer(Arc::new(log_file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    // ===== Backend Initialization =====
    let settings = SettingsService::new()?;
    let config = settings.get_config();
    let latency = config.fixture.latency && !cli.no_latency;
    tracing::info!(
        "[Console] Starting (page size {}, latency {})",
        config.page_size,
        latency
    );

    let token_store = Arc::new(FileTokenStore::new()?);
    let auth_service = Arc::new(FixtureAuthService::new(latency));
    let pump_service = Arc::new(FixturePumpService::new(latency));

    let sessions = SessionUseCase::new(token_store, auth_service);
    let list = PumpListUseCase::new(
        pump_service.clone() as Arc<dyn PumpService>,
        Some(pump_service as Arc<dyn FilterOptionsSource>),
        config.page_size,
    );
    let console = ConsoleApp::new(sessions, list, config.page_size_options.clone());

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== PumpMaster Console ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    println!();

    console.startup().await;

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match console.handle_command(trimmed).await {
                    Outcome::Continue => {}
                    Outcome::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Outcome::OpenSearchModal { draft } => {
                        run_search_prompt(&mut rl, &console, &draft).await;
                    }
                    Outcome::ConfirmDelete { count } => {
                        run_delete_confirm(&mut rl, &console, count).await;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    tracing::info!("[Console] Shutting down");
    Ok(())
}

/// One round of the search prompt: the committed query is prefilled as
/// the draft, Enter submits, Ctrl-C or Ctrl-D cancels.
async fn run_search_prompt(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    console: &ConsoleApp,
    draft: &str,
) {
    match rl.readline_with_initial("search> ", (draft, "")) {
        Ok(text) => console.submit_search(&text).await,
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => console.cancel_search().await,
        Err(err) => {
            eprintln!("{}", format!("Error: {:?}", err).red());
            console.cancel_search().await;
        }
    }
}

async fn run_delete_confirm(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    console: &ConsoleApp,
    count: usize,
) {
    let prompt = format!("Delete {count} pump(s)? (yes/no) ");
    match rl.readline(&prompt) {
        Ok(answer) => {
            let answer = answer.trim().to_lowercase();
            if answer == "yes" || answer == "y" {
                console.confirm_delete().await;
            } else {
                println!("{}", "Delete cancelled.".yellow());
            }
        }
        Err(_) => println!("{}", "Delete cancelled.".yellow()),
    }
}
