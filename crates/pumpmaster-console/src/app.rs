//! Console command dispatch.
//!
//! Every command resolves to a use-case call plus rendering; failures are
//! printed in place so the REPL keeps running. Interactive follow-ups
//! (the search prompt, the delete confirmation) are signalled back to the
//! main loop through [`Outcome`] because only the loop owns the editor.

use colored::Colorize;
use pumpmaster_application::{PumpListUseCase, SessionUseCase};
use pumpmaster_core::auth::Permission;
use pumpmaster_core::list::{FilterDimension, ListMode};

use crate::render;

/// What the main loop should do after a command.
pub enum Outcome {
    Continue,
    Quit,
    /// Prompt for search text, prefilled with the draft.
    OpenSearchModal { draft: String },
    /// Ask the user to confirm deleting `count` pumps.
    ConfirmDelete { count: usize },
}

pub struct ConsoleApp {
    sessions: SessionUseCase,
    list: PumpListUseCase,
    page_size_options: Vec<usize>,
}

impl ConsoleApp {
    pub fn new(
        sessions: SessionUseCase,
        list: PumpListUseCase,
        page_size_options: Vec<usize>,
    ) -> Self {
        Self {
            sessions,
            list,
            page_size_options,
        }
    }

    /// Restores a persisted session and shows the first page when one
    /// exists.
    pub async fn startup(&self) {
        match self.sessions.restore_session().await {
            Some(session) => {
                println!(
                    "{}",
                    format!("Welcome back, {} ({})", session.name, session.role).bright_green()
                );
                self.list.load_filter_options().await;
                if let Err(e) = self.list.refresh().await {
                    render::print_error(&e);
                    return;
                }
                self.show_list().await;
            }
            None => {
                println!(
                    "{}",
                    "Not logged in. Use: login <email> <password>".bright_black()
                );
            }
        }
    }

    pub async fn handle_command(&self, line: &str) -> Outcome {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Outcome::Continue;
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "login" => self.cmd_login(&args).await,
            "logout" => self.cmd_logout().await,
            "whoami" => self.cmd_whoami().await,
            "list" => self.cmd_list().await,
            "page" => self.cmd_page(&args).await,
            "size" => self.cmd_size(&args).await,
            "search" => self.cmd_search(&args).await,
            "filter" => self.cmd_filter(&args).await,
            "mode" => self.cmd_mode(&args).await,
            "select" => self.cmd_select(&args).await,
            "delete" => self.cmd_delete().await,
            "help" => {
                render::print_help();
                Outcome::Continue
            }
            "quit" | "exit" => Outcome::Quit,
            _ => {
                println!(
                    "{}",
                    format!("Unknown command: {command}. Type 'help' for commands.").bright_black()
                );
                Outcome::Continue
            }
        }
    }

    /// Commits search text: resets to the first page and refetches.
    pub async fn submit_search(&self, text: &str) {
        match self.list.submit_search(text).await {
            Ok(()) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    println!("{}", "Search cleared.".bright_black());
                } else {
                    println!("{}", format!("Searching for \"{trimmed}\"").bright_black());
                }
                self.show_list().await;
            }
            Err(e) => render::print_error(&e),
        }
    }

    /// Closes the search prompt keeping the committed query untouched.
    pub async fn cancel_search(&self) {
        self.list.cancel_search().await;
        println!("{}", "Search cancelled.".bright_black());
    }

    /// Runs the confirmed bulk delete and shows the settled page.
    pub async fn confirm_delete(&self) {
        match self.list.delete_selected().await {
            Ok(removed) => {
                println!("{}", format!("Deleted {removed} pump(s).").bright_green());
                self.show_list().await;
            }
            Err(e) => {
                render::print_error(&e);
                println!(
                    "{}",
                    "Selection kept; retry or leave delete mode with 'mode normal'.".yellow()
                );
            }
        }
    }

    async fn show_list(&self) {
        let snapshot = self.list.snapshot().await;
        render::print_page(&snapshot);
    }

    async fn require_session(&self) -> bool {
        if self.sessions.is_authenticated().await {
            return true;
        }
        println!(
            "{}",
            "Please log in first: login <email> <password>".yellow()
        );
        false
    }

    async fn cmd_login(&self, args: &[&str]) -> Outcome {
        if args.len() != 2 {
            println!("{}", "Usage: login <email> <password>".yellow());
            return Outcome::Continue;
        }
        match self.sessions.login(args[0], args[1]).await {
            Ok(session) => {
                println!(
                    "{}",
                    format!("Logged in as {} ({})", session.name, session.role).bright_green()
                );
                self.list.load_filter_options().await;
                match self.list.refresh().await {
                    Ok(()) => self.show_list().await,
                    Err(e) => render::print_error(&e),
                }
            }
            Err(e) => render::print_error(&e),
        }
        Outcome::Continue
    }

    async fn cmd_logout(&self) -> Outcome {
        if !self.sessions.is_authenticated().await {
            println!("{}", "Not logged in.".yellow());
            return Outcome::Continue;
        }
        match self.sessions.logout().await {
            Ok(()) => println!("{}", "Logged out.".bright_green()),
            Err(e) => render::print_error(&e),
        }
        Outcome::Continue
    }

    async fn cmd_whoami(&self) -> Outcome {
        match self.sessions.current_session().await {
            Some(session) => render::print_session(&session),
            None => println!("{}", "Not logged in.".yellow()),
        }
        Outcome::Continue
    }

    async fn cmd_list(&self) -> Outcome {
        if !self.require_session().await {
            return Outcome::Continue;
        }
        match self.list.refresh().await {
            Ok(()) => self.show_list().await,
            Err(e) => render::print_error(&e),
        }
        Outcome::Continue
    }

    async fn cmd_page(&self, args: &[&str]) -> Outcome {
        if !self.require_session().await {
            return Outcome::Continue;
        }
        let parsed = args
            .first()
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|page| *page >= 1);
        let Some(page) = parsed else {
            println!("{}", "Usage: page <number>".yellow());
            return Outcome::Continue;
        };
        match self.list.go_to_page(page).await {
            Ok(()) => self.show_list().await,
            Err(e) => render::print_error(&e),
        }
        Outcome::Continue
    }

    async fn cmd_size(&self, args: &[&str]) -> Outcome {
        if !self.require_session().await {
            return Outcome::Continue;
        }
        let options = self
            .page_size_options
            .iter()
            .map(|size| size.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let Some(size) = args.first().and_then(|raw| raw.parse::<usize>().ok()) else {
            println!("{}", format!("Usage: size <n> (one of: {options})").yellow());
            return Outcome::Continue;
        };
        if !self.page_size_options.contains(&size) {
            println!(
                "{}",
                format!("Page size must be one of: {options}").yellow()
            );
            return Outcome::Continue;
        }
        match self.list.set_page_size(size).await {
            Ok(()) => self.show_list().await,
            Err(e) => render::print_error(&e),
        }
        Outcome::Continue
    }

    async fn cmd_search(&self, args: &[&str]) -> Outcome {
        if !self.require_session().await {
            return Outcome::Continue;
        }
        match args {
            [] => {
                self.list.open_search_modal().await;
                let draft = self.list.snapshot().await.search.draft().to_string();
                Outcome::OpenSearchModal { draft }
            }
            ["clear"] => {
                match self.list.clear_search().await {
                    Ok(()) => self.show_list().await,
                    Err(e) => render::print_error(&e),
                }
                Outcome::Continue
            }
            _ => {
                self.submit_search(&args.join(" ")).await;
                Outcome::Continue
            }
        }
    }

    async fn cmd_filter(&self, args: &[&str]) -> Outcome {
        if !self.require_session().await {
            return Outcome::Continue;
        }
        match args {
            [] => {
                let snapshot = self.list.snapshot().await;
                render::print_filter_options(&snapshot.filters);
            }
            ["clear"] => match self.list.clear_filters().await {
                Ok(()) => self.show_list().await,
                Err(e) => render::print_error(&e),
            },
            [dimension, value @ ..] if !value.is_empty() => {
                match dimension.parse::<FilterDimension>() {
                    Ok(dimension) => {
                        let value = value.join(" ");
                        match self.list.toggle_filter(dimension, &value).await {
                            Ok(()) => self.show_list().await,
                            Err(e) => render::print_error(&e),
                        }
                    }
                    Err(_) => println!(
                        "{}",
                        "Usage: filter [type|area] <value> | filter clear".yellow()
                    ),
                }
            }
            _ => println!(
                "{}",
                "Usage: filter [type|area] <value> | filter clear".yellow()
            ),
        }
        Outcome::Continue
    }

    async fn cmd_mode(&self, args: &[&str]) -> Outcome {
        if !self.require_session().await {
            return Outcome::Continue;
        }
        match args.first().copied() {
            None => {
                let mode = self.list.mode().await;
                println!("{}", format!("Current mode: {mode}").bright_black());
            }
            Some("edit") => match self.list.enter_edit_mode().await {
                Ok(()) => println!("{}", "Entered edit mode.".bright_green()),
                Err(e) => render::print_error(&e),
            },
            Some("delete") => {
                if !self.sessions.has_permission(Permission::Delete).await {
                    println!("{}", "Delete mode requires the delete permission.".red());
                    return Outcome::Continue;
                }
                match self.list.enter_delete_mode().await {
                    Ok(()) => println!(
                        "{}",
                        "Entered delete mode. Select pumps, then run 'delete'.".bright_green()
                    ),
                    Err(e) => render::print_error(&e),
                }
            }
            Some("normal") => {
                self.list.exit_mode().await;
                println!("{}", "Back to normal mode.".bright_green());
            }
            Some(other) => println!(
                "{}",
                format!("Unknown mode: {other}. Use edit, delete, or normal.").yellow()
            ),
        }
        Outcome::Continue
    }

    async fn cmd_select(&self, args: &[&str]) -> Outcome {
        if !self.require_session().await {
            return Outcome::Continue;
        }
        let Some(target) = args.first().copied() else {
            println!("{}", "Usage: select <row|id|all|none>".yellow());
            return Outcome::Continue;
        };
        match target {
            "all" => self.list.select_all_visible(true).await,
            "none" => self.list.select_all_visible(false).await,
            _ => {
                // A number picks a row on the current page, anything else
                // is taken as a pump id
                let id = if let Ok(row) = target.parse::<usize>() {
                    let snapshot = self.list.snapshot().await;
                    let picked = row
                        .checked_sub(1)
                        .and_then(|index| snapshot.pumps.get(index))
                        .map(|pump| pump.id.clone());
                    match picked {
                        Some(id) => id,
                        None => {
                            println!("{}", format!("No row {row} on this page.").yellow());
                            return Outcome::Continue;
                        }
                    }
                } else {
                    target.to_string()
                };
                match self.list.toggle_select(&id).await {
                    Ok(selected) => {
                        let verb = if selected { "Selected" } else { "Deselected" };
                        println!("{}", format!("{verb} {id}.").bright_black());
                    }
                    Err(e) => render::print_error(&e),
                }
            }
        }
        let count = self.list.selected_keys().await.len();
        println!("{}", format!("{count} selected.").bright_black());
        Outcome::Continue
    }

    async fn cmd_delete(&self) -> Outcome {
        if !self.require_session().await {
            return Outcome::Continue;
        }
        if !self.sessions.has_permission(Permission::Delete).await {
            println!("{}", "Deleting pumps requires the delete permission.".red());
            return Outcome::Continue;
        }
        if self.list.mode().await != ListMode::Delete {
            println!("{}", "Enter delete mode first: mode delete".yellow());
            return Outcome::Continue;
        }
        let count = self.list.selected_keys().await.len();
        if count == 0 {
            println!("{}", "Nothing selected.".yellow());
            return Outcome::Continue;
        }
        Outcome::ConfirmDelete { count }
    }
}
