//! Colored terminal output.

use colored::Colorize;
use pumpmaster_application::ListSnapshot;
use pumpmaster_core::PumpMasterError;
use pumpmaster_core::auth::Session;
use pumpmaster_core::list::{FilterDimension, FilterState, ListMode};

pub fn print_error(e: &PumpMasterError) {
    eprintln!("{}", format!("Error [{}]: {}", e.code(), e).red());
}

/// Prints the current page: context line, table with selection markers,
/// totals, and the windowed pager.
pub fn print_page(snapshot: &ListSnapshot) {
    print_context_line(snapshot);

    if snapshot.pumps.is_empty() {
        println!("{}", "No pumps found".yellow());
    } else {
        print_table(snapshot);
    }

    print_pagination(snapshot);
}

fn print_context_line(snapshot: &ListSnapshot) {
    let mut parts = vec![format!("mode: {}", snapshot.mode)];
    if snapshot.search.has_query() {
        parts.push(format!("search: \"{}\"", snapshot.search.query()));
    }
    if snapshot.filters.has_active_filters() {
        let mut active = Vec::new();
        for dimension in [FilterDimension::Type, FilterDimension::Area] {
            let values = snapshot.filters.active_values(dimension);
            if !values.is_empty() {
                active.push(format!("{}={}", dimension, values.join(",")));
            }
        }
        parts.push(format!("filters: {}", active.join(" ")));
    }
    if snapshot.mode == ListMode::Delete {
        parts.push(format!("{} selected", snapshot.selected_keys.len()));
    }
    println!("{}", parts.join(" | ").bright_black());
}

fn print_table(snapshot: &ListSnapshot) {
    let header = format!(
        "{:>3}  {:<2} {:<10} {:<10} {:<13} {:<8} {:>10} {:>16}",
        "#", "", "ID", "Name", "Type", "Area", "Flow", "Pressure"
    );
    println!("{}", header.bright_cyan());

    for (row, pump) in snapshot.pumps.iter().enumerate() {
        let selected = snapshot.selected_keys.iter().any(|key| key == &pump.id);
        let marker = if selected { "*" } else { " " };
        let line = format!(
            "{:>3}  {:<2} {:<10} {:<10} {:<13} {:<8} {:>10} {:>16}",
            row + 1,
            marker,
            pump.id,
            pump.name,
            pump.pump_type,
            pump.area_block,
            format!("{} {}", pump.flow_rate.value, pump.flow_rate.unit),
            format!(
                "{}/{}/{} {}",
                pump.current_pressure.value,
                pump.min_pressure.value,
                pump.max_pressure.value,
                pump.current_pressure.unit
            ),
        );
        if selected {
            println!("{}", line.yellow());
        } else {
            println!("{line}");
        }
    }
}

fn print_pagination(snapshot: &ListSnapshot) {
    let pagination = &snapshot.pagination;
    if pagination.total() == 0 {
        return;
    }
    println!(
        "{}",
        format!(
            "Showing {}-{} of {} pumps",
            pagination.start_item(),
            pagination.end_item(),
            pagination.total()
        )
        .bright_black()
    );

    if pagination.total_pages() > 1 {
        let pager: Vec<String> = pagination
            .visible_pages()
            .into_iter()
            .map(|page| {
                if page == pagination.current_page() {
                    format!("[{page}]").bright_cyan().to_string()
                } else {
                    page.to_string()
                }
            })
            .collect();
        println!("Pages: {}", pager.join(" "));
    }
}

/// Lists every filter value with an `[x]` marker when active.
pub fn print_filter_options(filters: &FilterState) {
    let options = filters.options();
    if options.is_empty() {
        println!("{}", "No filter options loaded yet; run 'list' first.".yellow());
        return;
    }

    for (dimension, values) in [
        (FilterDimension::Type, &options.types),
        (FilterDimension::Area, &options.areas),
    ] {
        println!("{}", format!("{dimension}:").bright_cyan());
        for value in values {
            let marker = if filters.is_active(dimension, value) {
                "[x]"
            } else {
                "[ ]"
            };
            println!("  {marker} {value}");
        }
    }
    println!(
        "{}",
        "Toggle with: filter type <value> | filter area <value>".bright_black()
    );
}

pub fn print_session(session: &Session) {
    println!("{} {}", "User:".bright_cyan(), session.name);
    println!("{} {}", "Email:".bright_cyan(), session.email);
    println!("{} {}", "Role:".bright_cyan(), session.role);
    let permissions: Vec<&str> = session.permissions.iter().map(String::as_str).collect();
    println!(
        "{} {}",
        "Permissions:".bright_cyan(),
        permissions.join(", ")
    );
    println!("{} {}", "Expires:".bright_cyan(), session.expires_at);
}

pub fn print_help() {
    println!("{}", "Commands:".bright_cyan());
    let entries = [
        ("login <email> <password>", "Authenticate with the backend"),
        ("logout", "Clear the session and stored credentials"),
        ("whoami", "Show the current session"),
        ("list", "Fetch and show the current page"),
        ("page <number>", "Jump to a page"),
        ("size <n>", "Set the page size"),
        ("search [text|clear]", "Search pumps; no argument opens the prompt"),
        ("filter [type|area] <value>", "Toggle a filter value"),
        ("filter clear", "Clear every filter"),
        ("filter", "Show the filter options"),
        ("mode [edit|delete|normal]", "Switch interaction mode"),
        ("select <row|id|all|none>", "Toggle selection for the delete flow"),
        ("delete", "Delete the selected pumps (asks to confirm)"),
        ("help", "Show this help"),
        ("quit", "Exit the console"),
    ];
    for (usage, description) in entries {
        println!("  {} {}", format!("{usage:<28}").bright_green(), description);
    }
}
