//! Terminal rendering helpers for snapshots.

use crossterm::style::Stylize;
use hostpulse_core::ServiceState;

const HEADER_WIDTH: usize = 46;

/// Print a boxed title.
pub fn print_header(title: &str) {
    let padding = HEADER_WIDTH.saturating_sub(title.chars().count());
    let left = padding / 2;

    println!();
    println!("{}", format!("╔{}╗", "═".repeat(HEADER_WIDTH)).dark_cyan());
    println!(
        "{}",
        format!("║{}{}{}║", " ".repeat(left), title, " ".repeat(padding - left)).dark_cyan()
    );
    println!("{}", format!("╚{}╝", "═".repeat(HEADER_WIDTH)).dark_cyan());
}

/// Print a small section title.
pub fn print_section(title: &str) {
    println!();
    println!("  {} {}", "▸".dark_cyan(), title.white().bold());
    println!("  {}", "─".repeat(40).dark_grey());
}

/// Print a key-value pair; sentinel values are dimmed.
pub fn print_kv(key: &str, value: &str) {
    let value = if value == hostpulse_core::CPU_UNAVAILABLE {
        value.dark_grey().to_string()
    } else {
        value.to_string()
    };
    println!("  {:<14} {}", format!("{}:", key).dark_grey(), value);
}

pub fn format_state(state: ServiceState) -> String {
    match state {
        ServiceState::Running => "● Running".green().to_string(),
        ServiceState::Stopped => "○ Stopped".red().to_string(),
        ServiceState::NotFound => "? Not Found".yellow().to_string(),
    }
}

pub fn print_empty(msg: &str) {
    println!("  {}", msg.dark_grey().italic());
}
