//! Terminal output helpers

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Spinner shown while waiting on the server
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// Print `value` as JSON, or hand it to `human` for the styled rendering
pub fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

pub fn heading(title: &str) {
    println!("{}", style(title).bold().underlined());
}

pub fn success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn notice(message: &str) {
    println!("{}", style(message).yellow());
}

pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<18} {}", style(label).dim(), value);
}

/// Server's own confirmation text, or `fallback` when it sent none
pub fn reply(message: &str, fallback: &str) {
    success(if message.trim().is_empty() { fallback } else { message.trim() });
}

/// `true` when `yes` was passed or the user agrees to `prompt`
pub fn confirmed(yes: bool, prompt: &str) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(dialoguer::Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// "-" for missing values
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}
