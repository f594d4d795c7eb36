//! Operator-facing terminal output: status lines, spinner, banner.
//!
//! Everything goes to stderr so stdout stays clean for `instructions` and
//! `version` output. Diagnostic detail goes through `tracing` instead.

use std::time::Duration;

use colored::{Color, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

const BANNER: &str = r"
 ▄▄ • ▪  ▄▄▄▄▄ ▄▄▄· ▪  .▄▄ · .▄▄ · ▪  ▄▄▄▄▄
▐█ ▀ ▪██ •██  ▐█ ▀█ ██ ▐█ ▀. ▐█ ▀. ██ •██
▄█ ▀█▄▐█· ▐█.▪▄█▀▀█ ▐█·▄▀▀▀█▄▄▀▀▀█▄▐█· ▐█.▪
▐█▄▪▐█▐█▌ ▐█▌·▐█▪ ▐▌▐█▌▐█▄▪▐█▐█▄▪▐█▐█▌ ▐█▌·
·▀▀▀▀ ▀▀▀ ▀▀▀  ▀  ▀ ▀▀▀ ▀▀▀▀  ▀▀▀▀ ▀▀▀ ▀▀▀

ʕつ•ᴥ•ʔつ Automate Git operations with AI
";

pub fn print_banner() {
    eprintln!("{}", BANNER.magenta());
}

/// Print `emoji message` in the given color.
pub fn status(color: Color, emoji: &str, message: &str) {
    eprintln!("{} {}", emoji, message.color(color));
}

pub fn info(emoji: &str, message: &str) {
    status(Color::Blue, emoji, message);
}

pub fn notice(emoji: &str, message: &str) {
    status(Color::Cyan, emoji, message);
}

pub fn success(message: &str) {
    status(Color::Green, "🎉", message);
}

pub fn warning(emoji: &str, message: &str) {
    status(Color::Yellow, emoji, message);
}

pub fn error(message: &str) {
    status(Color::Red, "❌", message);
}

/// Echo approved text in bold, framed by blank lines.
pub fn show_text(text: &str) {
    eprintln!();
    eprintln!("{}", text.bold());
    eprintln!();
}

/// Start a spinner with the given message. Call `finish_and_clear` when done.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("{}...", message));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
