//! Theme-aware console rendering.

use crate::output::formatter::{clock_time, relative_time, sender_label, source_lines};
use arnica_domain::{ConversationHistory, MessageRecord, Sender, Theme};
use chrono::Utc;
use colored::{ColoredString, Colorize};

/// Renders messages, history listings and status lines, obeying the
/// persisted theme. Light keeps regular colors, dark switches to their
/// bright variants so text stays readable on dark terminals.
pub struct ConsoleRenderer {
    theme: Theme,
}

impl ConsoleRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Print one chat message with its header and source badges.
    pub fn message(&self, message: &MessageRecord) {
        let label = match message.sender {
            Sender::User => self.user_label(sender_label(Sender::User)),
            Sender::Assistant => self.assistant_label(sender_label(Sender::Assistant)),
        };
        println!("{} {}", label, clock_time(message.timestamp).dimmed());

        if message.is_error {
            println!("{}", message.text.red());
        } else {
            println!("{}", message.text);
        }

        for line in source_lines(&message.sources) {
            println!("  {}", self.accent(&line));
        }
        println!();
    }

    /// Print a whole conversation, oldest message first.
    pub fn conversation(&self, messages: &[MessageRecord]) {
        for message in messages {
            self.message(message);
        }
    }

    /// Print the stored history, most recent first, marking the active
    /// conversation.
    pub fn history_list(&self, history: &ConversationHistory, active_id: &str) {
        if history.is_empty() {
            println!("{}", "No conversations yet".dimmed());
            return;
        }
        let now_ms = Utc::now().timestamp_millis();
        for (index, record) in history.records().iter().enumerate() {
            let marker = if record.id == active_id { "*" } else { " " };
            println!(
                "{marker} {} {}  {}",
                self.accent(&format!("{}.", index + 1)),
                record.title,
                relative_time(record.timestamp, now_ms).dimmed()
            );
        }
    }

    pub fn info(&self, text: &str) {
        println!("{}", self.accent(text));
    }

    pub fn warn(&self, text: &str) {
        eprintln!("{}", text.yellow());
    }

    pub fn error(&self, text: &str) {
        eprintln!("{}", text.red());
    }

    fn user_label(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.blue().bold(),
            Theme::Dark => text.bright_blue().bold(),
        }
    }

    fn assistant_label(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.green().bold(),
            Theme::Dark => text.bright_green().bold(),
        }
    }

    fn accent(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.cyan(),
            Theme::Dark => text.bright_cyan(),
        }
    }
}
