//! Presentation layer for arnica
//!
//! This crate contains the interactive REPL, the clap CLI definition and
//! the theme-aware console output. It holds no chat logic: every decision
//! is delegated to the use cases in the application layer.

pub mod chat;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use chat::repl::ChatRepl;
pub use cli::commands::Cli;
pub use output::console::ConsoleRenderer;
