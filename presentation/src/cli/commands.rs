//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for arnica
#[derive(Parser, Debug)]
#[command(name = "arnica")]
#[command(author, version, about = "Terminal client for a retrieval-backed research chat service")]
#[command(long_about = r#"
Arnica is a terminal chat client. Started without arguments it opens an
interactive session; given a message it sends it once and prints the reply.

Conversation history is kept locally, bounded to the ten most recent
conversations, and partitioned per signed-in account.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./arnica.toml       Project-level config
3. ~/.config/arnica/config.toml   Global config

Example:
  arnica "What is diabetes?"
  arnica --server https://chat.example.com --language de
"#)]
pub struct Cli {
    /// Send a single message and exit (interactive chat when omitted)
    pub message: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Override the chat service base URL
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Override the reply language for this run
    #[arg(long, value_name = "TAG")]
    pub language: Option<String>,
}
