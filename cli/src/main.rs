//! CLI entrypoint for arnica
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use arnica_application::{
    ChatSessionUseCase, ConversationStore, PreferenceStore, SendOutcome, SessionManagerUseCase,
};
use arnica_infrastructure::{
    ConfigLoader, FileConversationStore, FileKvStore, FilePreferenceStore, HttpAuthGateway,
    HttpChatGateway,
};
use arnica_presentation::{ChatRepl, Cli, ConsoleRenderer};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting arnica");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("could not load configuration: {e}"))?
    };

    let base_url = cli
        .server
        .unwrap_or_else(|| config.server.base_url.clone());

    let data_dir = match config.storage.data_dir.clone() {
        Some(dir) => dir,
        None => dirs::data_dir()
            .context("could not determine a data directory")?
            .join("arnica")
            .join("storage"),
    };

    // === Dependency Injection ===
    let kv = FileKvStore::open(&data_dir)
        .with_context(|| format!("could not open storage at {}", data_dir.display()))?;
    let conversations: Arc<dyn ConversationStore> =
        Arc::new(FileConversationStore::new(kv.clone()));
    let preferences: Arc<dyn PreferenceStore> = Arc::new(FilePreferenceStore::new(kv));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.server.timeout_secs))
        .build()
        .context("could not build HTTP client")?;
    let auth = Arc::new(HttpAuthGateway::new(client.clone(), base_url.clone()));
    let chat_gateway = Arc::new(HttpChatGateway::new(client, base_url));

    let mut session =
        SessionManagerUseCase::new(auth, conversations.clone(), preferences.clone());
    session.restore().await;

    let language = cli
        .language
        .or_else(|| preferences.language())
        .or_else(|| config.chat.language.clone());

    let chat = ChatSessionUseCase::new(chat_gateway, conversations)
        .with_language(language)
        .with_max_message_chars(config.chat.max_message_chars);

    let renderer = ConsoleRenderer::new(preferences.theme());

    match cli.message {
        Some(message) => one_shot(chat, renderer, &message).await,
        None => {
            let mut repl = ChatRepl::new(chat, session, preferences, renderer);
            repl.run().await?;
            Ok(())
        }
    }
}

/// Send a single message, print the reply, persist the exchange.
async fn one_shot(
    mut chat: ChatSessionUseCase,
    renderer: ConsoleRenderer,
    message: &str,
) -> Result<()> {
    match chat.send(message).await {
        SendOutcome::Replied => {
            if let Some(reply) = chat.messages().last() {
                renderer.message(reply);
            }
            if let Err(error) = chat.new_conversation() {
                renderer.warn(&format!("Could not save conversation history: {error}"));
            }
            Ok(())
        }
        SendOutcome::Failed => {
            if let Some(reply) = chat.messages().last() {
                renderer.message(reply);
            }
            std::process::exit(1);
        }
        SendOutcome::Rejected(rejection) => bail!("{rejection}"),
        SendOutcome::Busy | SendOutcome::Stale => Ok(()),
    }
}
