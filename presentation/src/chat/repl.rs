//! REPL (Read-Eval-Print Loop) for interactive chat
//!
//! Free text is sent to the chat service; slash commands drive history,
//! account and preference actions. All state lives in the injected use
//! cases; the REPL only reads lines and renders results.

use crate::ConsoleRenderer;
use arnica_application::{
    ChatSessionUseCase, PreferenceStore, SendOutcome, SessionManagerUseCase,
};
use dialoguer::{Input, Password};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

enum CommandFlow {
    Continue,
    Exit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    chat: ChatSessionUseCase,
    session: SessionManagerUseCase,
    preferences: Arc<dyn PreferenceStore>,
    renderer: ConsoleRenderer,
}

impl ChatRepl {
    pub fn new(
        chat: ChatSessionUseCase,
        session: SessionManagerUseCase,
        preferences: Arc<dyn PreferenceStore>,
        renderer: ConsoleRenderer,
    ) -> Self {
        Self {
            chat,
            session,
            preferences,
            renderer,
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = Self::input_history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let prompt = format!("{}> ", self.session.identity().label());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if let CommandFlow::Exit = self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.send_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn input_history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("arnica").join("input-history.txt"))
    }

    async fn send_message(&mut self, text: &str) {
        match self.chat.send(text).await {
            SendOutcome::Replied | SendOutcome::Failed => {
                println!();
                if let Some(reply) = self.chat.messages().last() {
                    self.renderer.message(reply);
                }
            }
            SendOutcome::Rejected(rejection) => self.renderer.error(&rejection.to_string()),
            SendOutcome::Busy => {
                self.renderer.error("Another message is still being processed")
            }
            SendOutcome::Stale => {}
        }
    }

    /// Handle a slash command. Returns whether the REPL should exit.
    async fn handle_command(&mut self, line: &str) -> CommandFlow {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let argument = parts.next();

        match command {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return CommandFlow::Exit;
            }
            "/help" | "/h" | "/?" => self.print_help(),
            "/new" => match self.chat.new_conversation() {
                Ok(()) => self.renderer.info("Started a new conversation"),
                Err(error) => self
                    .renderer
                    .warn(&format!("Could not save conversation history: {error}")),
            },
            "/list" => {
                let history = self.chat.history();
                self.renderer
                    .history_list(&history, self.chat.conversation_id());
            }
            "/load" => self.load_command(argument),
            "/delete" => self.delete_command(argument),
            "/clear" => {
                self.chat.clear_history();
                self.renderer.info("Conversation history cleared");
            }
            "/login" => self.login_command().await,
            "/register" => self.register_command().await,
            "/logout" => self.logout_command().await,
            "/theme" => self.theme_command(),
            "/language" => self.language_command(argument),
            _ => {
                println!("Unknown command: {}", command);
                println!("Type /help for available commands");
            }
        }
        CommandFlow::Continue
    }

    fn load_command(&mut self, selector: Option<&str>) {
        let Some(id) = selector.and_then(|s| self.resolve_selector(s)) else {
            self.renderer.error("Usage: /load <number|id> (see /list)");
            return;
        };
        match self.chat.load_conversation(&id) {
            Ok(()) => {
                println!();
                self.renderer.conversation(self.chat.messages());
            }
            Err(error) => self.renderer.error(&error.to_string()),
        }
    }

    fn delete_command(&mut self, selector: Option<&str>) {
        let Some(id) = selector.and_then(|s| self.resolve_selector(s)) else {
            self.renderer.error("Usage: /delete <number|id> (see /list)");
            return;
        };
        match self.chat.delete_conversation(&id) {
            Ok(true) => self.renderer.info("Conversation deleted"),
            Ok(false) => self.renderer.error("No such conversation"),
            Err(error) => self
                .renderer
                .warn(&format!("Could not update conversation history: {error}")),
        }
    }

    /// Resolve a 1-based listing number or a conversation id.
    fn resolve_selector(&self, selector: &str) -> Option<String> {
        let history = self.chat.history();
        if let Ok(number) = selector.parse::<usize>() {
            return history
                .records()
                .get(number.checked_sub(1)?)
                .map(|record| record.id.clone());
        }
        if selector == self.chat.conversation_id() {
            return Some(selector.to_string());
        }
        history.find(selector).map(|record| record.id.clone())
    }

    async fn login_command(&mut self) {
        if !self.session.identity().is_guest() {
            let name = self.session.identity().label().to_string();
            self.renderer
                .info(&format!("Already logged in as {name}. Use /logout first."));
            return;
        }
        let Some((email, password)) = prompt_credentials() else {
            return;
        };
        match self.session.login(&email, &password).await {
            Ok(identity) => {
                let name = identity.label().to_string();
                self.chat.start_over();
                self.renderer.info(&format!("Logged in as {name}"));
            }
            Err(error) => self.renderer.error(&error.to_string()),
        }
    }

    async fn register_command(&mut self) {
        if !self.session.identity().is_guest() {
            let name = self.session.identity().label().to_string();
            self.renderer
                .info(&format!("Already logged in as {name}. Use /logout first."));
            return;
        }
        let Ok(username) = Input::<String>::new().with_prompt("Username").interact_text() else {
            return;
        };
        let Some((email, password)) = prompt_credentials() else {
            return;
        };
        match self.session.register(&username, &email, &password).await {
            Ok(identity) => {
                let name = identity.label().to_string();
                self.chat.start_over();
                self.renderer
                    .info(&format!("Account created. Logged in as {name}"));
            }
            Err(error) => self.renderer.error(&error.to_string()),
        }
    }

    async fn logout_command(&mut self) {
        if self.session.identity().is_guest() {
            self.renderer.info("Not logged in");
            return;
        }
        // Flush the live conversation into the active scope before it is
        // snapshotted under the user's key.
        if let Err(error) = self.chat.new_conversation() {
            self.renderer
                .warn(&format!("Could not save conversation history: {error}"));
        }
        self.session.logout().await;
        self.chat.start_over();
        self.renderer.info("Logged out");
    }

    fn theme_command(&mut self) {
        let next = self.renderer.theme().toggled();
        if let Err(error) = self.preferences.set_theme(next) {
            self.renderer
                .warn(&format!("Could not persist theme: {error}"));
        }
        self.renderer.set_theme(next);
        self.renderer
            .info(&format!("Theme set to {}", next.as_str()));
    }

    fn language_command(&mut self, tag: Option<&str>) {
        match tag {
            Some(tag) => {
                if let Err(error) = self.preferences.set_language(tag) {
                    self.renderer
                        .warn(&format!("Could not persist language: {error}"));
                }
                self.chat.set_language(Some(tag.to_string()));
                self.renderer
                    .info(&format!("Replies will use language '{tag}'"));
            }
            None => match self.chat.language() {
                Some(language) => self.renderer.info(&format!("Reply language: {language}")),
                None => self.renderer.info("No reply language set"),
            },
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            Arnica - Research Chat           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Signed in as: {}", self.session.identity().label());
        println!("Type a message to chat, or /help for commands.");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /new               - Save the current conversation and start fresh");
        println!("  /list              - List stored conversations");
        println!("  /load <n|id>       - Resume a stored conversation");
        println!("  /delete <n|id>     - Delete a stored conversation");
        println!("  /clear             - Delete all stored conversations");
        println!("  /login             - Log in to your account");
        println!("  /register          - Create an account");
        println!("  /logout            - Log out");
        println!("  /theme             - Toggle light/dark theme");
        println!("  /language [tag]    - Show or set the reply language");
        println!("  /help, /h, /?      - Show this help");
        println!("  /quit, /exit, /q   - Exit");
        println!();
    }
}

fn prompt_credentials() -> Option<(String, String)> {
    let email = Input::<String>::new()
        .with_prompt("Email")
        .interact_text()
        .ok()?;
    let password = Password::new().with_prompt("Password").interact().ok()?;
    Some((email, password))
}
