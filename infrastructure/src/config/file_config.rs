//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! are deserialized directly.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Remote chat service settings
    pub server: FileServerConfig,
    /// Chat behavior settings
    pub chat: FileChatConfig,
    /// Local storage settings
    pub storage: FileStorageConfig,
}

/// `[server]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Base URL of the chat service
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// `[chat]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Maximum outgoing message length, in characters
    pub max_message_chars: usize,
    /// Reply language tag forwarded to the service (e.g. "en").
    /// Overridden by the persisted language preference once one is set.
    pub language: Option<String>,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            max_message_chars: 2000,
            language: None,
        }
    }
}

/// `[storage]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Override for the storage directory; defaults to the platform data dir
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = FileConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:5000");
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.chat.max_message_chars, 2000);
        assert_eq!(config.chat.language, None);
        assert_eq!(config.storage.data_dir, None);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [server]
            base_url = "https://chat.example.com"

            [chat]
            language = "de"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "https://chat.example.com");
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.chat.language.as_deref(), Some("de"));
        assert_eq!(config.chat.max_message_chars, 2000);
    }
}
