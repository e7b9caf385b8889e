//! File-backed preference store.

use super::kv::FileKvStore;
use arnica_application::{PreferenceStore, StoreError};
use arnica_domain::Theme;
use std::sync::Arc;

const KEY_SESSION: &str = "session-token";
const KEY_THEME: &str = "theme";
const KEY_LANGUAGE: &str = "language";

/// [`PreferenceStore`] adapter keeping each preference in its own file.
///
/// The session token and language are stored as plain strings, the theme as
/// its lowercase name. Unreadable values fall back to defaults.
pub struct FilePreferenceStore {
    kv: Arc<FileKvStore>,
}

impl FilePreferenceStore {
    pub fn new(kv: Arc<FileKvStore>) -> Self {
        Self { kv }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn session_token(&self) -> Option<String> {
        self.kv.get(KEY_SESSION).filter(|token| !token.is_empty())
    }

    fn set_session_token(&self, token: &str) -> Result<(), StoreError> {
        self.kv.set(KEY_SESSION, token)
    }

    fn clear_session_token(&self) {
        self.kv.remove(KEY_SESSION);
    }

    fn theme(&self) -> Theme {
        self.kv
            .get(KEY_THEME)
            .and_then(|value| Theme::parse(value.trim()))
            .unwrap_or_default()
    }

    fn set_theme(&self, theme: Theme) -> Result<(), StoreError> {
        self.kv.set(KEY_THEME, theme.as_str())
    }

    fn language(&self) -> Option<String> {
        self.kv
            .get(KEY_LANGUAGE)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn set_language(&self, language: &str) -> Result<(), StoreError> {
        self.kv.set(KEY_LANGUAGE, language)
    }
}
