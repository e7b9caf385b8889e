//! Port for small persisted preferences.
//!
//! Covers the session token, color theme and reply language. These are
//! plain string keys next to the conversation history; reads fall back to
//! defaults, writes surface a [`StoreError`] the caller may turn into a
//! warning.

use super::conversation_store::StoreError;
use arnica_domain::Theme;
use std::collections::HashMap;
use std::sync::Mutex;

/// Persistence for the session token and user preferences.
pub trait PreferenceStore: Send + Sync {
    /// The stored session token, if any.
    fn session_token(&self) -> Option<String>;

    fn set_session_token(&self, token: &str) -> Result<(), StoreError>;

    fn clear_session_token(&self);

    /// The persisted theme; defaults to [`Theme::Light`] when absent or
    /// unreadable.
    fn theme(&self) -> Theme;

    fn set_theme(&self, theme: Theme) -> Result<(), StoreError>;

    /// The persisted reply language tag, if any (e.g. `"en"`).
    fn language(&self) -> Option<String>;

    fn set_language(&self, language: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    values: Mutex<HashMap<&'static str, String>>,
}

const KEY_SESSION: &str = "session-token";
const KEY_THEME: &str = "theme";
const KEY_LANGUAGE: &str = "language";

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &'static str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    fn set(&self, key: &'static str, value: String) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key, value);
        }
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn session_token(&self) -> Option<String> {
        self.get(KEY_SESSION)
    }

    fn set_session_token(&self, token: &str) -> Result<(), StoreError> {
        self.set(KEY_SESSION, token.to_string());
        Ok(())
    }

    fn clear_session_token(&self) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(KEY_SESSION);
        }
    }

    fn theme(&self) -> Theme {
        self.get(KEY_THEME)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default()
    }

    fn set_theme(&self, theme: Theme) -> Result<(), StoreError> {
        self.set(KEY_THEME, theme.as_str().to_string());
        Ok(())
    }

    fn language(&self) -> Option<String> {
        self.get(KEY_LANGUAGE)
    }

    fn set_language(&self, language: &str) -> Result<(), StoreError> {
        self.set(KEY_LANGUAGE, language.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_defaults_to_light() {
        let store = InMemoryPreferenceStore::new();
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn theme_round_trips() {
        let store = InMemoryPreferenceStore::new();
        store.set_theme(Theme::Dark).unwrap();
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn session_token_clear_removes_value() {
        let store = InMemoryPreferenceStore::new();
        store.set_session_token("tok-123").unwrap();
        assert_eq!(store.session_token().as_deref(), Some("tok-123"));
        store.clear_session_token();
        assert_eq!(store.session_token(), None);
    }
}
