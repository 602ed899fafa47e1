//! Persisted user preferences: theme and recent searches.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Key holding the JSON-encoded recent-search array
pub const RECENT_KEY: &str = "weatherAppRecent";
/// Key holding `"light"` or `"dark"`
pub const THEME_KEY: &str = "theme";

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse the stored representation; anything else is `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Typed access to the preference keys of a `KeyValueStore`.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored theme, `Light` when unset or unrecognized
    pub fn theme(&self) -> Theme {
        match self.store.get_item(THEME_KEY) {
            Some(value) => Theme::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Unknown stored theme {:?}, using light", value);
                Theme::Light
            }),
            None => Theme::default(),
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.store.set_item(THEME_KEY, theme.as_str())
    }

    /// Stored recent searches, empty when unset or malformed
    pub fn recent_searches(&self) -> Vec<String> {
        let Some(raw) = self.store.get_item(RECENT_KEY) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Discarding malformed recent searches: {}", e);
            Vec::new()
        })
    }

    pub fn set_recent_searches(&self, cities: &[String]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(cities).map_err(|source| StorageError::Encode {
            key: RECENT_KEY.to_string(),
            source,
        })?;
        self.store.set_item(RECENT_KEY, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn prefs() -> (Arc<MemoryStore>, Preferences) {
        let store = Arc::new(MemoryStore::new());
        let prefs = Preferences::new(store.clone());
        (store, prefs)
    }

    #[test]
    fn test_defaults_when_empty() {
        let (_, prefs) = prefs();
        assert_eq!(prefs.theme(), Theme::Light);
        assert!(prefs.recent_searches().is_empty());
    }

    #[test]
    fn test_theme_stored_as_literal() {
        let (store, prefs) = prefs();
        prefs.set_theme(Theme::Dark).unwrap();
        assert_eq!(store.get_item(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_light() {
        let (store, prefs) = prefs();
        store.set_item(THEME_KEY, "sepia").unwrap();
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn test_recent_stored_as_json_array() {
        let (store, prefs) = prefs();
        let cities = vec!["Paris".to_string(), "São Paulo".to_string()];
        prefs.set_recent_searches(&cities).unwrap();

        let raw = store.get_item(RECENT_KEY).unwrap();
        let decoded: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded, cities);
        assert_eq!(prefs.recent_searches(), cities);
    }

    #[test]
    fn test_malformed_recent_is_empty() {
        let (store, prefs) = prefs();
        store.set_item(RECENT_KEY, "{\"oops\":1}").unwrap();
        assert!(prefs.recent_searches().is_empty());
    }

    #[test]
    fn test_theme_toggle_is_involution() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
