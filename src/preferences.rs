//! Locally persisted user preferences: theme and favorite channels.
//!
//! The in-memory values are authoritative; every change is written through
//! immediately and never read back.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

pub const THEME_KEY: &str = "beingtv_theme";
pub const FAVORITES_KEY: &str = "beingtv_favorites";

/// Durable string key-value area
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), anyhow::Error>;
}

/// In-memory store for tests and for sessions with no data dir
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten on every `set`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// `preferences.json` in the platform data directory
    pub fn open_default() -> Option<Self> {
        crate::config::data_dir().map(|dir| Self::open(dir.join("preferences.json")))
    }

    /// A missing or unreadable file starts empty
    pub fn open(path: PathBuf) -> Self {
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|content| match serde_json::from_str(&content) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Ignoring malformed preferences at {:?}: {}", path, e);
                    None
                }
            })
            .unwrap_or_default();
        Self { path, values }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// `"dark"` is dark, anything else (or nothing) is light
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_stored(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

fn parse_favorites(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ids) => ids,
        Err(e) => {
            warn!("Favorites value is not a JSON string array ({}), starting empty", e);
            Vec::new()
        }
    }
}

pub struct Preferences {
    theme: Theme,
    /// Insertion-ordered so the stored array stays stable
    favorites: Vec<String>,
    store: Box<dyn PreferenceStore>,
}

impl Preferences {
    /// Startup step: read both keys, defaulting when absent or malformed
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let theme = Theme::from_stored(store.get(THEME_KEY).as_deref());
        let favorites = parse_favorites(store.get(FAVORITES_KEY).as_deref());
        debug!("Preferences loaded: theme={:?}, {} favorites", theme, favorites.len());
        Self {
            theme,
            favorites,
            store,
        }
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn is_favorite(&self, channel_id: &str) -> bool {
        self.favorites.iter().any(|f| f == channel_id)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.store.set(THEME_KEY, self.theme.as_stored()) {
            warn!("Failed to persist theme: {}", e);
        }
        self.theme
    }

    /// Symmetric difference with `{channel_id}`; returns the new membership
    pub fn toggle_favorite(&mut self, channel_id: &str) -> bool {
        let now_favorite = if let Some(pos) = self.favorites.iter().position(|f| f == channel_id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(channel_id.to_string());
            true
        };
        match serde_json::to_string(&self.favorites) {
            Ok(json) => {
                if let Err(e) = self.store.set(FAVORITES_KEY, &json) {
                    warn!("Failed to persist favorites: {}", e);
                }
            }
            Err(e) => warn!("Failed to encode favorites: {}", e),
        }
        now_favorite
    }

    pub fn stored_value(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }
}
