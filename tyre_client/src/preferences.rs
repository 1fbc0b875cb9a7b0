use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
    str::FromStr,
};

use anyhow::Context;
use tracing::warn;

use crate::i18n::Language;

pub const THEME_KEY: &str = "tyre.theme";
pub const LANGUAGE_KEY: &str = "tyre.lang";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Indicator shown on the theme toggle.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Dark => "🌙",
            Self::Light => "☀️",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(anyhow::anyhow!("Unknown theme {s:?}")),
        }
    }
}

/// Durable key-value storage for ui preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.into(), value.into());
        Ok(())
    }
}

/// Preferences kept in a json object on disk. Every change rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFilePreferenceStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse preferences at {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read preferences at {}", path.display()))
            }
        };
        Ok(Self { path, values })
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.into(), value.into());
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write preferences to {}", self.path.display()))
    }
}

/// Theme and language of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub theme: Theme,
    pub language: Language,
}

impl UiState {
    /// Restores the stored preferences. Missing or unknown values fall back to
    /// the dark theme and english.
    pub fn load(store: &impl PreferenceStore) -> Self {
        Self {
            theme: restore(store, THEME_KEY),
            language: restore(store, LANGUAGE_KEY),
        }
    }

    pub fn toggle_theme(&mut self, store: &mut impl PreferenceStore) -> anyhow::Result<Theme> {
        self.theme = self.theme.toggled();
        store.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }

    pub fn toggle_language(
        &mut self,
        store: &mut impl PreferenceStore,
    ) -> anyhow::Result<Language> {
        self.language = self.language.toggled();
        store.set(LANGUAGE_KEY, self.language.code())?;
        Ok(self.language)
    }
}

fn restore<T>(store: &impl PreferenceStore, key: &str) -> T
where
    T: FromStr + Default,
{
    store
        .get(key)
        .and_then(|value| {
            value
                .parse()
                .inspect_err(|_| warn!(key, %value, "ignoring unknown preference"))
                .ok()
        })
        .unwrap_or_default()
}
