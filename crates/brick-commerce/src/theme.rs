//! Color theme preference.

use brick_cache::{Cache, Persisted, StorageKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// User theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the operating system.
    #[default]
    System,
}

/// A concrete rendering choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }

    /// Dark goes to light; light and system both go to dark.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light | Theme::System => Theme::Dark,
        }
    }

    /// What to render, given the OS preference.
    pub fn resolve(&self, system: Appearance) -> Appearance {
        match self {
            Theme::Light => Appearance::Light,
            Theme::Dark => Appearance::Dark,
            Theme::System => system,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
struct ThemeState {
    #[serde(default)]
    theme: Theme,
}

/// Persisted document, `{ "state": { "theme": ... } }`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
struct ThemeDocument {
    #[serde(default)]
    state: ThemeState,
}

/// Persisted theme store.
#[derive(Debug)]
pub struct ThemeStore {
    state: Persisted<ThemeDocument>,
}

impl ThemeStore {
    pub fn new(cache: Cache) -> Self {
        Self {
            state: Persisted::load(cache, StorageKey::Theme),
        }
    }

    pub fn theme(&self) -> Theme {
        self.state.state().state.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.update(|doc| doc.state.theme = theme);
        debug!(theme = %theme, "theme set");
    }

    /// Flip the theme and return the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme().toggled();
        self.set_theme(theme);
        theme
    }

    pub fn resolved(&self, system: Appearance) -> Appearance {
        self.theme().resolve(system)
    }
}
