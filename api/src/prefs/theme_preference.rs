//! Light/dark display preference, persisted under a single storage key.

use std::collections::HashMap;
use std::str::FromStr;

use dioxus_logger::tracing::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::ApiError;

/// The storage key the preference lives under.
pub const THEME_KEY: &str = "theme";

/// Class applied to the page root while the dark theme is active.
pub const DARK_THEME_CLASS: &str = "theme-dark";

/// The binary display mode. Stored as `"light"` / `"dark"`.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Debug,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIs,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// The value written to storage.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The class marker for the page root, if any.
    pub fn root_class(self) -> Option<&'static str> {
        self.is_dark().then_some(DARK_THEME_CLASS)
    }

    /// Label for the toggle control. It names the mode a click switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to light mode",
        }
    }

    /// `aria-pressed` value for the toggle control.
    pub fn aria_pressed(self) -> &'static str {
        if self.is_dark() {
            "true"
        } else {
            "false"
        }
    }
}

/// A durable string key-value slot (browser `localStorage`, a settings file, ...).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ApiError>;
}

/// A `KeyValueStore` that lives only as long as the process.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore(HashMap<String, String>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ApiError> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The page surface a theme is applied to.
pub trait ThemeView {
    /// The mode currently shown.
    fn applied_theme(&self) -> ThemeMode;

    /// Shows `mode`: root class marker, toggle label, toggle `aria-pressed`.
    /// Applying the same mode twice must leave the same observable state.
    fn apply_theme(&mut self, mode: ThemeMode);
}

/// Determines the theme to start with.
///
/// A stored preference wins. Anything stored other than `"dark"` counts as
/// light. `prefers_dark` is only evaluated when nothing (or an empty string)
/// is stored.
pub fn initial_theme(store: &impl KeyValueStore, prefers_dark: impl FnOnce() -> bool) -> ThemeMode {
    match store.get(THEME_KEY).filter(|saved| !saved.is_empty()) {
        Some(saved) => ThemeMode::from_str(&saved).unwrap_or(ThemeMode::Light),
        None if prefers_dark() => ThemeMode::Dark,
        None => ThemeMode::Light,
    }
}

pub fn apply_theme(view: &mut impl ThemeView, mode: ThemeMode) {
    view.apply_theme(mode);
}

/// Flips the applied theme, persisting the new mode before showing it.
///
/// If the write fails nothing is applied, so storage and page never disagree.
pub fn toggle_theme(
    store: &mut impl KeyValueStore,
    view: &mut impl ThemeView,
) -> Result<ThemeMode, ApiError> {
    let next = view.applied_theme().toggled();
    store.set(THEME_KEY, next.as_str())?;
    debug!("theme switched to {}", next.as_str());
    apply_theme(view, next);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[derive(Default)]
    struct FakePage {
        mode: ThemeMode,
        root_class: Option<&'static str>,
        label: &'static str,
        pressed: &'static str,
        renders: usize,
    }

    impl ThemeView for FakePage {
        fn applied_theme(&self) -> ThemeMode {
            self.mode
        }

        fn apply_theme(&mut self, mode: ThemeMode) {
            self.mode = mode;
            self.root_class = mode.root_class();
            self.label = mode.toggle_label();
            self.pressed = mode.aria_pressed();
            self.renders += 1;
        }
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), ApiError> {
            Err(anyhow!("quota exceeded"))
        }
    }

    #[test]
    fn stored_preference_wins_over_os_signal() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(initial_theme(&store, || true), ThemeMode::Light);

        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(initial_theme(&store, || false), ThemeMode::Dark);
    }

    #[test]
    fn os_signal_used_only_without_stored_value() {
        let store = MemoryStore::new();
        assert_eq!(initial_theme(&store, || true), ThemeMode::Dark);
        assert_eq!(initial_theme(&store, || false), ThemeMode::Light);

        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "dark").unwrap();
        initial_theme(&store, || panic!("os signal should not be consulted"));
    }

    #[test]
    fn empty_stored_value_falls_back_to_os_signal() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "").unwrap();
        assert_eq!(initial_theme(&store, || true), ThemeMode::Dark);
    }

    #[test]
    fn unrecognised_stored_value_is_light() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(initial_theme(&store, || true), ThemeMode::Light);
    }

    #[test]
    fn apply_sets_marker_label_and_pressed_state() {
        let mut page = FakePage::default();

        apply_theme(&mut page, ThemeMode::Dark);
        assert_eq!(page.root_class, Some("theme-dark"));
        assert_eq!(page.label, "Switch to light mode");
        assert_eq!(page.pressed, "true");

        apply_theme(&mut page, ThemeMode::Light);
        assert_eq!(page.root_class, None);
        assert_eq!(page.label, "Switch to dark mode");
        assert_eq!(page.pressed, "false");
    }

    #[test]
    fn apply_is_idempotent() {
        let mut page = FakePage::default();
        apply_theme(&mut page, ThemeMode::Dark);
        let first = (page.mode, page.root_class, page.label, page.pressed);
        apply_theme(&mut page, ThemeMode::Dark);
        assert_eq!(first, (page.mode, page.root_class, page.label, page.pressed));
    }

    #[test]
    fn toggle_persists_then_applies() {
        let mut store = MemoryStore::new();
        let mut page = FakePage::default();
        apply_theme(&mut page, ThemeMode::Light);

        let next = toggle_theme(&mut store, &mut page).unwrap();
        assert_eq!(next, ThemeMode::Dark);
        assert_eq!(page.mode, ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn toggling_twice_restores_mode_and_stored_value() {
        let mut store = MemoryStore::new();
        let mut page = FakePage::default();

        let start = initial_theme(&store, || true);
        apply_theme(&mut page, start);
        assert_eq!(start, ThemeMode::Dark);

        toggle_theme(&mut store, &mut page).unwrap();
        toggle_theme(&mut store, &mut page).unwrap();

        assert_eq!(page.mode, ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(initial_theme(&store, || false), ThemeMode::Dark);
    }

    #[test]
    fn failed_write_leaves_page_untouched() {
        let mut page = FakePage::default();
        apply_theme(&mut page, ThemeMode::Light);
        let renders = page.renders;

        assert!(toggle_theme(&mut ReadOnlyStore, &mut page).is_err());
        assert_eq!(page.mode, ThemeMode::Light);
        assert_eq!(page.renders, renders);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), r#""dark""#);
        assert_eq!(ThemeMode::Light.as_str(), "light");
    }
}
