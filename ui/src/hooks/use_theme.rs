use api::prefs::theme_preference::initial_theme;
use api::prefs::theme_preference::toggle_theme;
use api::prefs::theme_preference::ThemeMode;
use api::prefs::theme_preference::ThemeView;
use api::prefs::theme_preference::DARK_THEME_CLASS;
use dioxus::prelude::*;

use crate::compat;
use crate::compat::PreferenceStore;

/// The applied theme, backed by a signal so everything reading it re-renders
/// when it changes.
#[derive(Clone, Copy, PartialEq)]
pub struct ThemeHandle {
    mode: Signal<ThemeMode>,
}

impl ThemeHandle {
    /// The current mode. Subscribes the calling component.
    pub fn mode(&self) -> ThemeMode {
        (self.mode)()
    }

    /// Switches to the other mode and saves the choice.
    ///
    /// When the preference cannot be saved the theme stays as it is.
    pub fn toggle(&mut self) {
        let mut store = PreferenceStore::default();
        if let Err(e) = toggle_theme(&mut store, self) {
            dioxus_logger::tracing::warn!("could not save theme preference: {}", e);
        }
    }
}

impl ThemeView for ThemeHandle {
    fn applied_theme(&self) -> ThemeMode {
        *self.mode.peek()
    }

    fn apply_theme(&mut self, mode: ThemeMode) {
        if *self.mode.peek() != mode {
            self.mode.set(mode);
        }
    }
}

/// Loads the starting theme once and keeps `<body>` in sync with it.
pub fn use_theme() -> ThemeHandle {
    let mode = use_signal(|| initial_theme(&PreferenceStore::default(), compat::prefers_dark));

    use_effect(move || {
        compat::set_body_class(DARK_THEME_CLASS, mode().is_dark());
    });

    ThemeHandle { mode }
}
