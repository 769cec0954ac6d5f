//! Defines the mutable, reactive state for the application's UI.

use crate::hooks::use_theme::ThemeHandle;

/// A reactive state provided as a Dioxus context for mutable UI data.
///
/// This struct holds handles for any UI-related state that needs to change
/// and trigger automatic re-renders in the view. It is separate from the core,
/// immutable `AppState`.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    /// The applied light/dark theme.
    pub theme: ThemeHandle,
}
