pub mod converter_prefs;
pub mod theme_preference;
