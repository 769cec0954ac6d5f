//! Shared building blocks: Pico.css wrappers and the theme toggle.
pub mod pico;
pub mod theme_toggle;
