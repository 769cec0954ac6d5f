use dioxus::prelude::*;

use crate::app_state_mut::AppStateMut;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;

/// Switches between the light and dark theme. The label names the mode a
/// click switches to; `aria-pressed` is true while dark is active.
#[component]
pub fn ThemeToggle() -> Element {
    let mut theme = use_context::<AppStateMut>().theme;
    let mode = theme.mode();

    rsx! {
        Button {
            button_type: ButtonType::Contrast,
            outline: true,
            aria_pressed: mode.aria_pressed().to_string(),
            on_click: move |_| theme.toggle(),
            "{mode.toggle_label()}"
        }
    }
}
