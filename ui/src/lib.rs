// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
pub mod compat;
mod components;
pub mod hooks;
mod screens;

use api::prefs::converter_prefs::ConverterPrefs;
use app_state::AppState;
use app_state_mut::AppStateMut;
use components::pico::Container;
use components::theme_toggle::ThemeToggle;
use hooks::use_theme::use_theme;
use screens::converter::ConverterScreen;

const PICO_CSS: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css";

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let responsive_css = r#"
    * { box-sizing: border-box; }

    .app-main-container {
        min-height: 100vh;
        padding: 10px;
        background-color: var(--pico-background-color);
        color: var(--pico-color);
    }

    .app-main-container header nav {
        --pico-nav-element-spacing-vertical: 0.5rem;
    }

    /* --- RESULTS --- */
    .crypto-value, .coffee-count {
        margin: 0.25rem 0 1rem 0;
        font-variant-numeric: tabular-nums;
    }

    /* --- STATUS LINE --- */
    .status { margin-bottom: 0.25rem; min-height: 1.5rem; }
    .status-pending { color: var(--pico-muted-color); }
    .status-success { color: var(--pico-ins-color); }
    .status-error { color: var(--pico-del-color); }
    .note { color: var(--pico-muted-color); }

    /* --- DARK THEME ---
       pico switches its palette on data-theme; the class marker is kept for
       anything styled outside of pico. */
    body.theme-dark, .theme-dark {
        color-scheme: dark;
    }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: "{PICO_CSS}",
        }
        style {
            "{responsive_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    let app_state = use_hook(|| {
        let prefs = ConverterPrefs::from_env();
        dioxus_logger::tracing::info!("prefs: {:#?}", prefs);
        AppState::new(prefs)
    });
    use_context_provider(|| app_state.clone());

    let theme = use_theme();
    use_context_provider(|| AppStateMut { theme });

    let mode = theme.mode();
    let root_class = match mode.root_class() {
        Some(class) => format!("app-main-container {}", class),
        None => "app-main-container".to_string(),
    };

    rsx! {
        div {
            class: "{root_class}",
            "data-theme": mode.as_str(),
            Container {
                header {
                    nav {
                        ul {
                            li {
                                strong { "Coin → Coffee" }
                            }
                        }
                        ul {
                            li {
                                ThemeToggle {}
                            }
                        }
                    }
                }
                div {
                    class: "content",
                    ConverterScreen {}
                }
            }
        }
    }
}
