//=============================================================================
// File: src/screens/converter.rs
//=============================================================================
use crate::components::pico::Button;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::Input;
use crate::AppState;
use api::converter::ConversionEngine;
use api::converter::ConversionInput;
use api::converter::ConverterView;
use api::converter::Phase;
use api::converter::ResultDisplay;
use api::converter::Status;
use api::price_providers::coin_gecko::CoinGecko;
use dioxus::prelude::*;

/// Renders engine output into the screen's signals.
#[derive(Clone, Copy)]
struct SignalView {
    submit_enabled: Signal<bool>,
    status: Signal<Status>,
    note: Signal<Option<String>>,
    result: Signal<ResultDisplay>,
}

impl ConverterView for SignalView {
    fn submit_enabled(&self) -> bool {
        *self.submit_enabled.peek()
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled.set(enabled);
    }

    fn render_status(&mut self, status: &Status) {
        self.status.set(status.clone());
    }

    fn render_note(&mut self, note: Option<&str>) {
        self.note.set(note.map(str::to_owned));
    }

    fn render_result(&mut self, result: &ResultDisplay) {
        self.result.set(result.clone());
    }

    fn enter_phase(&mut self, phase: Phase) {
        dioxus_logger::tracing::debug!("converter phase: {:?}", phase);
    }
}

#[component]
pub fn ConverterScreen() -> Element {
    let app_state = use_context::<AppState>();
    let engine = use_hook(|| {
        let provider = CoinGecko::new(app_state.prefs.api_url.clone());
        ConversionEngine::new(provider, app_state.prefs.quote_currency)
    });
    let currency = engine.currency();

    let mut coin_id = use_signal(String::new);
    let mut amount = use_signal(String::new);
    let mut coffee_price = use_signal(|| format!("{:.2}", app_state.prefs.default_coffee_price));

    let view = SignalView {
        submit_enabled: use_signal(|| true),
        status: use_signal(Status::default),
        note: use_signal(|| None),
        result: use_signal(|| ResultDisplay::zero(currency)),
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();

        let input = ConversionInput {
            coin_id: coin_id(),
            amount: amount(),
            coffee_price: coffee_price(),
        };
        let engine = engine.clone();
        let mut view = view;
        spawn(async move {
            // the outcome has already been rendered into `view`.
            let _ = engine.submit(&input, &mut view).await;
        });
    };

    let result = (view.result)();
    let status = (view.status)();
    let submit_enabled = (view.submit_enabled)();

    rsx! {
        Card {
            h3 { "Crypto to Coffee" }
            form {
                onsubmit: on_submit,
                Grid {
                    Input {
                        label: "Coin ID",
                        name: "coin-id",
                        placeholder: "bitcoin",
                        value: coin_id(),
                        on_input: move |v: String| coin_id.set(v),
                    }
                    Input {
                        label: "Amount",
                        name: "amount",
                        input_type: "number",
                        step: "any",
                        placeholder: "0.5",
                        value: amount(),
                        on_input: move |v: String| amount.set(v),
                    }
                    Input {
                        label: "Coffee price ({currency.code()})",
                        name: "coffee-price",
                        input_type: "number",
                        step: "0.01",
                        value: coffee_price(),
                        on_input: move |v: String| coffee_price.set(v),
                    }
                }
                Button {
                    submit: true,
                    disabled: !submit_enabled,
                    "Convert"
                }
            }
            Grid {
                div {
                    small { "Crypto value" }
                    h4 { class: "crypto-value", "{result.crypto_value}" }
                }
                div {
                    small { "Coffees" }
                    h4 { class: "coffee-count", "{result.coffee_count}" }
                }
            }
            p {
                class: "{status.kind.css_class()}",
                role: "status",
                "aria-live": "polite",
                "{status.message}"
            }
            if let Some(note) = (view.note)() {
                small { class: "note", "{note}" }
            }
        }
    }
}
