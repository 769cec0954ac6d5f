use crate::fiat_currency::FiatCurrency;
use crate::price_providers::coin_gecko::DEFAULT_API_URL;
use serde::Deserialize;
use serde::Serialize;
use std::env;
use std::str::FromStr;

/// Settings for the converter form and its price source.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ConverterPrefs {
    /// The currency prices are quoted in and coffee is paid in.
    pub quote_currency: FiatCurrency,

    /// Base URL of the CoinGecko v3 API.
    pub api_url: String,

    /// Coffee price pre-filled into the form.
    pub default_coffee_price: f64,
}

impl ConverterPrefs {
    /// Creates a ConverterPrefs instance from environment variables,
    /// with in-code defaults.
    ///
    /// Each variable is read at runtime first and falls back to the value it
    /// had at compile time, which is the only source in a wasm build.
    ///
    /// # Environment Variables:
    /// - `QUOTE_CURRENCY`: "USD", "EUR", "JPY", ... (case-insensitive).
    /// - `COINGECKO_API_URL`: e.g. a caching proxy in front of CoinGecko.
    /// - `DEFAULT_COFFEE_PRICE`: a positive number, e.g. "4.50".
    pub fn from_env() -> Self {
        const DEFAULT_COFFEE_PRICE: f64 = 5.0;

        let quote_currency = setting("QUOTE_CURRENCY", option_env!("QUOTE_CURRENCY"))
            .and_then(|s| FiatCurrency::from_str(s.trim()).ok())
            .unwrap_or_default();

        let api_url = setting("COINGECKO_API_URL", option_env!("COINGECKO_API_URL"))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let default_coffee_price =
            setting("DEFAULT_COFFEE_PRICE", option_env!("DEFAULT_COFFEE_PRICE"))
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|p| p.is_finite() && *p > 0.0)
                .unwrap_or(DEFAULT_COFFEE_PRICE);

        Self {
            quote_currency,
            api_url,
            default_coffee_price,
        }
    }
}

impl Default for ConverterPrefs {
    fn default() -> Self {
        Self::from_env()
    }
}

fn setting(name: &str, compiled_in: Option<&'static str>) -> Option<String> {
    env::var(name)
        .ok()
        .or_else(|| compiled_in.map(str::to_owned))
}
