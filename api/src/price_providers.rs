//! Defines the price lookup capability and its CoinGecko implementation.

use crate::fiat_currency::FiatCurrency;
use thiserror::Error;

/// Why a price lookup failed. The `Display` text is what the user sees.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// The request never produced a response (offline, DNS, CORS, ...).
    #[error("Network error while fetching prices.")]
    Network(String),
    /// The API answered with a non-success status.
    #[error("Failed to fetch pricing data.")]
    Http { status: u16 },
    /// The body could not be decoded as JSON.
    #[error("Invalid JSON returned from CoinGecko.")]
    Parse(String),
    /// The body decoded, but had no usable price for the requested coin.
    #[error("CoinGecko did not return a {} price for that asset.", .currency.code())]
    MissingData { currency: FiatCurrency },
}

/// Outcome of a single price lookup. `Ok` always holds a finite, positive price.
pub type PriceQuoteResult = Result<f64, QuoteError>;

/// A trait for any service that can quote the price of one coin.
pub trait PriceProvider {
    /// Fetches the current price of one unit of `coin_id` in `currency`.
    async fn get_price(&self, coin_id: &str, currency: FiatCurrency) -> PriceQuoteResult;
}

/// Provides price data from the public CoinGecko API.
pub mod coin_gecko {
    use super::*;
    use dioxus_logger::tracing::debug;
    use dioxus_logger::tracing::info;
    use serde_json::Value;

    pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

    /// An implementation of the `PriceProvider` trait for CoinGecko's
    /// `simple/price` endpoint.
    #[derive(Clone, Debug)]
    pub struct CoinGecko {
        client: reqwest::Client,
        base_url: String,
    }

    impl CoinGecko {
        /// Creates a provider talking to `base_url` (no trailing slash needed).
        pub fn new(base_url: impl Into<String>) -> Self {
            let base_url = base_url.into().trim_end_matches('/').to_string();
            Self {
                client: reqwest::Client::new(),
                base_url,
            }
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    impl Default for CoinGecko {
        fn default() -> Self {
            Self::new(DEFAULT_API_URL)
        }
    }

    /// Builds the `simple/price` request URL for one coin in one currency.
    ///
    /// A base URL that does not parse fails the same way an unreachable
    /// host would.
    pub fn price_url(
        base_url: &str,
        coin_id: &str,
        currency: FiatCurrency,
    ) -> Result<reqwest::Url, QuoteError> {
        let vs_currency = currency.api_id();
        reqwest::Url::parse_with_params(
            &format!("{}/simple/price", base_url.trim_end_matches('/')),
            &[("ids", coin_id), ("vs_currencies", vs_currency.as_str())],
        )
        .map_err(|e| QuoteError::Network(e.to_string()))
    }

    impl PriceProvider for CoinGecko {
        async fn get_price(&self, coin_id: &str, currency: FiatCurrency) -> PriceQuoteResult {
            let url = price_url(&self.base_url, coin_id, currency)?;
            info!("requesting {} price for {}", currency.code(), coin_id);

            let resp = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| QuoteError::Network(e.to_string()))?;

            let status = resp.status();
            debug!("{} answered {}", url, status);

            // no point reading the body of a failed request.
            let body = if status.is_success() {
                resp.text()
                    .await
                    .map_err(|e| QuoteError::Network(e.to_string()))?
            } else {
                String::new()
            };

            read_simple_price(status.as_u16(), &body, coin_id, currency)
        }
    }

    /// Classifies a `simple/price` response.
    ///
    /// The expected body is `{"<coin_id>": {"<currency>": <number>}}`. Anything
    /// outside 2xx is an HTTP failure regardless of the body.
    pub fn read_simple_price(
        status: u16,
        body: &str,
        coin_id: &str,
        currency: FiatCurrency,
    ) -> PriceQuoteResult {
        if !(200..300).contains(&status) {
            return Err(QuoteError::Http { status });
        }

        let resp: Value =
            serde_json::from_str(body).map_err(|e| QuoteError::Parse(e.to_string()))?;

        resp.get(coin_id)
            .and_then(|quotes| quotes.get(currency.api_id().as_str()))
            .and_then(Value::as_f64)
            .filter(|price| price.is_finite() && *price > 0.0)
            .ok_or(QuoteError::MissingData { currency })
    }

}
