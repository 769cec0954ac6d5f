//! The coin-to-coffee conversion pipeline.
//!
//! A submission moves through `Idle → Validating → Fetching → Computed | Failed → Idle`.
//! Validation happens before any network activity; the price lookup is the only
//! suspension point. Every outcome is rendered through a [`ConverterView`], so
//! the engine never touches a real page.

use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::info;
use dioxus_logger::tracing::warn;
use thiserror::Error;

use crate::fiat_currency::FiatCurrency;
use crate::number_format::format_count;
use crate::number_format::format_grouped;
use crate::price_providers::PriceProvider;
use crate::price_providers::QuoteError;

pub const FETCHING_MESSAGE: &str = "Fetching latest price...";
pub const SUCCESS_MESSAGE: &str = "Conversion complete.";
pub const RETRY_HINT: &str = "Try another CoinGecko ID.";

/// A form value the user has to fix. Checked in declaration order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("Enter a valid coin ID and amount.")]
    CoinOrAmount,
    #[error("Enter a valid coffee price.")]
    CoffeePrice,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Quote(#[from] QuoteError),
    /// Submit was disabled when the submission arrived.
    #[error("A conversion is already in progress.")]
    InFlight,
}

pub type ConversionOutcome = Result<Conversion, ConversionError>;

/// The raw text of the form fields at submit time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversionInput {
    pub coin_id: String,
    pub amount: String,
    pub coffee_price: String,
}

/// A validated submission.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionRequest {
    /// Trimmed, lowercase, never empty.
    pub coin_id: String,
    /// Finite and positive.
    pub amount: f64,
    /// Finite and positive.
    pub coffee_price: f64,
}

impl ConversionRequest {
    /// Validates the form fields.
    ///
    /// The coin id and amount are checked together and before the coffee
    /// price, so a form that is wrong everywhere reports the coin/amount error.
    pub fn parse(input: &ConversionInput) -> Result<Self, InputError> {
        let coin_id = input.coin_id.trim().to_lowercase();

        let amount = match parse_positive(&input.amount) {
            Some(amount) if !coin_id.is_empty() => amount,
            _ => return Err(InputError::CoinOrAmount),
        };

        let coffee_price = parse_positive(&input.coffee_price).ok_or(InputError::CoffeePrice)?;

        Ok(Self {
            coin_id,
            amount,
            coffee_price,
        })
    }
}

fn parse_positive(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// How many coffees `total_value` buys at `coffee_price` each.
///
/// Zero whenever either operand is non-finite or not positive.
pub fn compute_coffee_count(total_value: f64, coffee_price: f64) -> f64 {
    if !total_value.is_finite() || !coffee_price.is_finite() {
        return 0.0;
    }
    if total_value <= 0.0 || coffee_price <= 0.0 {
        return 0.0;
    }
    total_value / coffee_price
}

/// Formats `value` as a localized amount of `currency` (e.g. "$100,000.00").
///
/// Works on the float directly, so totals beyond the `i64` minor-unit range
/// keep their digits.
pub fn format_currency(value: f64, currency: FiatCurrency) -> String {
    let decimals = currency.decimals() as usize;
    let digits = format_grouped(value, decimals, decimals);
    match digits.strip_prefix('-') {
        Some(abs) => format!("-{}{}", currency.symbol(), abs),
        None => format!("{}{}", currency.symbol(), digits),
    }
}

/// Formats a per-coin price, keeping up to 8 fraction digits so sub-cent
/// coins stay readable (e.g. "$0.00001234", "$50,000.00").
pub fn format_price(price: f64, currency: FiatCurrency) -> String {
    format!(
        "{}{}",
        currency.symbol(),
        format_grouped(price, currency.decimals() as usize, 8)
    )
}

/// A successful conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    pub coin_id: String,
    pub currency: FiatCurrency,
    /// Price of one coin, as quoted.
    pub price: f64,
    pub amount: f64,
    /// `price × amount`.
    pub total_value: f64,
    pub coffee_count: f64,
}

impl Conversion {
    /// `price × amount` can overflow; a non-finite total is reported as zero.
    pub fn compute(request: &ConversionRequest, price: f64, currency: FiatCurrency) -> Self {
        let total_value = Some(price * request.amount)
            .filter(|total| total.is_finite())
            .unwrap_or(0.0);
        Self {
            coin_id: request.coin_id.clone(),
            currency,
            price,
            amount: request.amount,
            total_value,
            coffee_count: compute_coffee_count(total_value, request.coffee_price),
        }
    }

    pub fn display(&self) -> ResultDisplay {
        ResultDisplay {
            crypto_value: format_currency(self.total_value, self.currency),
            coffee_count: format_count(self.coffee_count),
        }
    }

    /// Names the coin and the price the result was computed with.
    pub fn note(&self) -> String {
        format!(
            "Using {} at {} per coin.",
            self.coin_id.to_uppercase(),
            format_price(self.price, self.currency)
        )
    }
}

/// Text for the two output regions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultDisplay {
    pub crypto_value: String,
    pub coffee_count: String,
}

impl ResultDisplay {
    /// What the regions show before the first conversion and after a failure.
    pub fn zero(currency: FiatCurrency) -> Self {
        Self {
            crypto_value: format_currency(0.0, currency),
            coffee_count: "0".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

impl StatusKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Idle => "status",
            Self::Pending => "status status-pending",
            Self::Success => "status status-success",
            Self::Error => "status status-error",
        }
    }
}

/// The status line: a kind (for styling) and a message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn pending(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Pending,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

/// Where a submission currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Fetching,
    Computed,
    Failed,
}

/// The form surface the engine renders into.
pub trait ConverterView {
    fn submit_enabled(&self) -> bool;
    fn set_submit_enabled(&mut self, enabled: bool);
    fn render_status(&mut self, status: &Status);
    fn render_note(&mut self, note: Option<&str>);
    fn render_result(&mut self, result: &ResultDisplay);

    /// Called on every phase transition.
    fn enter_phase(&mut self, _phase: Phase) {}
}

/// Runs submissions against a price provider.
#[derive(Clone, Debug)]
pub struct ConversionEngine<P> {
    provider: P,
    currency: FiatCurrency,
}

impl<P: PriceProvider> ConversionEngine<P> {
    pub fn new(provider: P, currency: FiatCurrency) -> Self {
        Self { provider, currency }
    }

    pub fn currency(&self) -> FiatCurrency {
        self.currency
    }

    /// Runs one submission to completion and renders its outcome.
    ///
    /// Submissions are serialized through the submit control: while it is
    /// disabled the submission is dropped with [`ConversionError::InFlight`]
    /// and the view is left alone. Submit is always re-enabled once a fetch
    /// finishes, successful or not.
    pub async fn submit<V: ConverterView>(
        &self,
        input: &ConversionInput,
        view: &mut V,
    ) -> ConversionOutcome {
        if !view.submit_enabled() {
            debug!("ignoring submit while a conversion is in flight");
            return Err(ConversionError::InFlight);
        }

        view.enter_phase(Phase::Validating);
        let request = match ConversionRequest::parse(input) {
            Ok(request) => request,
            Err(e) => {
                view.render_status(&Status::error(e.to_string()));
                view.enter_phase(Phase::Idle);
                return Err(e.into());
            }
        };

        view.enter_phase(Phase::Fetching);
        view.set_submit_enabled(false);
        view.render_status(&Status::pending(FETCHING_MESSAGE));
        view.render_note(None);

        let outcome = match self.provider.get_price(&request.coin_id, self.currency).await {
            Ok(price) => {
                let conversion = Conversion::compute(&request, price, self.currency);
                info!(
                    "{} {} = {} = {} coffees",
                    conversion.amount,
                    conversion.coin_id,
                    format_currency(conversion.total_value, self.currency),
                    conversion.coffee_count
                );

                view.render_result(&conversion.display());
                view.render_status(&Status::success(SUCCESS_MESSAGE));
                view.render_note(Some(&conversion.note()));
                view.enter_phase(Phase::Computed);
                Ok(conversion)
            }
            Err(e) => {
                warn!("price lookup for {} failed: {:?}", request.coin_id, e);

                view.render_result(&ResultDisplay::zero(self.currency));
                view.render_status(&Status::error(e.to_string()));
                view.render_note(Some(RETRY_HINT));
                view.enter_phase(Phase::Failed);
                Err(e.into())
            }
        };

        view.set_submit_enabled(true);
        view.enter_phase(Phase::Idle);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(coin_id: &str, amount: &str, coffee_price: &str) -> ConversionInput {
        ConversionInput {
            coin_id: coin_id.to_string(),
            amount: amount.to_string(),
            coffee_price: coffee_price.to_string(),
        }
    }

    #[test]
    fn coffee_count_divides_positive_finite_operands() {
        assert_eq!(compute_coffee_count(12.50, 5.00), 2.5);
        assert_eq!(compute_coffee_count(100_000.0, 5.0), 20_000.0);
    }

    #[test]
    fn coffee_count_is_zero_for_bad_operands() {
        let bad = [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY];
        for b in bad {
            assert_eq!(compute_coffee_count(b, 5.0), 0.0, "total {b}");
            assert_eq!(compute_coffee_count(10.0, b), 0.0, "price {b}");
            assert_eq!(compute_coffee_count(b, b), 0.0, "both {b}");
        }
    }

    #[test]
    fn parse_normalizes_coin_id() {
        let request = ConversionRequest::parse(&input("  Bitcoin ", "2", "5")).unwrap();
        assert_eq!(request.coin_id, "bitcoin");
        assert_eq!(request.amount, 2.0);
        assert_eq!(request.coffee_price, 5.0);
    }

    #[test]
    fn parse_rejects_bad_coin_or_amount() {
        let cases = [
            ("", "1"),
            ("   ", "1"),
            ("bitcoin", ""),
            ("bitcoin", "0"),
            ("bitcoin", "-2"),
            ("bitcoin", "abc"),
            ("bitcoin", "inf"),
            ("bitcoin", "NaN"),
        ];
        for (coin, amount) in cases {
            assert_eq!(
                ConversionRequest::parse(&input(coin, amount, "5")),
                Err(InputError::CoinOrAmount),
                "coin {coin:?} amount {amount:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_bad_coffee_price() {
        for price in ["", "0", "-4", "x", "infinity"] {
            assert_eq!(
                ConversionRequest::parse(&input("bitcoin", "1", price)),
                Err(InputError::CoffeePrice),
                "price {price:?}"
            );
        }
    }

    #[test]
    fn coin_and_amount_are_reported_before_coffee_price() {
        let err = ConversionRequest::parse(&input("", "-1", "0")).unwrap_err();
        assert_eq!(err, InputError::CoinOrAmount);
        assert_eq!(err.to_string(), "Enter a valid coin ID and amount.");
    }

    #[test]
    fn conversion_display_and_note() {
        let request = ConversionRequest::parse(&input("bitcoin", "2", "5")).unwrap();
        let conversion = Conversion::compute(&request, 50_000.0, FiatCurrency::USD);

        assert_eq!(conversion.total_value, 100_000.0);
        assert_eq!(conversion.coffee_count, 20_000.0);
        assert_eq!(
            conversion.display(),
            ResultDisplay {
                crypto_value: "$100,000.00".to_string(),
                coffee_count: "20,000".to_string(),
            }
        );
        assert_eq!(conversion.note(), "Using BITCOIN at $50,000.00 per coin.");
    }

    #[test]
    fn huge_totals_keep_their_digits() {
        let request = ConversionRequest::parse(&input("bitcoin", "1e20", "5")).unwrap();
        let conversion = Conversion::compute(&request, 50_000.0, FiatCurrency::USD);

        assert_eq!(
            conversion.display(),
            ResultDisplay {
                crypto_value: "$5,000,000,000,000,000,000,000,000.00".to_string(),
                coffee_count: "1,000,000,000,000,000,000,000,000".to_string(),
            }
        );
    }

    #[test]
    fn overflowed_total_is_zero() {
        let request = ConversionRequest::parse(&input("bitcoin", "1e305", "5")).unwrap();
        let conversion = Conversion::compute(&request, 50_000.0, FiatCurrency::USD);

        assert_eq!(conversion.total_value, 0.0);
        assert_eq!(conversion.coffee_count, 0.0);
        assert_eq!(conversion.display(), ResultDisplay::zero(FiatCurrency::USD));
    }

    #[test]
    fn currency_uses_its_own_decimals() {
        assert_eq!(format_currency(1234.5, FiatCurrency::JPY), "¥1,235");
        assert_eq!(format_currency(-1234.5, FiatCurrency::USD), "-$1,234.50");
    }

    #[test]
    fn sub_cent_prices_stay_readable() {
        assert_eq!(format_price(0.00001234, FiatCurrency::USD), "$0.00001234");
        assert_eq!(format_price(1.5, FiatCurrency::USD), "$1.50");
    }

    #[test]
    fn zero_display() {
        let zero = ResultDisplay::zero(FiatCurrency::USD);
        assert_eq!(zero.crypto_value, "$0.00");
        assert_eq!(zero.coffee_count, "0");
    }

    #[test]
    fn conversion_error_shows_inner_message() {
        let err: ConversionError = InputError::CoffeePrice.into();
        assert_eq!(err.to_string(), "Enter a valid coffee price.");
        let err: ConversionError = QuoteError::Network("dns".to_string()).into();
        assert_eq!(err.to_string(), "Network error while fetching prices.");
    }
}
