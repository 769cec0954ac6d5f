//! Defines the fiat currencies a price can be quoted in.

use serde::Deserialize;
use serde::Serialize;

/// A quote currency accepted by the CoinGecko `vs_currencies` parameter.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Default,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum FiatCurrency {
    AUD, // Australian Dollar
    CAD, // Canadian Dollar
    CHF, // Swiss Franc
    EUR, // Euro
    GBP, // Great British Pound
    JPY, // Japanese Yen
    KWD, // Kuwaiti Dinar
    #[default]
    USD, // United States Dollar
}

impl FiatCurrency {
    /// Returns the number of decimal digits used by the currency.
    ///
    /// USD uses 2 decimal places (cents), JPY uses 0 and KWD uses 3.
    pub fn decimals(&self) -> u8 {
        match self {
            Self::JPY => 0,
            Self::KWD => 3,
            _ => 2,
        }
    }

    /// Returns the graphical symbol for the currency (e.g., '$').
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::AUD => "A$",
            Self::CAD => "CA$",
            Self::CHF => "CHF ",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::JPY => "¥",
            Self::KWD => "KWD ",
            Self::USD => "$",
        }
    }

    /// Returns the ISO 4217 string code for the currency (e.g., "USD").
    /// This is handled automatically by the `strum::IntoStaticStr` derive macro.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// The lowercase identifier CoinGecko uses for this currency, both in the
    /// query string and as the key of the returned price.
    pub fn api_id(&self) -> String {
        self.code().to_ascii_lowercase()
    }
}
