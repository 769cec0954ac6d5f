//! Platform-neutral core of the coffee converter: price lookup, conversion
//! and display preferences. Nothing in here touches a real page.

pub mod converter;
pub mod fiat_currency;
pub mod number_format;
pub mod prefs;
pub mod price_providers;

pub type ApiError = anyhow::Error;
