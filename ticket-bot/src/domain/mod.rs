//! Domain types for the ticket bot.
//!
//! Validated values that the rest of the crate passes around: fares,
//! languages, queries and normalised train offers. Provider wire shapes
//! live in `railway`; these types never see raw JSON.

mod language;
mod offer;
mod price;
mod query;
mod time;

#[cfg(test)]
pub(crate) use offer::fixtures;
pub use language::{Language, UnknownLanguage};
pub use offer::{CarOffer, FareTariff, TrainOffer};
pub use price::Price;
pub use query::SearchQuery;
pub use time::{
    PROVIDER_DATETIME_FORMAT, REQUEST_DATE_FORMAT, TimeError, format_request_date,
    parse_provider_datetime, parse_request_date,
};
