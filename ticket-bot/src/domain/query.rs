//! Search queries.

use chrono::NaiveDate;

/// A single forward-journey search.
///
/// Station fields hold whatever the station directory resolved the user's
/// input to: normally a provider code, but unknown names pass through
/// unchanged and are left for the provider to reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    origin: String,
    destination: String,
    date: NaiveDate,
}

impl SearchQuery {
    /// Create a query from resolved station tokens and a travel date.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            date,
        }
    }

    /// Origin station token.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Destination station token.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Travel date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}
