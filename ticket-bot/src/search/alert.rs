//! Ticket alert criteria.

use crate::domain::{Price, TrainOffer};

/// What a user is waiting for on a route.
///
/// A zero price bound means "no bound".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertCriteria {
    /// Acceptable seat classes or tariff classes; empty accepts any.
    pub seat_types: Vec<String>,
    pub min_price: Price,
    pub max_price: Price,
}

impl AlertCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seat_type(mut self, seat_type: impl Into<String>) -> Self {
        self.seat_types.push(seat_type.into());
        self
    }

    pub fn with_price_range(mut self, min: Price, max: Price) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    fn accepts_class(&self, car_class: &str, tariff_class: &str) -> bool {
        self.seat_types.is_empty()
            || self.seat_types.iter().any(|wanted| {
                eq_ignore_case(car_class, wanted) || eq_ignore_case(tariff_class, wanted)
            })
    }

    fn accepts_price(&self, price: Price) -> bool {
        let zero = Price::default();
        (self.min_price == zero || price >= self.min_price)
            && (self.max_price == zero || price <= self.max_price)
    }
}

/// True if any tariff with free seats satisfies the criteria.
pub fn matches_alert(offer: &TrainOffer, criteria: &AlertCriteria) -> bool {
    offer.cars.iter().any(|car| {
        car.tariffs.iter().any(|tariff| {
            tariff.is_available()
                && criteria.accepts_class(&car.seat_class, &tariff.class)
                && criteria.accepts_price(tariff.price)
        })
    })
}

/// Unicode case-insensitive comparison; seat classes are often Cyrillic.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
