//! Normalised train offers.
//!
//! A `TrainOffer` is one train from a search result with its seat classes
//! and fares. Availability and the cheapest fare are derived from the
//! tariffs, never stored.

use chrono::{Duration, NaiveDateTime};

use super::Price;

/// Format used when showing clock times to users.
const CLOCK_FORMAT: &str = "%H:%M";

/// Format used when showing travel dates to users.
const DATE_FORMAT: &str = "%d.%m.%Y";

/// One fare within a car class (e.g. "1В" business, "2Е" economy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareTariff {
    /// Provider sub-class label.
    pub class: String,
    /// Free seats sold at this fare.
    pub free_seats: u32,
    /// Fare price.
    pub price: Price,
}

impl FareTariff {
    pub fn is_available(&self) -> bool {
        self.free_seats > 0
    }
}

/// A car class on a train (e.g. seated, sleeper, compartment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarOffer {
    /// Seat-class label as the provider names it.
    pub seat_class: String,
    /// Free seats across the whole car class.
    pub free_seats: u32,
    /// Fares offered in this car class.
    pub tariffs: Vec<FareTariff>,
}

/// A train found by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainOffer {
    /// Carrier brand (e.g. "Afrosiyob", "Sharq").
    pub brand: String,
    /// Train number (e.g. "778Ф").
    pub number: String,
    /// Provider rolling-stock code (e.g. "СКРСТ").
    pub train_type: String,
    /// Scheduled departure from the searched origin.
    pub departure: NaiveDateTime,
    /// Scheduled arrival at the searched destination.
    pub arrival: NaiveDateTime,
    /// Travel time as the provider reports it ("HH:MM").
    pub time_on_way: String,
    /// Display name of the searched origin.
    pub origin_name: String,
    /// Display name of the searched destination.
    pub destination_name: String,
    /// First station of the whole route.
    pub route_origin: String,
    /// Last station of the whole route.
    pub route_destination: String,
    /// Car classes with fares.
    pub cars: Vec<CarOffer>,
    /// Free-form provider note, rarely set.
    pub comment: Option<String>,
}

impl TrainOffer {
    /// Elapsed time between scheduled departure and arrival.
    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }

    /// True iff at least one tariff in any car has a free seat.
    pub fn has_available_seats(&self) -> bool {
        self.available_tariffs().next().is_some()
    }

    /// Cheapest fare among tariffs with free seats.
    pub fn min_price(&self) -> Option<Price> {
        self.available_tariffs().map(|t| t.price).min()
    }

    /// Sum of the car-level free seat counts.
    pub fn total_free_seats(&self) -> u32 {
        self.cars.iter().map(|c| c.free_seats).sum()
    }

    /// Departure clock time, "HH:MM".
    pub fn departure_clock(&self) -> String {
        self.departure.format(CLOCK_FORMAT).to_string()
    }

    /// Arrival clock time, "HH:MM".
    pub fn arrival_clock(&self) -> String {
        self.arrival.format(CLOCK_FORMAT).to_string()
    }

    /// Departure date, "DD.MM.YYYY".
    pub fn travel_date(&self) -> String {
        self.departure.format(DATE_FORMAT).to_string()
    }

    fn available_tariffs(&self) -> impl Iterator<Item = &FareTariff> {
        self.cars
            .iter()
            .flat_map(|c| c.tariffs.iter())
            .filter(|t| t.is_available())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::NaiveDate;

    pub fn tariff(class: &str, free_seats: u32, price: u64) -> FareTariff {
        FareTariff {
            class: class.to_string(),
            free_seats,
            price: Price::new(price),
        }
    }

    pub fn car(seat_class: &str, free_seats: u32, tariffs: Vec<FareTariff>) -> CarOffer {
        CarOffer {
            seat_class: seat_class.to_string(),
            free_seats,
            tariffs,
        }
    }

    pub fn offer(cars: Vec<CarOffer>) -> TrainOffer {
        let date = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
        TrainOffer {
            brand: "Afrosiyob".to_string(),
            number: "778Ф".to_string(),
            train_type: "СКРСТ".to_string(),
            departure: date.and_hms_opt(6, 3, 0).unwrap(),
            arrival: date.and_hms_opt(8, 21, 0).unwrap(),
            time_on_way: "02:18".to_string(),
            origin_name: "TOSHKENT".to_string(),
            destination_name: "SAMARQAND".to_string(),
            route_origin: "Toshkent Markaziy".to_string(),
            route_destination: "Buxoro".to_string(),
            cars,
            comment: None,
        }
    }
}
