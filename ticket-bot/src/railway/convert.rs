//! Conversion from provider DTOs to domain offers.

use crate::domain::{
    CarOffer, FareTariff, Price, TimeError, TrainOffer, parse_provider_datetime,
};

use super::types::{RawCar, RawTariff, RawTrain};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// A date-time field was not `DD.MM.YYYY HH:MM`
    #[error("train {train}: bad {field}: {source}")]
    InvalidTime {
        train: String,
        field: &'static str,
        #[source]
        source: TimeError,
    },
}

/// Convert every train in a response.
///
/// One malformed train fails the whole batch: a provider format change
/// should surface as an error, not as silently missing trains.
pub fn convert_trains(trains: &[RawTrain]) -> Result<Vec<TrainOffer>, ConversionError> {
    trains.iter().map(convert_train).collect()
}

/// Convert a single provider train.
pub fn convert_train(raw: &RawTrain) -> Result<TrainOffer, ConversionError> {
    let parse = |field: &'static str, value: &str| {
        parse_provider_datetime(value).map_err(|source| ConversionError::InvalidTime {
            train: raw.number.clone(),
            field,
            source,
        })
    };

    Ok(TrainOffer {
        brand: raw.brand.clone(),
        number: raw.number.clone(),
        train_type: raw.train_type.clone(),
        departure: parse("departureDate", &raw.departure_date)?,
        arrival: parse("arrivalDate", &raw.arrival_date)?,
        time_on_way: raw.time_on_way.clone(),
        origin_name: raw.sub_route.dep_station_name.clone(),
        destination_name: raw.sub_route.arv_station_name.clone(),
        route_origin: raw.origin_route.dep_station_name.clone(),
        route_destination: raw.origin_route.arv_station_name.clone(),
        cars: raw.cars.iter().map(convert_car).collect(),
        comment: raw.comment.clone(),
    })
}

fn convert_car(raw: &RawCar) -> CarOffer {
    CarOffer {
        seat_class: raw.car_type.clone(),
        free_seats: raw.free_seats,
        tariffs: raw.tariffs.iter().map(convert_tariff).collect(),
    }
}

fn convert_tariff(raw: &RawTariff) -> FareTariff {
    FareTariff {
        class: raw.class_service_type.clone(),
        free_seats: raw.free_seats,
        price: Price::new(raw.tariff),
    }
}
