//! Provider wire DTOs.
//!
//! These mirror the provider's JSON exactly. Fields the provider sends as
//! `null` are `Option`; nothing here is validated beyond what serde checks.

use serde::{Deserialize, Serialize};

use crate::domain::{SearchQuery, format_request_date};

/// Body of `POST /handbook/trains/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSearchRequest {
    pub directions: RequestDirections,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDirections {
    pub forward: JourneyRequest,
    /// Return leg; never sent by the bot but part of the provider shape.
    #[serde(rename = "return", default, skip_serializing_if = "Option::is_none")]
    pub return_journey: Option<JourneyRequest>,
}

/// One journey direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyRequest {
    /// Travel date, `YYYY-MM-DD`.
    pub date: String,
    pub dep_station_code: String,
    pub arv_station_code: String,
}

impl From<&SearchQuery> for TrainSearchRequest {
    fn from(query: &SearchQuery) -> Self {
        Self {
            directions: RequestDirections {
                forward: JourneyRequest {
                    date: format_request_date(query.date()),
                    dep_station_code: query.origin().to_string(),
                    arv_station_code: query.destination().to_string(),
                },
                return_journey: None,
            },
        }
    }
}

/// Response envelope. Exactly one of `data` / `error` is expected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainSearchResponse {
    #[serde(default)]
    pub data: Option<TrainSearchData>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// In-band error reported by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainSearchData {
    #[serde(default)]
    pub directions: ResponseDirections,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseDirections {
    #[serde(default)]
    pub forward: Option<DirectionTrains>,
    #[serde(default, rename = "return")]
    pub return_trains: Option<DirectionTrains>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionTrains {
    #[serde(default)]
    pub trains: Vec<RawTrain>,
}

impl TrainSearchData {
    /// Trains for the forward direction, empty when the provider omitted it.
    pub fn forward_trains(&self) -> &[RawTrain] {
        self.directions
            .forward
            .as_ref()
            .map(|d| d.trains.as_slice())
            .unwrap_or(&[])
    }
}

/// A train as the provider returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrain {
    /// Rolling-stock code, e.g. "СКРСТ".
    #[serde(rename = "type", default)]
    pub train_type: String,
    pub number: String,
    /// `DD.MM.YYYY HH:MM`
    pub departure_date: String,
    /// `DD.MM.YYYY HH:MM`
    pub arrival_date: String,
    #[serde(default)]
    pub time_on_way: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub origin_route: RouteInfo,
    #[serde(default)]
    pub sub_route: SubRoute,
    #[serde(default)]
    pub cars: Vec<RawCar>,
    #[serde(default)]
    pub train_id: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Endpoints of the train's whole route.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    #[serde(default)]
    pub dep_station_name: String,
    #[serde(default)]
    pub arv_station_name: String,
}

/// The searched segment of the route.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubRoute {
    #[serde(default)]
    pub dep_station_name: String,
    #[serde(default)]
    pub dep_station_code: String,
    #[serde(default)]
    pub arv_station_name: String,
    #[serde(default)]
    pub arv_station_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCar {
    /// Seat class, e.g. "O'rindiqli", "Kupe".
    #[serde(rename = "type", default)]
    pub car_type: String,
    #[serde(default)]
    pub free_seats: u32,
    #[serde(default)]
    pub tariffs: Vec<RawTariff>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTariff {
    /// Service class, e.g. "1В", "2Е".
    #[serde(default)]
    pub class_service_type: String,
    #[serde(default)]
    pub free_seats: u32,
    /// Price in whole UZS.
    pub tariff: u64,
}

#[cfg(test)]
pub(crate) const SAMPLE_RESPONSE: &str = r#"{
    "data": {
        "directions": {
            "forward": {
                "trains": [
                    {
                        "type": "СКРСТ",
                        "number": "778Ф",
                        "departureDate": "02.09.2025 06:03",
                        "timeOnWay": "02:18",
                        "originRoute": {
                            "depStationName": "Toshkent Markaziy",
                            "arvStationName": "Buxoro"
                        },
                        "arrivalDate": "02.09.2025 08:21",
                        "brand": "Afrosiyob",
                        "cars": [
                            {
                                "type": "O'rindiqli",
                                "freeSeats": 77,
                                "tariffs": [
                                    { "classServiceType": "1В", "freeSeats": 11, "tariff": 545000 },
                                    { "classServiceType": "2Е", "freeSeats": 66, "tariff": 270000 }
                                ]
                            }
                        ],
                        "subRoute": {
                            "depStationName": "TOSHKENT",
                            "depStationCode": "2900000",
                            "arvStationName": "SAMARQAND",
                            "arvStationCode": "2900700"
                        },
                        "trainId": null,
                        "comment": null
                    },
                    {
                        "type": "СК",
                        "number": "710Ф",
                        "departureDate": "02.09.2025 18:30",
                        "timeOnWay": "03:40",
                        "originRoute": {
                            "depStationName": "Toshkent Markaziy",
                            "arvStationName": "Qarshi"
                        },
                        "arrivalDate": "02.09.2025 22:10",
                        "brand": "Sharq",
                        "cars": [
                            {
                                "type": "Kupe",
                                "freeSeats": 0,
                                "tariffs": [
                                    { "classServiceType": "2К", "freeSeats": 0, "tariff": 310000 }
                                ]
                            }
                        ],
                        "subRoute": {
                            "depStationName": "TOSHKENT",
                            "depStationCode": "2900000",
                            "arvStationName": "SAMARQAND",
                            "arvStationCode": "2900700"
                        },
                        "trainId": "abc",
                        "comment": null
                    }
                ]
            }
        }
    },
    "error": null
}"#;
