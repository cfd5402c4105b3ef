//! Ticket provider client.
//!
//! HTTP client for the national railway's e-ticket API. The API is
//! undocumented; everything here is shaped after what the provider's own
//! web front-end sends and receives.
//!
//! Key characteristics of the provider:
//! - Searches are POSTs guarded by an `XSRF-TOKEN` that must appear both
//!   as the `X-XSRF-TOKEN` header and inside the `Cookie` header
//! - Tokens are issued via `Set-Cookie` from a separate endpoint and expire
//!   without notice; expiry shows up as a 403 mentioning CSRF
//! - Errors may arrive in-band with a 200 status
//! - Date-times are `DD.MM.YYYY HH:MM` local time

mod client;
mod convert;
mod credentials;
mod error;
mod types;

pub use client::{
    CSRF_TOKEN_PATH, DEFAULT_BASE_URL, DEFAULT_CSRF_URL, TicketClient, TicketClientConfig,
};
pub use convert::{ConversionError, convert_train, convert_trains};
pub use credentials::{Credentials, extract_xsrf_token, patch_cookie_token, token_preview};
pub use error::{CredentialError, TicketError};
#[cfg(test)]
pub(crate) use types::SAMPLE_RESPONSE;
pub use types::{
    ApiErrorBody, DirectionTrains, JourneyRequest, RawCar, RawTariff, RawTrain, RequestDirections,
    ResponseDirections, RouteInfo, SubRoute, TrainSearchData, TrainSearchRequest,
    TrainSearchResponse,
};
