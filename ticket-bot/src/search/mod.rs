//! Search orchestration.
//!
//! Wraps the ticket client with an outer retry policy (distinct from the
//! client's single CSRF retry), converts provider trains into offers and
//! matches them against alert criteria.

mod alert;
mod config;
mod error;
mod service;

pub use alert::{AlertCriteria, matches_alert};
pub use config::RetryConfig;
pub use error::{FailureKind, SearchError};
pub use service::{SearchService, TrainProvider};
