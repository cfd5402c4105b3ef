//! Search orchestration over the ticket provider.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{Language, SearchQuery, TrainOffer};
use crate::railway::{TicketClient, TicketError, TrainSearchData, convert_trains};
use crate::stations::StationDirectory;

use super::alert::{AlertCriteria, matches_alert};
use super::config::RetryConfig;
use super::error::SearchError;

/// Source of raw train lists.
///
/// This abstraction allows testing the orchestrator with mock data.
pub trait TrainProvider: Send + Sync {
    /// Run one search against the provider.
    fn search_trains(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<TrainSearchData, TicketError>> + Send;

    /// Change the language of names in future results.
    fn set_language(&self, language: Language) -> impl Future<Output = ()> + Send;
}

impl TrainProvider for TicketClient {
    async fn search_trains(&self, query: &SearchQuery) -> Result<TrainSearchData, TicketError> {
        self.search(query).await
    }

    async fn set_language(&self, language: Language) {
        TicketClient::set_language(self, language).await
    }
}

/// Searches with bounded retries and normalises results.
pub struct SearchService<P> {
    provider: P,
    directory: Arc<StationDirectory>,
    config: RetryConfig,
}

impl<P: TrainProvider> SearchService<P> {
    pub fn new(provider: P, directory: Arc<StationDirectory>, config: RetryConfig) -> Self {
        Self {
            provider,
            directory,
            config,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    /// Build a query from user station tokens, resolving them to codes.
    pub fn query(&self, origin: &str, destination: &str, date: NaiveDate) -> SearchQuery {
        SearchQuery::new(
            self.directory.resolve(origin),
            self.directory.resolve(destination),
            date,
        )
    }

    /// Every train on the route, sold out or not.
    pub async fn find_all(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<TrainOffer>, SearchError> {
        let data = self.search_with_retry(query, cancel).await?;
        let offers = convert_trains(data.forward_trains())?;
        info!(
            origin = query.origin(),
            destination = query.destination(),
            date = %query.date(),
            trains = offers.len(),
            "search complete"
        );
        Ok(offers)
    }

    /// Trains with at least one free seat.
    pub async fn find_available(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<TrainOffer>, SearchError> {
        let mut offers = self.find_all(query, cancel).await?;
        offers.retain(TrainOffer::has_available_seats);
        Ok(offers)
    }

    /// Available trains matching an alert.
    pub async fn check_alert(
        &self,
        query: &SearchQuery,
        criteria: &AlertCriteria,
        cancel: &CancellationToken,
    ) -> Result<Vec<TrainOffer>, SearchError> {
        let mut offers = self.find_available(query, cancel).await?;
        offers.retain(|offer| matches_alert(offer, criteria));
        Ok(offers)
    }

    pub async fn set_language(&self, language: Language) {
        self.provider.set_language(language).await;
    }

    /// Call the provider up to `max_attempts` times with linear backoff.
    ///
    /// Authentication failures are returned at once: the client has already
    /// refreshed credentials and retried. Cancellation and the deadline
    /// interrupt both attempts and backoff waits.
    async fn search_with_retry(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<TrainSearchData, SearchError> {
        let deadline = Instant::now() + self.config.deadline();
        let attempts = self.config.attempts();
        let mut attempt = 1;

        loop {
            debug!(attempt, "searching provider");
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SearchError::Cancelled),
                _ = sleep_until(deadline) => return Err(SearchError::TimedOut),
                result = self.provider.search_trains(query) => result,
            };

            let error = match outcome {
                Ok(data) => return Ok(data),
                Err(e) => e,
            };

            if error.is_auth_failure() {
                warn!(error = %error, "provider refused credentials");
                return Err(SearchError::Ticket(error));
            }

            if attempt >= attempts {
                warn!(attempts, error = %error, "search retries exhausted");
                return Err(SearchError::RetryExhausted {
                    attempts: attempt,
                    source: error,
                });
            }

            let backoff = self.config.backoff(attempt);
            warn!(attempt, ?backoff, error = %error, "search attempt failed, retrying");
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SearchError::Cancelled),
                _ = sleep_until(deadline) => return Err(SearchError::TimedOut),
                _ = sleep(backoff) => {}
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
