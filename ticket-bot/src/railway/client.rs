//! Ticket provider HTTP client.
//!
//! Wraps the provider's train-list endpoint. The provider guards it with a
//! session-bound anti-forgery token that expires; when a search is refused
//! with a CSRF complaint the client fetches a fresh token and retries that
//! search exactly once.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, COOKIE, HeaderMap, HeaderValue, SET_COOKIE, USER_AGENT,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::{Language, SearchQuery};

use super::credentials::{Credentials, extract_xsrf_token, token_preview};
use super::error::{CredentialError, TicketError};
use super::types::{TrainSearchData, TrainSearchRequest, TrainSearchResponse};

/// Default base URL for search endpoints.
pub const DEFAULT_BASE_URL: &str = "https://eticket.railway.uz/api/v3";

/// Default URL of the CSRF token endpoint.
pub const DEFAULT_CSRF_URL: &str = "https://eticket.railway.uz/api/v1/csrf-token";

/// Path of the CSRF token endpoint relative to the provider's origin.
pub const CSRF_TOKEN_PATH: &str = "/api/v1/csrf-token";

const TRAINS_LIST_PATH: &str = "/handbook/trains/list";

/// Header carrying the anti-forgery token.
const XSRF_HEADER: &str = "X-XSRF-TOKEN";

/// The provider rejects stale tokens with a 403 whose body mentions this.
const CSRF_MARKER: &str = "CSRF";

/// The provider refuses requests that do not look like a browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36";

/// Longest response body snippet kept in JSON errors.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the ticket client.
#[derive(Debug, Clone)]
pub struct TicketClientConfig {
    /// Base URL for search endpoints
    pub base_url: String,
    /// Full URL of the CSRF token endpoint
    pub csrf_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Initial `Accept-Language`
    pub language: Language,
    /// Honour `HTTP_PROXY`-style environment variables
    pub use_system_proxy: bool,
}

impl Default for TicketClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            csrf_url: DEFAULT_CSRF_URL.to_string(),
            timeout_secs: 30,
            language: Language::default(),
            use_system_proxy: true,
        }
    }
}

impl TicketClientConfig {
    /// Create a config pointing at the production provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom CSRF endpoint URL (for testing).
    pub fn with_csrf_url(mut self, url: impl Into<String>) -> Self {
        self.csrf_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the initial response language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Connect directly, ignoring proxy environment variables.
    pub fn without_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }
}

/// Credentials plus a counter bumped on every replacement.
///
/// A search remembers the generation it was sent with; if a refresh has
/// happened since, its 403 was caused by the old token and no second
/// refresh is needed.
#[derive(Debug, Default)]
struct CredentialSlot {
    credentials: Option<Credentials>,
    generation: u64,
}

impl CredentialSlot {
    fn replace(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
        self.generation += 1;
    }
}

#[derive(Debug)]
struct Shared {
    credentials: RwLock<CredentialSlot>,
    language: RwLock<Language>,
}

/// Ticket provider client.
///
/// Cheap to clone; clones share credentials and language.
#[derive(Debug, Clone)]
pub struct TicketClient {
    http: reqwest::Client,
    search_url: String,
    csrf_url: String,
    shared: Arc<Shared>,
}

impl TicketClient {
    /// Create a new client with no credentials.
    pub fn new(config: TicketClientConfig) -> Result<Self, TicketError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            search_url: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                TRAINS_LIST_PATH
            ),
            csrf_url: config.csrf_url,
            shared: Arc::new(Shared {
                credentials: RwLock::new(CredentialSlot::default()),
                language: RwLock::new(config.language),
            }),
        })
    }

    /// Install caller-supplied credentials verbatim.
    pub async fn set_credentials(
        &self,
        token: impl Into<String>,
        cookies: impl Into<String>,
    ) -> Result<(), TicketError> {
        let credentials = Credentials::new(token, cookies);
        HeaderValue::from_str(credentials.token())
            .map_err(|_| TicketError::InvalidHeader(XSRF_HEADER))?;
        HeaderValue::from_str(credentials.cookies())
            .map_err(|_| TicketError::InvalidHeader("Cookie"))?;

        debug!(token = %token_preview(credentials.token()), "using configured credentials");
        self.shared.credentials.write().await.replace(credentials);
        Ok(())
    }

    /// Install `configured` credentials, or fetch a fresh token when there
    /// are none or they cannot be sent as headers.
    pub async fn establish_credentials(
        &self,
        configured: Option<(&str, &str)>,
    ) -> Result<(), CredentialError> {
        if let Some((token, cookies)) = configured {
            match self.set_credentials(token, cookies).await {
                Ok(()) => {
                    info!("using configured provider credentials");
                    return Ok(());
                }
                Err(e) => warn!(error = %e, "configured provider credentials are unusable"),
            }
        }
        self.initialize_credentials().await
    }

    /// Current credentials, if any have been set.
    pub async fn credentials(&self) -> Option<Credentials> {
        self.shared.credentials.read().await.credentials.clone()
    }

    /// Change the `Accept-Language` sent with every request.
    pub async fn set_language(&self, language: Language) {
        *self.shared.language.write().await = language;
        debug!(%language, "provider language changed");
    }

    /// Language currently sent to the provider.
    pub async fn language(&self) -> Language {
        *self.shared.language.read().await
    }

    /// Obtain a fresh token and replace credentials with a minimal cookie
    /// string holding just that token.
    pub async fn initialize_credentials(&self) -> Result<(), CredentialError> {
        info!("initializing provider credentials");
        let mut slot = self.shared.credentials.write().await;
        let cookies = slot.credentials.as_ref().map(|c| c.cookies().to_string());
        let token = self.fetch_csrf_token(cookies.as_deref()).await?;

        info!(token = %token_preview(&token), "provider credentials initialized");
        slot.replace(Credentials::from_token(token));
        Ok(())
    }

    /// Ask the provider for a new anti-forgery token.
    ///
    /// Sends the current cookie string (when there is one) so the provider
    /// can tie the token to the existing session.
    pub async fn fetch_csrf_token(&self, cookies: Option<&str>) -> Result<String, CredentialError> {
        let language = self.language().await;
        let mut request = self
            .http
            .get(&self.csrf_url)
            .header(ACCEPT_LANGUAGE, language.code());
        if let Some(cookies) = cookies {
            request = request.header(COOKIE, cookies);
        }

        let response = request.send().await.map_err(CredentialError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(extract_xsrf_token)
            .map(str::to_string)
            .ok_or(CredentialError::TokenNotFound)
    }

    /// Search for trains.
    ///
    /// A 403 mentioning CSRF triggers one credential refresh and one retry;
    /// whatever the retry returns is final.
    pub async fn search(&self, query: &SearchQuery) -> Result<TrainSearchData, TicketError> {
        let request = TrainSearchRequest::from(query);

        let (generation, response) = self.send_search(&request).await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::FORBIDDEN && body.contains(CSRF_MARKER) {
            warn!(
                origin = query.origin(),
                destination = query.destination(),
                "provider rejected token, refreshing"
            );
            self.refresh_after_rejection(generation).await?;

            let (_, retry) = self.send_search(&request).await?;
            let status = retry.status();
            let body = retry.text().await?;
            return decode_search_body(status, &body);
        }

        decode_search_body(status, &body)
    }

    /// Replace the token after a CSRF rejection, unless someone else
    /// already did since `seen_generation` was read.
    async fn refresh_after_rejection(&self, seen_generation: u64) -> Result<(), CredentialError> {
        let mut slot = self.shared.credentials.write().await;
        if slot.generation != seen_generation {
            debug!("credentials already refreshed by a concurrent search");
            return Ok(());
        }

        let cookies = slot.credentials.as_ref().map(|c| c.cookies().to_string());
        let token = self.fetch_csrf_token(cookies.as_deref()).await?;
        let refreshed = match &slot.credentials {
            Some(current) => current.with_token(&token),
            None => Credentials::from_token(token.as_str()),
        };

        info!(token = %token_preview(&token), "provider token refreshed");
        slot.replace(refreshed);
        Ok(())
    }

    async fn send_search(
        &self,
        request: &TrainSearchRequest,
    ) -> Result<(u64, reqwest::Response), TicketError> {
        let language = self.language().await;
        let (generation, credentials) = {
            let slot = self.shared.credentials.read().await;
            (slot.generation, slot.credentials.clone())
        };

        let mut builder = self
            .http
            .post(&self.search_url)
            .header(ACCEPT_LANGUAGE, language.code())
            .json(request);
        if let Some(credentials) = &credentials {
            builder = builder
                .header(XSRF_HEADER, credentials.token())
                .header(COOKIE, credentials.cookies());
        }

        let response = builder.send().await?;
        debug!(status = %response.status(), "train search response");
        Ok((generation, response))
    }
}

/// Interpret a train-list response.
///
/// Non-2xx is `Rejected`; an in-band `error` wins over `data`; a body with
/// neither is `EmptyResponse`.
fn decode_search_body(status: StatusCode, body: &str) -> Result<TrainSearchData, TicketError> {
    if !status.is_success() {
        return Err(TicketError::Rejected {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let response: TrainSearchResponse =
        serde_json::from_str(body).map_err(|e| TicketError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
        })?;

    if let Some(error) = response.error {
        return Err(TicketError::Api {
            code: error.code,
            message: error.message,
        });
    }

    response.data.ok_or(TicketError::EmptyResponse)
}
