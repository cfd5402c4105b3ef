//! Process configuration from environment variables.

use crate::domain::Language;
use crate::railway::CSRF_TOKEN_PATH;

pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENVIRONMENT: &str = "ENVIRONMENT";
pub const RAILWAY_XSRF_TOKEN: &str = "RAILWAY_XSRF_TOKEN";
pub const RAILWAY_COOKIES: &str = "RAILWAY_COOKIES";
pub const RAILWAY_LANGUAGE: &str = "RAILWAY_LANGUAGE";
pub const RAILWAY_BASE_URL: &str = "RAILWAY_BASE_URL";
pub const RAILWAY_CSRF_URL: &str = "RAILWAY_CSRF_URL";

const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),
}

/// Static provider credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub token: String,
    pub cookies: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials").finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct Config {
    pub telegram_token: String,
    pub environment: String,
    /// Used verbatim when both token and cookies are set; otherwise
    /// credentials are fetched at startup.
    pub credentials: Option<StaticCredentials>,
    pub language: Language,
    pub base_url: Option<String>,
    /// Set explicitly, or derived from the origin of `base_url` so that
    /// tokens come from the same deployment as searches.
    pub csrf_url: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("credentials", &self.credentials)
            .field("language", &self.language)
            .field("base_url", &self.base_url)
            .field("csrf_url", &self.csrf_url)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let telegram_token =
            get(TELEGRAM_BOT_TOKEN).ok_or(ConfigError::MissingVar(TELEGRAM_BOT_TOKEN))?;

        let credentials = match (get(RAILWAY_XSRF_TOKEN), get(RAILWAY_COOKIES)) {
            (Some(token), Some(cookies)) => Some(StaticCredentials { token, cookies }),
            _ => None,
        };

        let language = match get(RAILWAY_LANGUAGE) {
            Some(code) => code.parse::<Language>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring {RAILWAY_LANGUAGE}");
                Language::default()
            }),
            None => Language::default(),
        };

        let base_url = get(RAILWAY_BASE_URL);
        let csrf_url = get(RAILWAY_CSRF_URL).or_else(|| {
            let base_url = base_url.as_deref()?;
            let derived = csrf_url_for(base_url);
            if derived.is_none() {
                tracing::warn!(base_url, "cannot derive {RAILWAY_CSRF_URL} from {RAILWAY_BASE_URL}");
            }
            derived
        });

        Ok(Self {
            telegram_token,
            environment: get(ENVIRONMENT).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            credentials,
            language,
            base_url,
            csrf_url,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

/// CSRF endpoint on the same origin as `base_url`.
fn csrf_url_for(base_url: &str) -> Option<String> {
    let origin = reqwest::Url::parse(base_url).ok()?.origin();
    origin
        .is_tuple()
        .then(|| format!("{}{CSRF_TOKEN_PATH}", origin.ascii_serialization()))
}
