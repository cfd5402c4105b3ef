//! Ticket client error types.

use reqwest::StatusCode;

/// Failure to obtain a CSRF token from the provider.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The token endpoint could not be reached
    #[error("CSRF endpoint unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The token endpoint answered with a non-2xx status
    #[error("CSRF endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// No `Set-Cookie` header carried an `XSRF-TOKEN`
    #[error("XSRF-TOKEN not found in response")]
    TokenNotFound,
}

/// Errors from the ticket provider client.
#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials could not be refreshed
    #[error("credential refresh failed: {0}")]
    Credential(#[from] CredentialError),

    /// Provider answered with a non-2xx status
    #[error("provider returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Provider reported an error inside a successful response
    #[error("provider error {code}: {message}")]
    Api { code: String, message: String },

    /// Response carried neither `data` nor `error`
    #[error("empty response")]
    EmptyResponse,

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// A credential value cannot be sent as an HTTP header
    #[error("invalid {0} header value")]
    InvalidHeader(&'static str),
}

impl TicketError {
    /// Whether the provider refused us for authentication reasons.
    ///
    /// Retrying such a failure is pointless: the client already refreshed
    /// credentials once before giving up.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            TicketError::Credential(_) => true,
            TicketError::Rejected { status, .. } => *status == StatusCode::FORBIDDEN.as_u16(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TicketError::Rejected {
            status: 500,
            body: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "provider returned 500: Internal Server Error");

        let err = TicketError::Api {
            code: "E42".into(),
            message: "station not found".into(),
        };
        assert_eq!(err.to_string(), "provider error E42: station not found");

        let err = TicketError::Credential(CredentialError::TokenNotFound);
        assert!(err.to_string().contains("XSRF-TOKEN not found"));
    }

    #[test]
    fn auth_failures() {
        assert!(TicketError::Credential(CredentialError::TokenNotFound).is_auth_failure());
        assert!(
            TicketError::Rejected {
                status: 403,
                body: "Invalid CSRF Token".into()
            }
            .is_auth_failure()
        );
        assert!(
            !TicketError::Rejected {
                status: 502,
                body: String::new()
            }
            .is_auth_failure()
        );
        assert!(!TicketError::EmptyResponse.is_auth_failure());
    }
}
