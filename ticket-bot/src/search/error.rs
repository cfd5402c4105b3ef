//! Search orchestration errors.

use crate::railway::{ConversionError, TicketError};

/// Coarse failure category shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The provider would not accept our credentials.
    Authentication,
    /// The provider was unreachable or overloaded; trying later may help.
    Transient,
    /// Anything else.
    Unexpected,
}

/// Errors from a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A failure that retrying cannot fix, surfaced as is
    #[error(transparent)]
    Ticket(TicketError),

    /// Every attempt failed; carries the last failure
    #[error("failed to search trains after {attempts} attempts: {source}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        source: TicketError,
    },

    /// The provider answered with trains we could not read
    #[error("unreadable provider response: {0}")]
    Conversion(#[from] ConversionError),

    /// The search was cancelled by shutdown
    #[error("search cancelled")]
    Cancelled,

    /// The search deadline passed
    #[error("search timed out")]
    TimedOut,
}

impl SearchError {
    /// Classify for user-facing messages.
    pub fn kind(&self) -> FailureKind {
        match self {
            SearchError::Ticket(e) if e.is_auth_failure() => FailureKind::Authentication,
            SearchError::RetryExhausted { source, .. } if source.is_auth_failure() => {
                FailureKind::Authentication
            }
            SearchError::RetryExhausted {
                source: TicketError::Http(_) | TicketError::Rejected { .. },
                ..
            }
            | SearchError::TimedOut => FailureKind::Transient,
            _ => FailureKind::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::railway::CredentialError;

    fn rejected(status: u16) -> TicketError {
        TicketError::Rejected {
            status,
            body: "CSRF".into(),
        }
    }

    #[test]
    fn classifies() {
        assert_eq!(
            SearchError::Ticket(rejected(403)).kind(),
            FailureKind::Authentication
        );
        assert_eq!(
            SearchError::Ticket(TicketError::Credential(CredentialError::TokenNotFound)).kind(),
            FailureKind::Authentication
        );
        assert_eq!(
            SearchError::RetryExhausted {
                attempts: 3,
                source: rejected(503)
            }
            .kind(),
            FailureKind::Transient
        );
        assert_eq!(SearchError::TimedOut.kind(), FailureKind::Transient);
        assert_eq!(
            SearchError::RetryExhausted {
                attempts: 3,
                source: TicketError::EmptyResponse
            }
            .kind(),
            FailureKind::Unexpected
        );
        assert_eq!(SearchError::Cancelled.kind(), FailureKind::Unexpected);
    }

    #[test]
    fn exhausted_message_names_attempts() {
        let err = SearchError::RetryExhausted {
            attempts: 3,
            source: rejected(500),
        };
        assert_eq!(
            err.to_string(),
            "failed to search trains after 3 attempts: provider returned 500: CSRF"
        );
    }
}
