//! Error types shared by the explorer client, price client and aggregator

use thiserror::Error;

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// The explorer does not know the requested hotspot
    #[error("Invalid wallet id: {0}")]
    InvalidWallet(String),

    #[error("{resource} request failed with status {status}")]
    Http {
        resource: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Failed to reach {resource}: {source}")]
    Transport {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// A required field was missing or had the wrong shape
    #[error("Malformed {resource} response: {reason}")]
    MalformedResponse {
        resource: &'static str,
        reason: String,
    },

    #[error("No {currency} price quoted for {asset}")]
    Price { asset: String, currency: String },

    #[error("Invalid API base URL: {0}")]
    BaseUrl(String),
}

impl TrackerError {
    pub(crate) fn malformed(resource: &'static str, reason: impl ToString) -> Self {
        TrackerError::MalformedResponse {
            resource,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn transport(resource: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| TrackerError::Transport { resource, source }
    }

    pub fn is_invalid_wallet(&self) -> bool {
        matches!(self, TrackerError::InvalidWallet(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_wallet_message() {
        let err = TrackerError::InvalidWallet("11abc".to_string());
        assert!(err.is_invalid_wallet());
        assert_eq!(err.to_string(), "Invalid wallet id: 11abc");
    }

    #[test]
    fn test_malformed_message_names_resource() {
        let err = TrackerError::malformed("witnesses", "missing field `data`");
        assert!(!err.is_invalid_wallet());
        assert_eq!(
            err.to_string(),
            "Malformed witnesses response: missing field `data`"
        );
    }
}
