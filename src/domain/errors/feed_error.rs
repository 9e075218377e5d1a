//! Photo feed error types.

use thiserror::Error;

/// Feed fetch error variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FeedError {
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("network error: {message}")]
    Transport { message: String },

    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl FeedError {
    /// Creates an invalid-request error.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an HTTP status error.
    #[must_use]
    pub const fn http(status: u16) -> Self {
        Self::Http { status }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code, if this is a status error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Http { status } => *status == 429 || *status >= 500,
            Self::InvalidRequest { .. } | Self::Decode { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_display() {
        assert_eq!(
            FeedError::http(403).to_string(),
            "server returned HTTP 403"
        );
        assert_eq!(
            FeedError::transport("request timed out").to_string(),
            "network error: request timed out"
        );
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(FeedError::http(404).status(), Some(404));
        assert_eq!(FeedError::decode("bad json").status(), None);
    }

    #[test_case(FeedError::transport("reset"), true; "transport is recoverable")]
    #[test_case(FeedError::http(503), true; "server errors are recoverable")]
    #[test_case(FeedError::http(429), true; "rate limit is recoverable")]
    #[test_case(FeedError::http(403), false; "client errors are not")]
    #[test_case(FeedError::decode("bad json"), false; "decode is not")]
    #[test_case(FeedError::invalid_request("bad url"), false; "invalid request is not")]
    fn test_recoverability(error: FeedError, expected: bool) {
        assert_eq!(error.is_recoverable(), expected);
    }
}
