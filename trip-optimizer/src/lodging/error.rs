//! Hotel client error types.

use std::fmt;

/// Errors from the hotel search client.
#[derive(Debug)]
pub enum LodgingError {
    /// The HTTP round trip itself failed (connect, timeout, TLS)
    Http(reqwest::Error),

    /// The response body was not the JSON shape expected
    Json {
        message: String,
        body: Option<String>,
    },

    /// SerpApi answered with a non-success status
    ApiError { status: u16, message: String },

    /// The search was rejected before any request was made
    InvalidRequest(String),

    /// Too many requests in the current window
    RateLimited,

    /// The API key was missing or rejected
    Unauthorized,
}

impl fmt::Display for LodgingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LodgingError::Http(e) => write!(f, "HTTP error: {e}"),
            LodgingError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            LodgingError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            LodgingError::InvalidRequest(msg) => write!(f, "invalid search request: {msg}"),
            LodgingError::RateLimited => write!(f, "rate limited by SerpApi"),
            LodgingError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
        }
    }
}

impl std::error::Error for LodgingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LodgingError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LodgingError {
    fn from(err: reqwest::Error) -> Self {
        LodgingError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LodgingError::InvalidRequest("stay must cover at least one night".into());
        assert_eq!(
            err.to_string(),
            "invalid search request: stay must cover at least one night"
        );

        let err = LodgingError::ApiError {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");
    }
}
