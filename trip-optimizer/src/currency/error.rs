//! Rate client error types.

use std::fmt;

/// Errors from the exchange rate client.
#[derive(Debug)]
pub enum RateError {
    /// The HTTP round trip itself failed (connect, timeout, TLS)
    Http(reqwest::Error),

    /// The response body was not the JSON shape expected
    Json {
        message: String,
        body: Option<String>,
    },

    /// SerpApi answered with a non-success status
    ApiError { status: u16, message: String },

    /// Response parsed but carried no usable rate
    MissingRate,

    /// Too many requests in the current window
    RateLimited,

    /// The API key was missing or rejected
    Unauthorized,
}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateError::Http(e) => write!(f, "HTTP error: {e}"),
            RateError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            RateError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            RateError::MissingRate => {
                write!(f, "response carried no usable exchange rate")
            }
            RateError::RateLimited => write!(f, "rate limited by SerpApi"),
            RateError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
        }
    }
}

impl std::error::Error for RateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RateError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RateError {
    fn from(err: reqwest::Error) -> Self {
        RateError::Http(err)
    }
}
