use std::{error, fmt, sync::Arc};

use discovery::DiscoveryError;

pub mod client;
pub mod query;
pub mod response;

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    /// The interpreter rejected the query because of too many requests.
    RateLimitReached,
    Other(String),
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => write!(f, "Invalid Response ({}) {}: {}", status_code, url, text),
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
            ApiError::RateLimitReached => write!(f, "Overpass rate limit reached."),
            ApiError::Other(e) => write!(f, "{e}"),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(e))
    }
}

impl From<ApiError> for DiscoveryError {
    fn from(e: ApiError) -> Self {
        DiscoveryError::failure(e)
    }
}
