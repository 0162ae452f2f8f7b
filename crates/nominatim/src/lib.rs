use std::{error, fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use discovery::{config::Endpoints, services::GeocodingService, DiscoveryError};
use model::{location::Suggestion, Coordinate};
use serde::Deserialize;

/// Number of suggestions requested per query.
pub const SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
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

/// One search hit. Nominatim sends coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub display_name: String,
    #[serde(deserialize_with = "utility::serde::number_or_string::deserialize")]
    pub lat: f64,
    #[serde(deserialize_with = "utility::serde::number_or_string::deserialize")]
    pub lon: f64,
}

impl Place {
    pub fn into_suggestion(self) -> Option<Suggestion> {
        Some(Suggestion {
            coordinate: Coordinate::new(self.lat, self.lon)?,
            display_name: self.display_name,
        })
    }
}

pub struct NominatimClient {
    http: reqwest::Client,
    search_url: String,
}

impl NominatimClient {
    /// Nominatim's usage policy requires an identifying User-Agent, taken
    /// from `endpoints`.
    pub fn new(endpoints: &Endpoints, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(&endpoints.user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            search_url: format!("{}/search", endpoints.nominatim_url.trim_end_matches('/')),
        })
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Place>, ApiError> {
        let limit = SUGGESTION_LIMIT.to_string();
        log::debug!("GET {}?q={}", self.search_url, query);
        let response = self
            .http
            .get(&self.search_url)
            .query(&[("format", "json"), ("q", query), ("limit", limit.as_str())])
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(serde_json::from_str(&response.text().await?)?),
            other => Err(ApiError::InvalidResponse {
                status_code: other,
                url: self.search_url.clone(),
                response: response.text().await.ok(),
            }),
        }
    }
}

#[async_trait]
impl GeocodingService for NominatimClient {
    async fn suggest(&self, query: &str) -> discovery::Result<Vec<Suggestion>> {
        let places = self.search(query).await?;
        let suggestions = into_suggestions(places);
        log::info!("nominatim suggested {} places for '{}'", suggestions.len(), query);
        Ok(suggestions)
    }
}

/// Places with a usable position, in the geocoder's order.
fn into_suggestions(places: Vec<Place>) -> Vec<Suggestion> {
    let total = places.len();
    let suggestions = places
        .into_iter()
        .filter_map(Place::into_suggestion)
        .collect::<Vec<_>>();
    if suggestions.len() < total {
        log::warn!(
            "dropped {} of {} nominatim places without a valid position",
            total - suggestions.len(),
            total
        );
    }
    suggestions
}
