use std::time::Duration;

use async_trait::async_trait;
use discovery::{config::Endpoints, services::RoutingService};
use model::route::{RawRoute, RouteRequest, TravelMode};

use crate::{response::RouteResponse, ApiError};

pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
}

/// OSRM profile name of a travel mode.
pub fn profile(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Driving => "driving",
        TravelMode::Walking => "walking",
        TravelMode::Cycling => "cycling",
    }
}

impl OsrmClient {
    pub fn new(endpoints: &Endpoints, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(&endpoints.user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: endpoints.osrm_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn route_url(&self, request: &RouteRequest) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url,
            profile(request.mode),
            request.start.longitude(),
            request.start.latitude(),
            request.end.longitude(),
            request.end.latitude()
        )
    }

    pub async fn fetch_route(&self, request: &RouteRequest) -> Result<RouteResponse, ApiError> {
        let url = self.route_url(request);
        log::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(serde_json::from_str(&response.text().await?)?),
            // OSRM reports routing failures with 400 and a JSON body
            reqwest::StatusCode::BAD_REQUEST => {
                let text = response.text().await?;
                serde_json::from_str(&text).map_err(|_| ApiError::InvalidResponse {
                    status_code: reqwest::StatusCode::BAD_REQUEST,
                    url,
                    response: Some(text),
                })
            }
            other => Err(ApiError::InvalidResponse {
                status_code: other,
                url,
                response: response.text().await.ok(),
            }),
        }
    }
}

#[async_trait]
impl RoutingService for OsrmClient {
    async fn route(&self, request: RouteRequest) -> discovery::Result<RawRoute> {
        Ok(self.fetch_route(&request).await?.into_raw_route()?)
    }
}
