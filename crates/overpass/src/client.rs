use std::time::Duration;

use async_trait::async_trait;
use discovery::{config::Endpoints, services::FeatureService};
use model::{feature::Feature, query::SpatialQuery};

use crate::{query::QueryBuilder, response::OverpassResponse, ApiError};

pub struct OverpassClient {
    http: reqwest::Client,
    url: String,
    builder: QueryBuilder,
}

impl OverpassClient {
    /// `timeout` bounds the interpreter run as well as the HTTP request.
    pub fn new(endpoints: &Endpoints, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(&endpoints.user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            url: endpoints.overpass_url.clone(),
            builder: QueryBuilder::new(timeout.as_secs().max(1)),
        })
    }

    /// Runs Overpass QL and returns the raw response.
    pub async fn interpret(&self, query: String) -> Result<OverpassResponse, ApiError> {
        log::debug!("POST {} {}", self.url, query);
        let response = self.http.post(&self.url).body(query).send().await?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(serde_json::from_str(&response.text().await?)?),
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimitReached),
            other => Err(ApiError::InvalidResponse {
                status_code: other,
                url: self.url.clone(),
                response: response.text().await.ok(),
            }),
        }
    }

    pub async fn features(&self, query: &SpatialQuery) -> Result<Vec<Feature>, ApiError> {
        self.interpret(self.builder.build(query))
            .await?
            .into_features()
    }
}

#[async_trait]
impl FeatureService for OverpassClient {
    async fn query(&self, query: &SpatialQuery) -> discovery::Result<Vec<Feature>> {
        let features = self.features(query).await?;
        log::info!(
            "overpass returned {} features for {}",
            features.len(),
            query.categories().join(", ")
        );
        Ok(features)
    }
}
