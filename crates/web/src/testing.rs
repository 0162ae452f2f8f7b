use std::{io, sync::Arc};

use async_trait::async_trait;
use discovery::{
    client::{Client, Services},
    config::DiscoveryConfig,
    services::{FeatureService, GeocodingService, MemorySavedLocations, RoutingService},
    DiscoveryError, Result,
};
use model::{
    feature::Feature,
    location::Suggestion,
    query::SpatialQuery,
    route::{RawRoute, RouteRequest},
};

/// Answers every external call with a connection failure.
pub(crate) struct Offline;

fn offline() -> DiscoveryError {
    DiscoveryError::failure(io::Error::new(io::ErrorKind::ConnectionRefused, "offline"))
}

#[async_trait]
impl FeatureService for Offline {
    async fn query(&self, _query: &SpatialQuery) -> Result<Vec<Feature>> {
        Err(offline())
    }
}

#[async_trait]
impl RoutingService for Offline {
    async fn route(&self, _request: RouteRequest) -> Result<RawRoute> {
        Err(offline())
    }
}

#[async_trait]
impl GeocodingService for Offline {
    async fn suggest(&self, _query: &str) -> Result<Vec<Suggestion>> {
        Err(offline())
    }
}

/// No external services, saved locations in memory.
pub(crate) fn memory_state() -> crate::WebState {
    let offline = Arc::new(Offline);
    crate::WebState {
        discovery_client: Client::new(
            Services {
                features: offline.clone(),
                routing: offline.clone(),
                geocoding: offline,
                saved: Arc::new(MemorySavedLocations::default()),
            },
            DiscoveryConfig::default(),
        ),
    }
}
