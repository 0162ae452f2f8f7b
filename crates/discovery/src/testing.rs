//! In-memory service fakes shared by the unit tests.

use std::{
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use model::{
    feature::{Feature, FeatureKind},
    location::{SavedLocation, Suggestion},
    query::SpatialQuery,
    route::{RawCoordinate, RawRoute, RouteRequest},
    Coordinate,
};
use utility::id::Id;

use crate::{
    client::{Client, Services},
    config::DiscoveryConfig,
    services::{
        FeatureService, GeocodingService, MemorySavedLocations, RoutingService,
        SavedLocationRepo,
    },
    DiscoveryError, Result,
};

pub fn c(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude).unwrap()
}

pub fn node(id: i64, latitude: f64, longitude: f64, amenity: &str) -> Feature {
    Feature::new(id, FeatureKind::Node, c(latitude, longitude)).with_tag("amenity", amenity)
}

#[derive(Default)]
pub struct FakeFeatures {
    pub features: Vec<Feature>,
    pub fail: bool,
    pub delay: Option<Duration>,
    /// Extra delay for queries of more than one category.
    pub batch_delay: Option<Duration>,
    /// Only return features tagged with one of the queried categories.
    pub match_categories: bool,
    /// Fail queries of exactly one category.
    pub fail_single: bool,
    pub queries: Mutex<Vec<SpatialQuery>>,
}

impl FakeFeatures {
    pub fn with(features: Vec<Feature>) -> Self {
        Self {
            features,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<SpatialQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeatureService for FakeFeatures {
    async fn query(&self, query: &SpatialQuery) -> Result<Vec<Feature>> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let batch = query.categories().len() > 1;
        if let (true, Some(delay)) = (batch, self.batch_delay) {
            tokio::time::sleep(delay).await;
        }
        if self.fail || (self.fail_single && !batch) {
            return Err(DiscoveryError::failure(io::Error::other("feature service down")));
        }
        if !self.match_categories {
            return Ok(self.features.clone());
        }
        Ok(self
            .features
            .iter()
            .filter(|feature| {
                feature
                    .tags
                    .values()
                    .any(|value| query.categories().contains(value))
            })
            .cloned()
            .collect())
    }
}

pub struct FakeRouting {
    pub coordinates: Vec<RawCoordinate>,
    pub requests: Mutex<Vec<RouteRequest>>,
}

impl FakeRouting {
    pub fn along(points: &[(f64, f64)]) -> Self {
        Self {
            coordinates: points
                .iter()
                .map(|&(lat, lng)| RawCoordinate::Record { lat, lng })
                .collect(),
            requests: Mutex::default(),
        }
    }
}

#[async_trait]
impl RoutingService for FakeRouting {
    async fn route(&self, request: RouteRequest) -> Result<RawRoute> {
        self.requests.lock().unwrap().push(request);
        Ok(RawRoute {
            coordinates: self.coordinates.clone(),
            distance_meters: 111_195.0,
            duration_seconds: 4_200.0,
        })
    }
}

#[derive(Default)]
pub struct FakeGeocoding {
    pub calls: AtomicUsize,
}

impl FakeGeocoding {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingService for FakeGeocoding {
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Suggestion {
            display_name: format!("{}, Schleswig-Holstein", query),
            coordinate: c(54.3233, 10.1228),
        }])
    }
}

pub struct BrokenSavedLocations;

#[async_trait]
impl SavedLocationRepo for BrokenSavedLocations {
    async fn list(&self) -> Result<Vec<SavedLocation>> {
        Err(DiscoveryError::failure(io::Error::other("database offline")))
    }

    async fn create(&self, _: &str, _: Coordinate) -> Result<SavedLocation> {
        Err(DiscoveryError::failure(io::Error::other("database offline")))
    }

    async fn delete(&self, _: Id<SavedLocation>) -> Result<()> {
        Err(DiscoveryError::failure(io::Error::other("database offline")))
    }
}

pub struct Fakes {
    pub features: Arc<FakeFeatures>,
    pub routing: Arc<FakeRouting>,
    pub geocoding: Arc<FakeGeocoding>,
    pub saved: Arc<dyn SavedLocationRepo>,
}

impl Fakes {
    pub fn new(features: FakeFeatures, routing: FakeRouting) -> Self {
        Self {
            features: Arc::new(features),
            routing: Arc::new(routing),
            geocoding: Arc::new(FakeGeocoding::default()),
            saved: Arc::new(MemorySavedLocations::default()),
        }
    }

    pub fn with_saved(mut self, saved: Arc<dyn SavedLocationRepo>) -> Self {
        self.saved = saved;
        self
    }

    pub fn client(&self) -> Client {
        self.client_with(DiscoveryConfig::default())
    }

    pub fn client_with(&self, config: DiscoveryConfig) -> Client {
        Client::new(
            Services {
                features: self.features.clone(),
                routing: self.routing.clone(),
                geocoding: self.geocoding.clone(),
                saved: self.saved.clone(),
            },
            config,
        )
    }
}
