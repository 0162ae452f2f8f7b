use std::sync::Arc;

use model::{
    feature::Feature,
    location::{SavedLocation, Suggestion},
    query::SpatialQuery,
    route::{RoutePolyline, RouteRequest},
    Coordinate,
};
use utility::{id::Id, let_also::LetAlso};

use crate::{
    bounded,
    config::DiscoveryConfig,
    presentation::PoiMarker,
    proximity::filter_by_route,
    route::ComputedRoute,
    services::{FeatureService, GeocodingService, RoutingService, SavedLocationRepo},
    DiscoveryError, Result,
};

/// Shortest query that is sent to the geocoder.
pub const MIN_SUGGESTION_CHARS: usize = 3;

#[derive(Clone)]
pub struct Services {
    pub features: Arc<dyn FeatureService>,
    pub routing: Arc<dyn RoutingService>,
    pub geocoding: Arc<dyn GeocodingService>,
    pub saved: Arc<dyn SavedLocationRepo>,
}

/// Stateless access to the search pipeline. Cheap to clone.
#[derive(Clone)]
pub struct Client {
    services: Services,
    config: DiscoveryConfig,
}

impl Client {
    pub fn new(services: Services, config: DiscoveryConfig) -> Self {
        Self { services, config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    async fn fetch(&self, query: SpatialQuery) -> Result<Vec<Feature>> {
        if query.categories().is_empty() {
            return Ok(Vec::new());
        }
        bounded(self.config.query_timeout, self.services.features.query(&query)).await
    }

    /// Features of `categories` within `threshold_meters` of `route`.
    pub async fn search_along_route(
        &self,
        route: &RoutePolyline,
        categories: &[String],
        threshold_meters: f64,
    ) -> Result<Vec<PoiMarker>> {
        let bbox = route.bounding_box(self.config.bbox_pad_degrees);
        let fetched = self
            .fetch(SpatialQuery::BoundingBox {
                categories: categories.to_vec(),
                bbox,
            })
            .await?;
        let total = fetched.len();
        let kept = filter_by_route(fetched, route, threshold_meters);
        log::info!(
            "{} of {} features within {} m of the route",
            kept.len(),
            total,
            threshold_meters
        );
        Ok(to_markers(kept, categories))
    }

    /// Features of `categories` within `radius_meters` of `center`.
    pub async fn search_around(
        &self,
        center: Coordinate,
        categories: &[String],
        radius_meters: f64,
    ) -> Result<Vec<PoiMarker>> {
        self.fetch(SpatialQuery::Around {
            categories: categories.to_vec(),
            center,
            radius_meters,
        })
        .await?
        .let_owned(|features| Ok(to_markers(features, categories)))
    }

    pub async fn route(&self, request: RouteRequest) -> Result<ComputedRoute> {
        let raw = bounded(self.config.query_timeout, self.services.routing.route(request)).await?;
        let route = ComputedRoute::from_raw(raw, request.mode)?;
        log::info!("route {} -> {}: {}", request.start, request.end, route.summary);
        Ok(route)
    }

    /// Geocoder suggestions. Queries of up to two characters are answered
    /// with an empty list without asking the geocoder.
    pub async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>> {
        let query = query.trim();
        if query.chars().count() < MIN_SUGGESTION_CHARS {
            return Ok(Vec::new());
        }
        bounded(self.config.query_timeout, self.services.geocoding.suggest(query)).await
    }

    pub async fn saved_locations(&self) -> Result<Vec<SavedLocation>> {
        bounded(self.config.query_timeout, self.services.saved.list()).await
    }

    pub async fn save_location(&self, name: &str, coordinate: Coordinate) -> Result<SavedLocation> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DiscoveryError::InvalidName);
        }
        let saved =
            bounded(self.config.query_timeout, self.services.saved.create(name, coordinate)).await?;
        log::info!("saved location {} '{}'", saved.id, saved.name);
        Ok(saved)
    }

    pub async fn delete_saved_location(&self, id: Id<SavedLocation>) -> Result<()> {
        bounded(self.config.query_timeout, self.services.saved.delete(id)).await
    }
}

fn to_markers(features: Vec<Feature>, categories: &[String]) -> Vec<PoiMarker> {
    let fallback = match categories {
        [single] => single.as_str(),
        _ => "poi",
    };
    features
        .into_iter()
        .map(|feature| PoiMarker::new(feature, fallback))
        .collect()
}
