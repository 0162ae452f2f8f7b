use std::sync::Arc;

use actors::actor_ref::ActorRef;
use futures::{Stream, StreamExt};
use model::{
    location::{InteractionMode, LocationSelection, PositionSample, Role, SavedLocation, Suggestion},
    route::{RouteRequest, TravelMode},
    Coordinate,
};
use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use utility::id::Id;

use crate::{
    client::Client,
    presentation::{promote_to_end, PoiMarker},
    results::{ResultBoard, Ticket},
    route::ComputedRoute,
    store::{LocationState, LocationStore, StoreRef, CURRENT_LOCATION_LABEL},
    DiscoveryError, Result,
};

/// A freshly computed route together with the background search for common
/// POIs along it. The search only ever logs its errors.
pub struct RouteOutcome {
    pub route: ComputedRoute,
    pub enrichment: JoinHandle<Result<usize>>,
}

/// One interactive map session: selected locations, the current route and
/// the displayed POIs.
pub struct Navigator {
    client: Client,
    store: ActorRef<LocationStore>,
    route: RwLock<Option<ComputedRoute>>,
    results: Arc<ResultBoard>,
    tracking: Mutex<Option<CancellationToken>>,
}

impl Navigator {
    /// Must be called within a tokio runtime.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            store: actors::run(LocationStore::default),
            route: RwLock::new(None),
            results: Arc::new(ResultBoard::default()),
            tracking: Mutex::new(None),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn locations(&self) -> Result<LocationState> {
        self.store.snapshot().await
    }

    pub async fn route(&self) -> Option<ComputedRoute> {
        self.route.read().await.clone()
    }

    pub async fn markers(&self) -> Vec<PoiMarker> {
        self.results.markers().await
    }

    /// Searches `category` along the route, or around the live position
    /// when no route exists.
    pub async fn search(&self, category: &str) -> Result<Vec<PoiMarker>> {
        let ticket = self.results.begin().await;
        match self.find(category).await {
            Ok(markers) if !markers.is_empty() => {
                self.results.publish(ticket, markers.clone()).await;
                Ok(markers)
            }
            Ok(_) => {
                self.results.settle(ticket).await;
                Err(DiscoveryError::NoResults {
                    category: category.to_owned(),
                })
            }
            Err(why) => {
                self.results.settle(ticket).await;
                Err(why)
            }
        }
    }

    async fn find(&self, category: &str) -> Result<Vec<PoiMarker>> {
        let config = self.client.config();
        let categories = vec![category.to_owned()];

        let polyline = self
            .route
            .read()
            .await
            .as_ref()
            .map(|route| route.polyline.clone());
        match polyline {
            Some(polyline) => {
                self.client
                    .search_along_route(&polyline, &categories, config.threshold_meters)
                    .await
            }
            None => {
                let current = self
                    .store
                    .get(Role::Current)
                    .await?
                    .ok_or(DiscoveryError::InvalidSelection(Role::Current))?;
                self.client
                    .search_around(current.coordinate, &categories, config.radius_meters)
                    .await
            }
        }
    }

    /// Routes from the start to the end location and replaces the current
    /// route. Displayed POIs are cleared before the routing service is asked.
    pub async fn compute_route(&self, mode: TravelMode) -> Result<RouteOutcome> {
        let state = self.store.snapshot().await?;
        let start = state
            .start
            .ok_or(DiscoveryError::InvalidSelection(Role::Start))?;
        let end = state.end.ok_or(DiscoveryError::InvalidSelection(Role::End))?;

        let ticket = self.results.begin().await;
        let request = RouteRequest {
            start: start.coordinate,
            end: end.coordinate,
            mode,
        };
        let route = match self.client.route(request).await {
            Ok(route) => route,
            Err(why) => {
                if matches!(why, DiscoveryError::EmptyRoute) {
                    self.route.write().await.take();
                }
                self.results.settle(ticket).await;
                return Err(why);
            }
        };

        *self.route.write().await = Some(route.clone());
        let enrichment = self.enrich(ticket, &route);
        Ok(RouteOutcome { route, enrichment })
    }

    fn enrich(&self, ticket: Ticket, route: &ComputedRoute) -> JoinHandle<Result<usize>> {
        let client = self.client.clone();
        let results = Arc::clone(&self.results);
        let polyline = route.polyline.clone();

        tokio::spawn(async move {
            let config = client.config();
            let found = client
                .search_along_route(&polyline, &config.enrichment_categories, config.threshold_meters)
                .await;
            match found {
                Ok(markers) => {
                    let count = markers.len();
                    if results.publish(ticket, markers).await {
                        log::info!("showing {} POIs along the new route", count);
                    }
                    Ok(count)
                }
                Err(why) => {
                    log::warn!("automatic POI search failed: {}", why);
                    Err(why)
                }
            }
        })
    }

    /// Makes the POI of `marker` the route destination.
    pub async fn select_poi(&self, marker: &PoiMarker) -> Result<LocationSelection> {
        let selection = promote_to_end(&marker.feature);
        self.store.select(selection.clone()).await?;
        Ok(selection)
    }

    pub async fn set_location(&self, selection: LocationSelection) -> Result<()> {
        self.store.select(selection).await?;
        Ok(())
    }

    pub async fn toggle_picking(&self, role: Role) -> Result<InteractionMode> {
        self.store.toggle_picking(role).await
    }

    /// Handles a click on the map. Returns the selection it made, if any.
    pub async fn map_click(&self, coordinate: Coordinate) -> Result<Option<LocationSelection>> {
        self.store.map_click(coordinate).await
    }

    /// Copies the live position into `role`.
    pub async fn use_current(&self, role: Role) -> Result<LocationSelection> {
        let current = self
            .store
            .get(Role::Current)
            .await?
            .ok_or(DiscoveryError::InvalidSelection(Role::Current))?;
        let selection = LocationSelection::new(role, current.coordinate, CURRENT_LOCATION_LABEL);
        self.store.select(selection.clone()).await?;
        Ok(selection)
    }

    pub async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>> {
        self.client.suggest(query).await
    }

    pub async fn pick_suggestion(&self, role: Role, suggestion: Suggestion) -> Result<LocationSelection> {
        let selection = LocationSelection::new(role, suggestion.coordinate, suggestion.display_name);
        self.store.select(selection.clone()).await?;
        Ok(selection)
    }

    pub async fn saved_locations(&self) -> Result<Vec<SavedLocation>> {
        self.client.saved_locations().await
    }

    pub async fn pick_saved(&self, role: Role, saved: &SavedLocation) -> Result<LocationSelection> {
        let coordinate = saved
            .coordinate()
            .ok_or(DiscoveryError::InvalidSelection(role))?;
        let selection =
            LocationSelection::new(role, coordinate, format!("Saved Location ({})", coordinate));
        self.store.select(selection.clone()).await?;
        Ok(selection)
    }

    /// Persists the location currently assigned to `source` under `name`.
    /// Nothing in the session changes, whether saving works or not.
    pub async fn save_location(&self, name: &str, source: Role) -> Result<SavedLocation> {
        let selection = self
            .store
            .get(source)
            .await?
            .ok_or(DiscoveryError::InvalidSelection(source))?;
        self.client.save_location(name, selection.coordinate).await
    }

    pub async fn delete_saved(&self, id: Id<SavedLocation>) -> Result<()> {
        self.client.delete_saved_location(id).await
    }

    /// Forgets start, end, route and POIs. The live position stays.
    pub async fn clear_all(&self) -> Result<()> {
        self.store.clear_selections().await?;
        self.route.write().await.take();
        self.results.clear().await;
        Ok(())
    }

    /// Feeds `positions` into the current location until the stream ends or
    /// [`Navigator::stop_following`] is called. Following again replaces the
    /// previous feed.
    pub async fn follow_positions<S>(&self, positions: S) -> JoinHandle<()>
    where
        S: Stream<Item = PositionSample> + Send + 'static,
    {
        let token = CancellationToken::new();
        if let Some(previous) = self.tracking.lock().await.replace(token.clone()) {
            previous.cancel();
        }
        let store = self.store.clone();

        tokio::spawn(async move {
            let mut positions = Box::pin(positions);
            loop {
                let sample = tokio::select! {
                    _ = token.cancelled() => break,
                    sample = positions.next() => sample,
                };
                let Some(sample) = sample else {
                    break;
                };
                match store.update_position(sample.clone()).await {
                    Ok(true) => log::info!("initial position fix at {}", sample.coordinate),
                    Ok(false) => log::trace!("position {}", sample.coordinate),
                    Err(why) => {
                        log::error!("position feed stopped: {}", why);
                        break;
                    }
                }
            }
        })
    }

    pub async fn stop_following(&self) {
        if let Some(token) = self.tracking.lock().await.take() {
            token.cancel();
        }
    }
}
