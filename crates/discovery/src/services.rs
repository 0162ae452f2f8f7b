use async_trait::async_trait;
use model::{
    feature::Feature,
    location::{SavedLocation, Suggestion},
    query::SpatialQuery,
    route::{RawRoute, RouteRequest},
    Coordinate,
};
use tokio::sync::Mutex;
use utility::id::Id;

use crate::{DiscoveryError, Result};

/// Looks up map features. Results keep the order the service returned them.
#[async_trait]
pub trait FeatureService: Send + Sync {
    async fn query(&self, query: &SpatialQuery) -> Result<Vec<Feature>>;
}

#[async_trait]
pub trait RoutingService: Send + Sync {
    async fn route(&self, request: RouteRequest) -> Result<RawRoute>;
}

#[async_trait]
pub trait GeocodingService: Send + Sync {
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>>;
}

/// Server side store of named locations.
#[async_trait]
pub trait SavedLocationRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<SavedLocation>>;
    async fn create(&self, name: &str, coordinate: Coordinate) -> Result<SavedLocation>;
    async fn delete(&self, id: Id<SavedLocation>) -> Result<()>;
}

/// Saved locations kept in process memory. Ids count up from 1.
#[derive(Debug, Default)]
pub struct MemorySavedLocations {
    inner: Mutex<(i32, Vec<SavedLocation>)>,
}

#[async_trait]
impl SavedLocationRepo for MemorySavedLocations {
    async fn list(&self) -> Result<Vec<SavedLocation>> {
        Ok(self.inner.lock().await.1.clone())
    }

    async fn create(&self, name: &str, coordinate: Coordinate) -> Result<SavedLocation> {
        let mut inner = self.inner.lock().await;
        inner.0 += 1;
        let saved = SavedLocation {
            id: Id::new(inner.0),
            name: name.to_owned(),
            x: coordinate.latitude(),
            y: coordinate.longitude(),
        };
        inner.1.push(saved.clone());
        Ok(saved)
    }

    async fn delete(&self, id: Id<SavedLocation>) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let before = inner.1.len();
        inner.1.retain(|saved| saved.id != id);
        if inner.1.len() == before {
            return Err(DiscoveryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use model::ExampleData;

    use super::*;

    #[tokio::test]
    async fn memory_store_assigns_ids_and_deletes() {
        let store = MemorySavedLocations::default();
        let home = store.create("Home", Coordinate::example_data()).await.unwrap();
        let work = store.create("Work", Coordinate::example_data()).await.unwrap();
        assert_ne!(home.id, work.id);

        store.delete(home.id).await.unwrap();
        assert!(matches!(
            store.delete(home.id).await,
            Err(DiscoveryError::NotFound)
        ));
        let names = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|saved| saved.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Work"]);
    }
}
