use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Coordinate, ExampleData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Node,
    Way,
    Relation,
}

/// A discovered point of interest. Ways and relations are represented by
/// their center. Lives only as long as one search result.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: i64,
    pub kind: FeatureKind,
    pub position: Coordinate,
    /// Tags in the order the feature service delivered them.
    pub tags: IndexMap<String, String>,
    pub source_distance_to_route: Option<f64>,
}

impl Feature {
    pub fn new(id: i64, kind: FeatureKind, position: Coordinate) -> Self {
        Self {
            id,
            kind,
            position,
            tags: IndexMap::new(),
            source_distance_to_route: None,
        }
    }

    pub fn with_tag<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_distance_to_route(mut self, meters: f64) -> Self {
        self.source_distance_to_route = Some(meters);
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl ExampleData for Feature {
    fn example_data() -> Self {
        Feature::new(
            1_234_567,
            FeatureKind::Node,
            Coordinate::example_data(),
        )
        .with_tag("amenity", "fuel")
        .with_tag("name", "Tankstelle am Hafen")
        .with_tag("addr:street", "Hafenstraße")
        .with_distance_to_route(240.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_keep_insertion_order() {
        let feature = Feature::new(1, FeatureKind::Way, Coordinate::example_data())
            .with_tag("shop", "bakery")
            .with_tag("amenity", "cafe")
            .with_tag("brand", "");
        let keys = feature.tags.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, vec!["shop", "amenity", "brand"]);
        assert_eq!(feature.tag("amenity"), Some("cafe"));
        assert_eq!(feature.tag("brand"), None);
    }

    #[test]
    fn distance_is_omitted_until_known() {
        let feature = Feature::new(1, FeatureKind::Node, Coordinate::example_data());
        let json = serde_json::to_value(&feature).unwrap();
        assert!(json.get("sourceDistanceToRoute").is_none());
        assert_eq!(json["kind"], "node");
    }
}
