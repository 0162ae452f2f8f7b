use indexmap::IndexMap;
use itertools::Itertools;
use model::{
    feature::{Feature, FeatureKind},
    Coordinate,
};
use serde::Deserialize;

use crate::ApiError;

/// Remark prefixes with which the interpreter reports an aborted run.
const ABORT_REMARKS: [&str; 2] = ["runtime error", "runtime remark"];

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Set by the interpreter when the query ran into a limit.
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: IndexMap<String, String>,
}

impl Element {
    fn kind(&self) -> Option<FeatureKind> {
        match self.element_type.as_str() {
            "node" => Some(FeatureKind::Node),
            "way" => Some(FeatureKind::Way),
            "relation" => Some(FeatureKind::Relation),
            _ => None,
        }
    }

    /// Nodes carry their own position, ways and relations their center.
    fn position(&self) -> Option<Coordinate> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Coordinate::new(lat, lon),
            (_, _, Some(center)) => Coordinate::new(center.lat, center.lon),
            _ => None,
        }
    }

    pub fn into_feature(self) -> Option<Feature> {
        let kind = self.kind()?;
        let position = self.position()?;
        Some(Feature {
            id: self.id,
            kind,
            position,
            tags: self.tags,
            source_distance_to_route: None,
        })
    }
}

impl OverpassResponse {
    /// Elements that have a position, each (kind, id) once, in the order the
    /// interpreter returned them. An aborted run is an error even though the
    /// interpreter answers it with status 200.
    pub fn into_features(self) -> Result<Vec<Feature>, ApiError> {
        if let Some(remark) = &self.remark {
            if ABORT_REMARKS.iter().any(|prefix| remark.starts_with(prefix)) {
                return Err(ApiError::Other(format!("overpass aborted: {}", remark)));
            }
            log::warn!("overpass remark: {}", remark);
        }
        let total = self.elements.len();
        let features = self
            .elements
            .into_iter()
            .filter_map(Element::into_feature)
            .unique_by(|feature| (feature.kind, feature.id))
            .collect::<Vec<_>>();
        if features.len() < total {
            log::debug!(
                "kept {} of {} overpass elements",
                features.len(),
                total
            );
        }
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "version": 0.6,
        "elements": [
            {"type": "node", "id": 11, "lat": 54.32, "lon": 10.13,
             "tags": {"name": "Aral", "amenity": "fuel", "brand": "Aral"}},
            {"type": "way", "id": 11, "center": {"lat": 54.33, "lon": 10.14},
             "tags": {"amenity": "hospital"}},
            {"type": "relation", "id": 12, "tags": {"amenity": "hospital"}},
            {"type": "node", "id": 11, "lat": 54.32, "lon": 10.13, "tags": {}},
            {"type": "node", "id": 13, "lat": 54.34, "lon": 10.15}
        ]
    }"#;

    #[test]
    fn parses_positions_and_keeps_tag_order() {
        let features = serde_json::from_str::<OverpassResponse>(RESPONSE)
            .unwrap()
            .into_features()
            .unwrap();

        let keys = features
            .iter()
            .map(|feature| (feature.kind, feature.id))
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                (FeatureKind::Node, 11),
                (FeatureKind::Way, 11),
                (FeatureKind::Node, 13)
            ]
        );
        assert_eq!(
            features[0].tags.keys().collect::<Vec<_>>(),
            vec!["name", "amenity", "brand"]
        );
        assert_eq!(features[1].position, Coordinate::new(54.33, 10.14).unwrap());
        assert!(features[2].tags.is_empty());
    }

    #[test]
    fn missing_elements_mean_no_features() {
        let response: OverpassResponse = serde_json::from_str(r#"{"version": 0.6}"#).unwrap();
        assert!(response.into_features().unwrap().is_empty());
    }

    #[test]
    fn aborted_run_is_an_error() {
        let response: OverpassResponse = serde_json::from_str(
            r#"{"elements": [], "remark": "runtime error: Query timed out in \"query\" at line 1 after 26 seconds."}"#,
        )
        .unwrap();
        let Err(ApiError::Other(message)) = response.into_features() else {
            panic!("expected the aborted run to fail");
        };
        assert!(message.contains("Query timed out"));
    }

    #[test]
    fn informational_remark_keeps_the_elements() {
        let response: OverpassResponse = serde_json::from_str(
            r#"{"elements": [{"type": "node", "id": 1, "lat": 1.0, "lon": 2.0}], "remark": "partial data"}"#,
        )
        .unwrap();
        assert_eq!(response.into_features().unwrap().len(), 1);
    }
}
