use model::route::{RawCoordinate, RawRoute};
use serde::Deserialize;

use crate::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub distance: f64,
    pub duration: f64,
    pub geometry: Geometry,
}

/// GeoJSON line string, positions are `[longitude, latitude]`.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteResponse {
    /// The first route. Its axis order is declared on every coordinate.
    pub fn into_raw_route(self) -> Result<RawRoute, ApiError> {
        if self.code != "Ok" {
            return Err(ApiError::NoRoute {
                code: self.code,
                message: self.message,
            });
        }
        let route = self.routes.into_iter().next().ok_or(ApiError::NoRoute {
            code: "NoRoute".to_owned(),
            message: Some("response contains no routes".to_owned()),
        })?;

        Ok(RawRoute {
            coordinates: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lng, lat]| RawCoordinate::Record { lat, lng })
                .collect(),
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geojson_positions_become_declared_records() {
        let response: RouteResponse = serde_json::from_str(
            r#"{
                "code": "Ok",
                "routes": [{
                    "distance": 1520.4,
                    "duration": 212.9,
                    "weight": 212.9,
                    "geometry": {"type": "LineString", "coordinates": [[10.12, 54.32], [10.13, 54.33]]}
                }],
                "waypoints": []
            }"#,
        )
        .unwrap();
        let raw = response.into_raw_route().unwrap();
        assert_eq!(
            raw.coordinates,
            vec![
                RawCoordinate::Record { lat: 54.32, lng: 10.12 },
                RawCoordinate::Record { lat: 54.33, lng: 10.13 },
            ]
        );
        assert_eq!(raw.distance_meters, 1520.4);
        assert_eq!(raw.duration_seconds, 212.9);
    }

    #[test]
    fn error_codes_and_empty_routes_fail() {
        let failed: RouteResponse =
            serde_json::from_str(r#"{"code": "NoSegment", "message": "Could not find a matching segment"}"#)
                .unwrap();
        assert!(matches!(
            failed.into_raw_route(),
            Err(ApiError::NoRoute { code, .. }) if code == "NoSegment"
        ));

        let empty: RouteResponse = serde_json::from_str(r#"{"code": "Ok", "routes": []}"#).unwrap();
        assert!(empty.into_raw_route().is_err());
    }
}
