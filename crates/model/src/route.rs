use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{BoundingBox, Coordinate, ExampleData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Cycling,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" | "car" => Ok(Self::Driving),
            "walking" | "foot" => Ok(Self::Walking),
            "cycling" | "bike" => Ok(Self::Cycling),
            other => Err(format!("unknown travel mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub start: Coordinate,
    pub end: Coordinate,
    pub mode: TravelMode,
}

/// A single coordinate as delivered by a routing service. Pairs carry no
/// declared axis order, records name their axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawCoordinate {
    Pair([f64; 2]),
    Record {
        lat: f64,
        #[serde(alias = "lon")]
        lng: f64,
    },
}

/// A routing service response before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawRoute {
    pub coordinates: Vec<RawCoordinate>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// The ordered path of a computed route. Holds at least two points and can
/// not be modified after creation; a new route replaces it as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct RoutePolyline {
    points: Vec<Coordinate>,
}

impl RoutePolyline {
    pub const MIN_POINTS: usize = 2;

    pub fn new(points: Vec<Coordinate>) -> Option<Self> {
        if points.len() >= Self::MIN_POINTS {
            Some(Self { points })
        } else {
            None
        }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &Coordinate {
        &self.points[0]
    }

    pub fn last(&self) -> &Coordinate {
        &self.points[self.points.len() - 1]
    }

    pub fn bounding_box(&self, pad: f64) -> BoundingBox {
        // a polyline is never empty, so there always is a box
        BoundingBox::around(&self.points, pad)
            .unwrap_or_else(|| unreachable!("polyline without points"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub mode: TravelMode,
}

impl RouteSummary {
    pub fn distance_km(&self) -> String {
        format!("{:.2} km", self.distance_meters / 1000.0)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.duration_seconds / 60.0).round() as i64
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} minutes ({})",
            self.distance_km(),
            self.duration_minutes(),
            self.mode
        )
    }
}

impl ExampleData for RouteSummary {
    fn example_data() -> Self {
        Self {
            distance_meters: 12_480.0,
            duration_seconds: 1_140.0,
            mode: TravelMode::Driving,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_coordinates_accept_pairs_and_records() {
        let raw: Vec<RawCoordinate> =
            serde_json::from_str(r#"[[54.3, 10.1], {"lat": 54.4, "lng": 10.2}, {"lat": 1, "lon": 2}]"#)
                .unwrap();
        assert_eq!(
            raw,
            vec![
                RawCoordinate::Pair([54.3, 10.1]),
                RawCoordinate::Record { lat: 54.4, lng: 10.2 },
                RawCoordinate::Record { lat: 1.0, lng: 2.0 },
            ]
        );
    }

    #[test]
    fn polyline_needs_two_points() {
        let a = Coordinate::new(0.0, 0.0).unwrap();
        let b = Coordinate::new(0.0, 1.0).unwrap();
        assert!(RoutePolyline::new(vec![]).is_none());
        assert!(RoutePolyline::new(vec![a]).is_none());
        let route = RoutePolyline::new(vec![a, b]).unwrap();
        assert_eq!(route.len(), 2);
        assert_eq!(route.first(), &a);
        assert_eq!(route.last(), &b);
    }

    #[test]
    fn summary_formats_like_the_route_panel() {
        let summary = RouteSummary {
            distance_meters: 12_346.0,
            duration_seconds: 1_170.0,
            mode: TravelMode::Walking,
        };
        assert_eq!(summary.to_string(), "12.35 km, 20 minutes (walking)");
    }

    #[test]
    fn travel_mode_parses_aliases() {
        assert_eq!("Bike".parse::<TravelMode>(), Ok(TravelMode::Cycling));
        assert_eq!("driving".parse::<TravelMode>(), Ok(TravelMode::Driving));
        assert!("teleport".parse::<TravelMode>().is_err());
    }
}
