use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo;

use crate::ExampleData;

/// A position on the earth in degrees. Always within the valid latitude and
/// longitude ranges; use [`Coordinate::new`] to construct one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", try_from = "LatLng")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize, JsonSchema)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<LatLng> for Coordinate {
    type Error = String;

    fn try_from(value: LatLng) -> Result<Self, Self::Error> {
        Coordinate::new(value.latitude, value.longitude).ok_or_else(|| {
            format!(
                "coordinate out of range: {}, {}",
                value.latitude, value.longitude
            )
        })
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if Self::is_valid(latitude, longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }

    pub fn is_valid(latitude: f64, longitude: f64) -> bool {
        latitude.is_finite()
            && longitude.is_finite()
            && latitude.abs() <= 90.0
            && longitude.abs() <= 180.0
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Geodesic distance in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        geo::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// Geodesic distance in meters to the segment `start -> end`.
    pub fn distance_to_segment(&self, start: &Coordinate, end: &Coordinate) -> f64 {
        geo::distance_to_segment(
            (self.latitude, self.longitude),
            (start.latitude, start.longitude),
            (end.latitude, end.longitude),
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl ExampleData for Coordinate {
    fn example_data() -> Self {
        Self {
            latitude: 54.3233,
            longitude: 10.1228,
        }
    }
}

/// An axis-aligned rectangle in degrees. `south <= north` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Option<Self> {
        if south <= north {
            Some(Self {
                south,
                west,
                north,
                east,
            })
        } else {
            None
        }
    }

    /// The tight bounds of `points`, widened by `pad` degrees on every side.
    /// Returns `None` for an empty input. Padding never pushes the box
    /// outside the valid coordinate range.
    pub fn around<'a, I>(points: I, pad: f64) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut points = points.into_iter().peekable();
        points.peek()?;

        let mut south = f64::INFINITY;
        let mut west = f64::INFINITY;
        let mut north = f64::NEG_INFINITY;
        let mut east = f64::NEG_INFINITY;
        for point in points {
            south = south.min(point.latitude);
            west = west.min(point.longitude);
            north = north.max(point.latitude);
            east = east.max(point.longitude);
        }

        Some(Self {
            south: (south - pad).max(-90.0),
            west: (west - pad).max(-180.0),
            north: (north + pad).min(90.0),
            east: (east + pad).min(180.0),
        })
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        coordinate.latitude >= self.south
            && coordinate.latitude <= self.north
            && coordinate.longitude >= self.west
            && coordinate.longitude <= self.east
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).unwrap()
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.5, 0.0).is_none());
        assert!(Coordinate::new(0.0, -180.1).is_none());
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
        assert!(Coordinate::new(-90.0, 180.0).is_some());
    }

    #[test]
    fn deserialization_validates() {
        let ok: Coordinate =
            serde_json::from_str(r#"{"latitude": 54.3, "longitude": 10.1}"#).unwrap();
        assert_eq!(ok, c(54.3, 10.1));
        assert!(serde_json::from_str::<Coordinate>(
            r#"{"latitude": 154.3, "longitude": 10.1}"#
        )
        .is_err());
    }

    #[test]
    fn display_uses_four_decimals() {
        assert_eq!(c(54.323312, 10.12).to_string(), "54.3233, 10.1200");
    }

    #[test]
    fn padded_box_is_exact() {
        let route = [c(54.30, 10.10), c(54.35, 10.05), c(54.28, 10.20)];
        let bbox = BoundingBox::around(&route, 0.02).unwrap();
        assert_eq!(bbox.south(), 54.28 - 0.02);
        assert_eq!(bbox.west(), 10.05 - 0.02);
        assert_eq!(bbox.north(), 54.35 + 0.02);
        assert_eq!(bbox.east(), 10.20 + 0.02);
        assert!(bbox.south() <= bbox.north());
        assert!(route.iter().all(|point| bbox.contains(point)));
    }

    #[test]
    fn padded_box_stays_on_the_globe() {
        let bbox = BoundingBox::around(&[c(89.99, 179.99)], 0.02).unwrap();
        assert_eq!(bbox.north(), 90.0);
        assert_eq!(bbox.east(), 180.0);
    }

    #[test]
    fn empty_input_has_no_box() {
        assert!(BoundingBox::around(&Vec::<Coordinate>::new(), 0.02).is_none());
        assert!(BoundingBox::new(1.0, 0.0, 0.0, 1.0).is_none());
    }
}
