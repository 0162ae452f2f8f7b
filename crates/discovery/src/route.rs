use model::{
    route::{RawCoordinate, RawRoute, RoutePolyline, RouteSummary, TravelMode},
    Coordinate,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{DiscoveryError, Result};

/// A route as it is kept for the rest of the session.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComputedRoute {
    pub polyline: RoutePolyline,
    pub summary: RouteSummary,
}

impl ComputedRoute {
    pub fn from_raw(raw: RawRoute, mode: TravelMode) -> Result<Self> {
        Ok(Self {
            polyline: normalize_route(&raw.coordinates)?,
            summary: RouteSummary {
                distance_meters: raw.distance_meters,
                duration_seconds: raw.duration_seconds,
                mode,
            },
        })
    }
}

/// Interprets a pair without declared axis order. `[lat, lng]` is assumed
/// when both values fit their ranges, `[lng, lat]` otherwise.
pub fn interpret_pair(a: f64, b: f64) -> (f64, f64) {
    if a.abs() <= 90.0 && b.abs() <= 180.0 {
        (a, b)
    } else {
        (b, a)
    }
}

/// Turns routing output into a polyline. Points that are invalid under every
/// interpretation are skipped. Fails with [`DiscoveryError::EmptyRoute`] if
/// fewer than two points remain.
pub fn normalize_route(raw: &[RawCoordinate]) -> Result<RoutePolyline> {
    let mut skipped = 0usize;
    let points = raw
        .iter()
        .filter_map(|item| {
            let (latitude, longitude) = match *item {
                RawCoordinate::Pair([a, b]) => interpret_pair(a, b),
                RawCoordinate::Record { lat, lng } => (lat, lng),
            };
            let coordinate = Coordinate::new(latitude, longitude);
            if coordinate.is_none() {
                skipped += 1;
            }
            coordinate
        })
        .collect::<Vec<_>>();

    if skipped > 0 {
        log::warn!("dropped {} invalid route point(s) out of {}", skipped, raw.len());
    }

    RoutePolyline::new(points).ok_or(DiscoveryError::EmptyRoute)
}
