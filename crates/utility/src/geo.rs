/// Mean earth radius used by all geodesic helpers, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// `(latitude, longitude)` in degrees.
pub type LatLon = (f64, f64);

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance between two points in meters.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    EARTH_RADIUS_METERS
        * central_angle(latitude_1, longitude_1, latitude_2, longitude_2)
}

/// Angular distance between two points in radians.
fn central_angle(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Initial bearing from the first to the second point, in radians.
pub fn initial_bearing(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);
    let dlon = to_radians(longitude_2 - longitude_1);

    let y = dlon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin()
        - lat1_rad.sin() * lat2_rad.cos() * dlon.cos();
    y.atan2(x)
}

/// Distance in meters from `point` to the great-circle segment `start -> end`.
///
/// The foot of the perpendicular is used when it falls between the two
/// endpoints, otherwise the nearer endpoint.
pub fn distance_to_segment(point: LatLon, start: LatLon, end: LatLon) -> f64 {
    let to_start = central_angle(start.0, start.1, point.0, point.1);
    let to_end = central_angle(end.0, end.1, point.0, point.1);
    let segment = central_angle(start.0, start.1, end.0, end.1);
    let nearest_endpoint = to_start.min(to_end) * EARTH_RADIUS_METERS;

    if segment == 0.0 || to_start == 0.0 {
        return nearest_endpoint;
    }

    let bearing_segment = initial_bearing(start.0, start.1, end.0, end.1);
    let bearing_point = initial_bearing(start.0, start.1, point.0, point.1);
    let relative = bearing_point - bearing_segment;

    // behind the start point
    if relative.cos() < 0.0 {
        return nearest_endpoint;
    }

    let cross_track = (to_start.sin() * relative.sin()).clamp(-1.0, 1.0).asin();
    let along_track = (to_start.cos() / cross_track.cos())
        .clamp(-1.0, 1.0)
        .acos();

    // beyond the end point
    if along_track > segment {
        return nearest_endpoint;
    }

    cross_track.abs() * EARTH_RADIUS_METERS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2πR / 360
        assert_close(haversine_distance(0.0, 0.0, 1.0, 0.0), 111_194.93, 0.1);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_identity() {
        let a = haversine_distance(54.32, 10.13, 54.28, 10.20);
        let b = haversine_distance(54.28, 10.20, 54.32, 10.13);
        assert_close(a, b, 1e-9);
        assert_eq!(haversine_distance(54.32, 10.13, 54.32, 10.13), 0.0);
    }

    #[test]
    fn bearing_due_east_on_equator() {
        assert_close(
            initial_bearing(0.0, 0.0, 0.0, 1.0),
            std::f64::consts::FRAC_PI_2,
            1e-12,
        );
    }

    #[test]
    fn point_on_segment_has_no_distance() {
        assert_close(distance_to_segment((0.0, 0.5), (0.0, 0.0), (0.0, 1.0)), 0.0, 1e-6);
    }

    #[test]
    fn perpendicular_offset_from_segment() {
        let distance = distance_to_segment((0.01, 0.5), (0.0, 0.0), (0.0, 1.0));
        assert_close(distance, haversine_distance(0.0, 0.5, 0.01, 0.5), 1.0);
    }

    #[test]
    fn projection_outside_segment_uses_endpoint() {
        let behind = distance_to_segment((0.0, -0.5), (0.0, 0.0), (0.0, 1.0));
        assert_close(behind, haversine_distance(0.0, -0.5, 0.0, 0.0), 1e-6);

        let beyond = distance_to_segment((1.0, 1.0), (0.0, 0.0), (0.0, 1.0));
        assert_close(beyond, haversine_distance(1.0, 1.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn degenerate_segment_is_a_point() {
        let distance = distance_to_segment((1.0, 0.0), (0.0, 0.0), (0.0, 0.0));
        assert_close(distance, haversine_distance(1.0, 0.0, 0.0, 0.0), 1e-6);
    }
}
