use model::{feature::Feature, route::RoutePolyline, Coordinate};

/// Distance from a point to the route segment `start -> end` in meters.
/// The first route point is passed as a segment of length zero.
pub trait SegmentDistance: FnMut(&Coordinate, &Coordinate, &Coordinate) -> f64 {}

impl<F> SegmentDistance for F where F: FnMut(&Coordinate, &Coordinate, &Coordinate) -> f64 {}

fn geodesic(point: &Coordinate, start: &Coordinate, end: &Coordinate) -> f64 {
    point.distance_to_segment(start, end)
}

/// Keeps the features within `threshold_meters` of `route` and records the
/// distance on each of them. The boundary is inclusive and the input order
/// is kept.
pub fn filter_by_route(
    features: Vec<Feature>,
    route: &RoutePolyline,
    threshold_meters: f64,
) -> Vec<Feature> {
    filter_by_route_using(features, route, threshold_meters, geodesic)
}

/// Like [`filter_by_route`] with an exchangeable distance function.
pub fn filter_by_route_using<D: SegmentDistance>(
    features: Vec<Feature>,
    route: &RoutePolyline,
    threshold_meters: f64,
    mut distance: D,
) -> Vec<Feature> {
    features
        .into_iter()
        .filter_map(|feature| {
            let closest =
                distance_to_route_within(&feature.position, route, threshold_meters, &mut distance);
            (closest <= threshold_meters).then(|| feature.with_distance_to_route(closest))
        })
        .collect()
}

/// Scans the route in order and returns the smallest distance seen. Stops at
/// the first route point whose running minimum is within `threshold_meters`,
/// so the result is only exact for points outside the threshold.
pub fn distance_to_route_within<D: SegmentDistance>(
    point: &Coordinate,
    route: &RoutePolyline,
    threshold_meters: f64,
    distance: &mut D,
) -> f64 {
    let points = route.points();
    let mut closest = f64::INFINITY;
    for (index, vertex) in points.iter().enumerate() {
        let previous = if index == 0 { vertex } else { &points[index - 1] };
        closest = closest.min(distance(point, previous, vertex));
        if closest <= threshold_meters {
            break;
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use model::feature::FeatureKind;

    use super::*;

    fn c(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).unwrap()
    }

    fn feature(id: i64, latitude: f64, longitude: f64) -> Feature {
        Feature::new(id, FeatureKind::Node, c(latitude, longitude))
    }

    fn equator_route(points: usize) -> RoutePolyline {
        RoutePolyline::new((0..points).map(|i| c(0.0, i as f64)).collect()).unwrap()
    }

    #[test]
    fn feature_between_vertices_is_near_the_route() {
        let route = RoutePolyline::new(vec![c(0.0, 0.0), c(0.0, 1.0)]).unwrap();
        let kept = filter_by_route(vec![feature(1, 0.0, 0.5), feature(2, 1.0, 1.0)], &route, 800.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
        assert!(kept[0].source_distance_to_route.unwrap() < 1.0);
    }

    #[test]
    fn threshold_is_inclusive() {
        let route = RoutePolyline::new(vec![c(54.30, 10.10), c(54.31, 10.12)]).unwrap();
        let candidate = feature(1, 54.305, 10.125);
        let exact = distance_to_route_within(&candidate.position, &route, 0.0, &mut geodesic);
        assert!(exact > 1.0);

        let at_threshold = filter_by_route(vec![candidate.clone()], &route, exact);
        assert_eq!(at_threshold.len(), 1);
        let beyond = filter_by_route(vec![candidate], &route, exact - 1.0);
        assert!(beyond.is_empty());
    }

    #[test]
    fn scanning_stops_at_first_point_within_threshold() {
        let route = equator_route(10);
        let mut evaluated = 0usize;
        let kept = filter_by_route_using(
            vec![feature(1, 0.001, 3.0)],
            &route,
            800.0,
            |point: &Coordinate, start: &Coordinate, end: &Coordinate| {
                evaluated += 1;
                point.distance_to_segment(start, end)
            },
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(evaluated, 4);
    }

    #[test]
    fn features_outside_scan_the_whole_route() {
        let route = equator_route(10);
        let mut evaluated = 0usize;
        let kept = filter_by_route_using(
            vec![feature(1, 5.0, 3.0)],
            &route,
            800.0,
            |point: &Coordinate, start: &Coordinate, end: &Coordinate| {
                evaluated += 1;
                point.distance_to_segment(start, end)
            },
        );
        assert!(kept.is_empty());
        assert_eq!(evaluated, 10);
    }

    #[test]
    fn fetch_order_is_preserved() {
        let route = equator_route(3);
        let kept = filter_by_route(
            vec![
                feature(3, 0.0, 2.0),
                feature(9, 4.0, 0.0),
                feature(1, 0.0, 0.0),
                feature(2, 0.001, 1.5),
            ],
            &route,
            800.0,
        );
        assert_eq!(kept.iter().map(|f| f.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }
}
