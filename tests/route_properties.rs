//! Properties of the coordinate conversion, distance and route ordering

use approx::assert_relative_eq;
use haversine::{Location as HaversineLocation, Units, distance};
use rstest::rstest;

use citytour::geo::{legs, nearest_neighbor_order, route_distance_km};
use citytour::models::{PlaceHit, ProviderCoordinate};
use citytour::{GeoPoint, Waypoint, convert, distance_km, optimize_route};

fn reference_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    distance(
        HaversineLocation { latitude: a.lat, longitude: a.lon },
        HaversineLocation { latitude: b.lat, longitude: b.lon },
        Units::Kilometers,
    )
}

fn city_points() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(39.9042, 116.4074),  // Beijing
        GeoPoint::new(31.2304, 121.4737),  // Shanghai
        GeoPoint::new(22.5431, 114.0579),  // Shenzhen
        GeoPoint::new(30.5728, 104.0668),  // Chengdu
        GeoPoint::new(34.3416, 108.9398),  // Xi'an
        GeoPoint::new(39.0842, 117.2009),  // Tianjin
        GeoPoint::new(29.5630, 106.5516),  // Chongqing
    ]
}

fn waypoints(coords: &[(f64, f64)]) -> Vec<Waypoint> {
    coords
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            PlaceHit {
                uid: None,
                name: format!("stop {i}"),
                address: None,
                rating: None,
                coordinate: ProviderCoordinate::new(x, y),
            }
            .into_waypoint(i)
        })
        .collect()
}

#[rstest]
#[case(GeoPoint::new(39.9042, 116.4074), GeoPoint::new(31.2304, 121.4737))]
#[case(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0))]
#[case(GeoPoint::new(-33.8688, 151.2093), GeoPoint::new(51.5074, -0.1278))]
#[case(GeoPoint::new(48.8566, 2.3522), GeoPoint::new(40.7128, -74.0060))]
fn distance_agrees_with_reference_haversine(#[case] a: GeoPoint, #[case] b: GeoPoint) {
    assert_relative_eq!(
        distance_km(a.lat, a.lon, b.lat, b.lon),
        reference_distance(a, b),
        max_relative = 1e-9
    );
}

#[test]
fn distance_is_symmetric_and_non_negative() {
    let points = city_points();
    for a in &points {
        for b in &points {
            let ab = a.distance_km(b);
            assert!(ab >= 0.0);
            assert_eq!(ab, b.distance_km(a));
        }
    }
}

#[rstest]
#[case(116.404, 39.915)]
#[case(121.4737, 31.2304)]
#[case(0.0, 0.0)]
#[case(-180.0, -90.0)]
#[case(180.0, 90.0)]
fn conversion_is_finite_and_deterministic(#[case] x: f64, #[case] y: f64) {
    let (lat, lon) = convert(x, y);
    assert!(lat.is_finite() && lon.is_finite());
    let (again_lat, again_lon) = convert(x, y);
    assert_eq!(lat.to_bits(), again_lat.to_bits());
    assert_eq!(lon.to_bits(), again_lon.to_bits());
}

/// The provider frame is offset by a few hundred metres in mainland China
#[test]
fn conversion_shift_is_small_in_china() {
    let point = GeoPoint::new(39.915, 116.404);
    let (lat, lon) = convert(point.lon, point.lat);
    let shift_km = point.distance_km(&GeoPoint::new(lat, lon));
    assert!(shift_km > 0.1 && shift_km < 2.0, "{shift_km}");
}

#[test]
fn route_is_permutation_with_anchor_first() {
    let points = city_points();
    let order = nearest_neighbor_order(&points);

    assert_eq!(order[0], 0);
    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..points.len()).collect::<Vec<_>>());
}

#[test]
fn each_step_takes_nearest_remaining() {
    let points = city_points();
    let order = nearest_neighbor_order(&points);

    for step in 1..order.len() {
        let from = points[order[step - 1]];
        let chosen = from.distance_km(&points[order[step]]);
        for &later in &order[step + 1..] {
            assert!(chosen <= from.distance_km(&points[later]));
        }
    }
}

#[rstest]
#[case(vec![(116.404, 39.915)])]
#[case(vec![(116.404, 39.915), (116.28, 40.0)])]
#[case(vec![(116.404, 39.915), (116.28, 40.0), (116.416, 39.888), (116.39, 39.99)])]
fn optimized_route_keeps_every_waypoint(#[case] coords: Vec<(f64, f64)>) {
    let input = waypoints(&coords);
    let route = optimize_route(&input);

    assert_eq!(route.len(), input.len());
    assert_eq!(route[0].id(), input[0].id());
    for waypoint in &input {
        assert_eq!(route.iter().filter(|w| w.id() == waypoint.id()).count(), 1);
    }
}

#[test]
fn optimized_route_leaves_input_untouched() {
    let input = waypoints(&[(116.404, 39.915), (116.28, 40.0), (116.416, 39.888)]);
    let snapshot = input.clone();
    let _ = optimize_route(&input);
    assert_eq!(input, snapshot);
}

#[test]
fn legs_sum_to_route_distance() {
    let route = optimize_route(&waypoints(&[
        (116.404, 39.915),
        (116.28, 40.0),
        (116.416, 39.888),
        (116.39, 39.99),
    ]));
    let total: f64 = legs(&route).iter().map(|leg| leg.distance_km).sum();
    assert_relative_eq!(total, route_distance_km(&route), max_relative = 1e-12);
    assert_eq!(route_distance_km(&route[..1]), 0.0);
}

#[test]
fn waypoint_geodetic_matches_conversion() {
    let route = waypoints(&[(116.404, 39.915)]);
    let (lat, lon) = convert(116.404, 39.915);
    assert_eq!(route[0].geodetic(), GeoPoint::new(lat, lon));
}
