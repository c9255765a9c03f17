//! Great-circle distance on a spherical Earth

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two geodetic points in kilometres.
///
/// Ignores ellipsoidal flattening. Symmetric in its arguments and zero for
/// identical points.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // rounding can push near-antipodal pairs just past 1
    let a = a.min(1.0);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_one_degree_on_equator() {
        assert_relative_eq!(distance_km(0.0, 0.0, 0.0, 1.0), 111.194_926_644_558_73, epsilon = 1e-9);
    }

    #[test]
    fn test_beijing_to_shanghai() {
        let d = distance_km(39.9042, 116.4074, 31.2304, 121.4737);
        assert_relative_eq!(d, 1067.310_170_927_129_3, epsilon = 1e-6);
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let d = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!(d.is_finite());
        assert_relative_eq!(d, std::f64::consts::PI * EARTH_RADIUS_KM, epsilon = 1e-6);
    }

    #[rstest]
    #[case(39.9042, 116.4074)]
    #[case(-33.8688, 151.2093)]
    #[case(0.0, 0.0)]
    #[case(89.9, -179.9)]
    fn test_identical_points_are_zero(#[case] lat: f64, #[case] lon: f64) {
        assert_eq!(distance_km(lat, lon, lat, lon), 0.0);
    }

    #[rstest]
    #[case((39.9042, 116.4074), (31.2304, 121.4737))]
    #[case((51.5074, -0.1278), (40.7128, -74.0060))]
    #[case((-12.5, 45.25), (60.125, -150.75))]
    fn test_symmetric(#[case] a: (f64, f64), #[case] b: (f64, f64)) {
        assert_eq!(distance_km(a.0, a.1, b.0, b.1), distance_km(b.0, b.1, a.0, a.1));
    }

    #[test]
    fn test_triangle_inequality() {
        let a = (39.9042, 116.4074);
        let b = (34.3416, 108.9398);
        let c = (31.2304, 121.4737);
        let ab = distance_km(a.0, a.1, b.0, b.1);
        let bc = distance_km(b.0, b.1, c.0, c.1);
        let ac = distance_km(a.0, a.1, c.0, c.1);
        assert!(ac <= ab + bc + 1e-9);
    }
}
