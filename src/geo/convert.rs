//! Provider projection (BD-09) to geodetic conversion

use std::f64::consts::PI;

use crate::models::{GeoPoint, ProviderCoordinate};

const X_PI: f64 = PI * 3000.0 / 180.0;
const OFFSET_X: f64 = 0.0065;
const OFFSET_Y: f64 = 0.0060;

/// Convert a provider-native point into `(lat, lon)`.
///
/// Single-step approximation: the second correction stage is skipped, so the
/// result carries an error on the order of a hundred metres. Distances and map
/// rendering use this output as-is.
#[must_use]
pub fn convert(provider_x: f64, provider_y: f64) -> (f64, f64) {
    let x = provider_x - OFFSET_X;
    let y = provider_y - OFFSET_Y;
    let z = (x * x + y * y).sqrt() - 0.00002 * (y * X_PI).sin();
    let theta = y.atan2(x) - 0.000003 * (x * X_PI).cos();
    (z * theta.sin(), z * theta.cos())
}

#[must_use]
pub fn provider_to_geodetic(coordinate: ProviderCoordinate) -> GeoPoint {
    let (lat, lon) = convert(coordinate.x, coordinate.y);
    GeoPoint::new(lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_point_beijing() {
        let (lat, lon) = convert(116.404, 39.915);
        assert_relative_eq!(lat, 39.908_656_739_576_31, epsilon = 1e-12);
        assert_relative_eq!(lon, 116.397_627_291_193_15, epsilon = 1e-12);
    }

    #[test]
    fn test_known_point_shanghai() {
        let (lat, lon) = convert(121.4737, 31.2304);
        assert_relative_eq!(lat, 31.224_342_000_314_16, epsilon = 1e-12);
        assert_relative_eq!(lon, 121.467_195_140_538_64, epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let first = convert(113.2644, 23.1291);
        let second = convert(113.2644, 23.1291);
        assert_eq!(first.0.to_bits(), second.0.to_bits());
        assert_eq!(first.1.to_bits(), second.1.to_bits());
    }

    #[test]
    fn test_origin_is_finite() {
        let (lat, lon) = convert(0.0, 0.0);
        assert!(lat.is_finite());
        assert!(lon.is_finite());
        assert_relative_eq!(lat, -0.006_004_173_607_198_182, epsilon = 1e-15);
        assert_relative_eq!(lon, -0.006_504_558_314_413_795, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_radius_after_offset() {
        // x and y both collapse to zero: atan2(0, 0) is 0 and z is 0
        let (lat, lon) = convert(OFFSET_X, OFFSET_Y);
        assert_eq!(lat, 0.0);
        assert_eq!(lon, 0.0);
    }

    #[test]
    fn test_typed_wrapper_matches() {
        let point = provider_to_geodetic(ProviderCoordinate::new(116.404, 39.915));
        let (lat, lon) = convert(116.404, 39.915);
        assert_eq!(point, GeoPoint::new(lat, lon));
    }
}
