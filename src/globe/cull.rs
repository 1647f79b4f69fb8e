use crate::geo::{angular_distance, GeoPoint};
use crate::globe::projection::ProjectionState;

/// True when `point` is too far from the view center to be drawn.
///
/// The distance is measured from the coordinate under the viewport center.
/// Anything that cannot be measured (center off the disc, NaN coordinates)
/// is hidden.
pub fn is_occluded(point: GeoPoint, state: &ProjectionState, threshold: f64) -> bool {
    let Some(center) = state.invert(state.center()) else {
        return true;
    };
    // NaN compares false, so it falls through to hidden
    !(angular_distance(center, point) <= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::projection::Rotation;
    use std::f64::consts::FRAC_PI_2;

    fn state(yaw: f64, pitch: f64) -> ProjectionState {
        ProjectionState::new(Rotation::new(yaw, pitch, 0.0), 960.0, 500.0, 2.1)
    }

    #[test]
    fn test_center_point_never_occluded() {
        for (yaw, pitch) in [(0.0, 0.0), (-240.0, -15.0), (33.0, 71.0)] {
            let s = state(yaw, pitch);
            let center = s.invert(s.center()).unwrap();
            for threshold in [1e-9, 0.5, 1.45, 1.57] {
                assert!(!is_occluded(center, &s, threshold));
            }
        }
    }

    #[test]
    fn test_antipode_always_occluded() {
        let s = state(-240.0, -15.0);
        let center = s.invert(s.center()).unwrap();
        let antipode = GeoPoint::new(center.lon + 180.0, -center.lat);
        assert!((angular_distance(center, antipode) - std::f64::consts::PI).abs() < 1e-9);
        for threshold in [0.1, 1.45, FRAC_PI_2 - 1e-9, 3.1] {
            assert!(is_occluded(antipode, &s, threshold));
        }
    }

    #[test]
    fn test_origin_marker_flips_after_half_turn() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert!(!is_occluded(origin, &state(0.0, 0.0), 1.45));
        assert!(is_occluded(origin, &state(180.0, 0.0), 1.45));
    }

    #[test]
    fn test_threshold_softens_horizon() {
        // 85° from center: visible at the hemisphere edge, hidden with the narrower threshold
        let s = state(0.0, 0.0);
        let near_horizon = GeoPoint::new(85.0, 0.0);
        assert!(!is_occluded(near_horizon, &s, 1.57));
        assert!(is_occluded(near_horizon, &s, 1.45));
    }

    #[test]
    fn test_malformed_coordinates_are_hidden() {
        let s = state(0.0, 0.0);
        assert!(is_occluded(GeoPoint::new(f64::NAN, 0.0), &s, 1.45));
        assert!(is_occluded(GeoPoint::new(0.0, f64::INFINITY), &s, 1.45));
        // Out of range but finite: measured like any other point, no panic
        let _ = is_occluded(GeoPoint::new(540.0, 120.0), &s, 1.45);
    }
}
