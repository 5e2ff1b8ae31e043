//! Ground sensing: a downward probe classifying grounded vs airborne.

use bevy::prelude::*;

use crate::{GROUND_CONTACT_EPSILON, GROUND_PROBE_MARGIN, PLAYER_HEIGHT};

/// Downward raycast access, implemented by the physics backend.
///
/// Implementations must exclude the character's own colliders (and their
/// descendants) from the query.
pub trait GroundProbe {
    /// Distance from `origin` straight down to the first hit, if any hit
    /// lies within `max_distance`.
    fn distance_to_ground(&self, origin: Vec3, max_distance: f32) -> Option<f32>;
}

/// Length of the grounded probe: half the capsule plus a small margin
/// (1.1 units for the default 1.8-unit capsule plus margin).
#[inline]
pub fn ground_probe_length() -> f32 {
    PLAYER_HEIGHT * 0.5 + GROUND_PROBE_MARGIN
}

/// Classify the character as grounded or airborne.
///
/// Grounded when the probe hits within [`ground_probe_length`], or when the
/// character's bounding-box minimum Y already sits at (or below) world zero —
/// the fallback covers missing or degenerate ground meshes. A corrupt
/// bounding box (non-finite min Y) fails open as airborne; no tick is ever
/// aborted by a bad probe.
///
/// No caching: jumps and falls can change the answer every tick.
pub fn is_grounded(probe: &dyn GroundProbe, origin: Vec3, bounds_min_y: Option<f32>) -> bool {
    if probe
        .distance_to_ground(origin, ground_probe_length())
        .is_some()
    {
        return true;
    }

    match bounds_min_y {
        Some(min_y) if min_y.is_finite() => min_y <= GROUND_CONTACT_EPSILON,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubProbe(Option<f32>);

    impl GroundProbe for StubProbe {
        fn distance_to_ground(&self, _origin: Vec3, max_distance: f32) -> Option<f32> {
            self.0.filter(|d| *d <= max_distance)
        }
    }

    #[test]
    fn test_probe_hit_is_grounded() {
        assert!(is_grounded(&StubProbe(Some(0.9)), Vec3::Y, Some(5.0)));
    }

    #[test]
    fn test_probe_miss_is_airborne() {
        assert!(!is_grounded(&StubProbe(None), Vec3::Y * 10.0, Some(9.0)));
    }

    #[test]
    fn test_hit_beyond_probe_length_is_airborne() {
        assert!(!is_grounded(&StubProbe(Some(3.0)), Vec3::Y * 4.0, Some(3.0)));
    }

    #[test]
    fn test_bounding_box_fallback_catches_missing_ground() {
        // No mesh below, but the feet already rest at world zero.
        assert!(is_grounded(&StubProbe(None), Vec3::Y * 0.9, Some(0.0)));
    }

    #[test]
    fn test_corrupt_bounds_fail_open_as_airborne() {
        assert!(!is_grounded(&StubProbe(None), Vec3::Y, Some(f32::NAN)));
        assert!(!is_grounded(&StubProbe(None), Vec3::Y, None));
    }
}
