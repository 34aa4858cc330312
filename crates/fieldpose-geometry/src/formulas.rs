//! Role-specific formulas.
//!
//! These functions assume the caller already checked that the reading is valid
//! and that the formula applies to the role. [`crate::GeometryEngine`] does both.

use fieldpose_core::{CalibrationConstants, TargetRole, VisionReading};

/// Corrected bearing (deg) of a corner marker in the field frame.
///
/// Markers 1 and 3 face the opposite way to markers 2 and 4, so skew enters
/// with a different sign and a quarter-turn offset. `None` for non-corner roles.
pub fn corrected_bearing(role: TargetRole, reading: &VisionReading) -> Option<f64> {
    match role {
        TargetRole::ShooterTarget | TargetRole::FuelTarget => None,
        TargetRole::CornerMarker1 | TargetRole::CornerMarker3 => {
            Some(-reading.skew + reading.angle_x)
        }
        TargetRole::CornerMarker2 | TargetRole::CornerMarker4 => {
            Some((reading.skew + 90.0) - reading.angle_x)
        }
    }
}

/// Absolute robot heading (deg) while facing a corner marker.
pub fn heading(role: TargetRole, skew: f64) -> Option<f64> {
    let skew = skew.abs();
    match role {
        TargetRole::ShooterTarget | TargetRole::FuelTarget => None,
        TargetRole::CornerMarker1 => Some(270.0 - skew),
        TargetRole::CornerMarker2 => Some(skew + 270.0),
        TargetRole::CornerMarker3 => Some(90.0 - skew),
        TargetRole::CornerMarker4 => Some(skew + 90.0),
    }
}

/// Distance to the shooter target from the height difference and the camera
/// elevation angle. Not finite-checked: `camera_angle + angle_y == 0` divides by zero.
#[inline]
pub fn shooter_distance(calibration: &CalibrationConstants, angle_y: f64) -> f64 {
    (calibration.target_height - calibration.camera_height)
        / (calibration.camera_angle_deg + angle_y).to_radians().tan()
}

/// Ground distance to a floor-level marker.
#[inline]
pub fn marker_distance(calibration: &CalibrationConstants, angle_y: f64) -> f64 {
    calibration.camera_height * (angle_y - calibration.camera_angle_deg).abs().to_radians().tan()
}
