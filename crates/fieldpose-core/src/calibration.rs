//! Robot-build calibration and field anchor configuration.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::TargetRole;

/// Camera mount and target geometry for one robot build.
///
/// Lengths are in inches, angles in degrees. If distances drift from one
/// match to the next, check `camera_angle_deg` first: a bumped mount changes
/// every formula that depends on it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConstants {
    /// Lens height above the floor.
    pub camera_height: f64,
    /// Mount pitch above horizontal.
    pub camera_angle_deg: f64,
    /// Height of the shooter target above the floor.
    pub target_height: f64,
}

/// Calibration validation errors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("camera_height must be > 0 (got {0})")]
    InvalidCameraHeight(f64),
}

impl CalibrationConstants {
    /// Validate and build calibration constants.
    pub fn new(
        camera_height: f64,
        camera_angle_deg: f64,
        target_height: f64,
    ) -> Result<Self, CalibrationError> {
        let constants = Self {
            camera_height,
            camera_angle_deg,
            target_height,
        };
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), CalibrationError> {
        for (field, value) in [
            ("camera_height", self.camera_height),
            ("camera_angle_deg", self.camera_angle_deg),
            ("target_height", self.target_height),
        ] {
            if !value.is_finite() {
                return Err(CalibrationError::NonFinite { field, value });
            }
        }
        if self.camera_height <= 0.0 {
            return Err(CalibrationError::InvalidCameraHeight(self.camera_height));
        }
        Ok(())
    }
}

/// Known field positions (inches) of the four corner markers.
///
/// These depend on the field being played and have no sensible default.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerAnchors {
    pub marker1: Point2<f64>,
    pub marker2: Point2<f64>,
    pub marker3: Point2<f64>,
    pub marker4: Point2<f64>,
}

impl MarkerAnchors {
    pub fn new(
        marker1: Point2<f64>,
        marker2: Point2<f64>,
        marker3: Point2<f64>,
        marker4: Point2<f64>,
    ) -> Self {
        Self {
            marker1,
            marker2,
            marker3,
            marker4,
        }
    }

    /// Anchor for a corner marker role; `None` for the shooter and fuel targets.
    pub fn anchor(&self, role: TargetRole) -> Option<Point2<f64>> {
        match role {
            TargetRole::ShooterTarget | TargetRole::FuelTarget => None,
            TargetRole::CornerMarker1 => Some(self.marker1),
            TargetRole::CornerMarker2 => Some(self.marker2),
            TargetRole::CornerMarker3 => Some(self.marker3),
            TargetRole::CornerMarker4 => Some(self.marker4),
        }
    }
}
