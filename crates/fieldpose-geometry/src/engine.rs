use fieldpose_core::{
    CalibrationConstants, MarkerAnchors, PipelineId, PoseEstimate, TargetRole, VisionReading,
};
use nalgebra::{Point2, Vector2};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::formulas::{corrected_bearing, heading, marker_distance, shooter_distance};

/// Converts `(active pipeline, reading)` into pose outputs.
///
/// The engine holds only read-only configuration, so every method is a pure
/// function of its arguments: calling it twice with the same inputs returns
/// identical results.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryEngine {
    calibration: CalibrationConstants,
    anchors: MarkerAnchors,
}

impl GeometryEngine {
    pub fn new(calibration: CalibrationConstants, anchors: MarkerAnchors) -> Self {
        Self {
            calibration,
            anchors,
        }
    }

    #[inline]
    pub fn calibration(&self) -> &CalibrationConstants {
        &self.calibration
    }

    #[inline]
    pub fn anchors(&self) -> &MarkerAnchors {
        &self.anchors
    }

    /// Distance (in) to the shooter target. Only for [`TargetRole::ShooterTarget`].
    pub fn distance_to_shooter(
        &self,
        pipeline: PipelineId,
        reading: &VisionReading,
    ) -> Option<f64> {
        match active_role(pipeline, reading)? {
            TargetRole::ShooterTarget => Some(shooter_distance(&self.calibration, reading.angle_y)),
            TargetRole::FuelTarget
            | TargetRole::CornerMarker1
            | TargetRole::CornerMarker2
            | TargetRole::CornerMarker3
            | TargetRole::CornerMarker4 => None,
        }
    }

    /// Ground distance (in) to a corner marker.
    pub fn distance_to_marker(
        &self,
        pipeline: PipelineId,
        reading: &VisionReading,
    ) -> Option<f64> {
        match active_role(pipeline, reading)? {
            TargetRole::ShooterTarget | TargetRole::FuelTarget => None,
            TargetRole::CornerMarker1
            | TargetRole::CornerMarker2
            | TargetRole::CornerMarker3
            | TargetRole::CornerMarker4 => {
                Some(marker_distance(&self.calibration, reading.angle_y))
            }
        }
    }

    /// Robot field position (in), placed around the visible marker's anchor.
    pub fn field_position(
        &self,
        pipeline: PipelineId,
        reading: &VisionReading,
    ) -> Option<Point2<f64>> {
        let role = active_role(pipeline, reading)?;
        let bearing = corrected_bearing(role, reading)?.to_radians();
        let anchor = self.anchors.anchor(role)?;
        let radius = self.distance_to_marker(pipeline, reading)?;
        Some(anchor + Vector2::new(bearing.cos(), bearing.sin()) * radius)
    }

    pub fn field_x(&self, pipeline: PipelineId, reading: &VisionReading) -> Option<f64> {
        self.field_position(pipeline, reading).map(|p| p.x)
    }

    pub fn field_y(&self, pipeline: PipelineId, reading: &VisionReading) -> Option<f64> {
        self.field_position(pipeline, reading).map(|p| p.y)
    }

    /// Absolute robot heading (deg) from a corner marker's skew.
    pub fn heading_deg(&self, pipeline: PipelineId, reading: &VisionReading) -> Option<f64> {
        heading(active_role(pipeline, reading)?, reading.skew)
    }

    /// All outputs for one tick.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self, reading), fields(pipeline = pipeline.index()))
    )]
    pub fn estimate(&self, pipeline: PipelineId, reading: &VisionReading) -> PoseEstimate {
        if !reading.valid {
            return PoseEstimate::UNAVAILABLE;
        }
        let position = self.field_position(pipeline, reading);
        let estimate = PoseEstimate {
            distance_to_shooter: self.distance_to_shooter(pipeline, reading),
            distance_to_marker: self.distance_to_marker(pipeline, reading),
            field_x: position.map(|p| p.x),
            field_y: position.map(|p| p.y),
            heading_deg: self.heading_deg(pipeline, reading),
        };
        if estimate.has_non_finite() {
            log::warn!("non-finite pose output on pipeline {pipeline}: {estimate:?}");
        }
        estimate
    }
}

/// Role whose formulas apply, or `None` for a lost target or a reserved pipeline.
fn active_role(pipeline: PipelineId, reading: &VisionReading) -> Option<TargetRole> {
    if !reading.valid {
        return None;
    }
    TargetRole::from_pipeline(pipeline)
}
