//! Vision target acquisition and field pose estimation.
//!
//! This crate provides:
//! - re-exports of the `fieldpose-*` crates,
//! - [`VisionTracker`], the per-tick scan-then-compute loop,
//! - JSON configuration and replay helpers ([`io`]),
//! - the `fieldpose` CLI (feature `cli`).
//!
//! ## Quickstart
//!
//! ```
//! use fieldpose::core::sim::{SensorFrame, SimulatedSensor};
//! use fieldpose::core::{RawTargetValues, TargetRole};
//! use fieldpose::FieldPoseConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg: FieldPoseConfig = serde_json::from_str(r#"{
//!     "calibration": { "camera_height": 20.0, "camera_angle_deg": 20.0, "target_height": 90.0 },
//!     "anchors": { "marker1": [0, 0], "marker2": [0, 323], "marker3": [629, 323], "marker4": [629, 0] }
//! }"#)?;
//!
//! let frame = SensorFrame::empty().with(
//!     TargetRole::CornerMarker1.pipeline(),
//!     RawTargetValues { tx: 5.0, ty: 30.0, ts: 10.0, tv: 1.0 },
//! );
//! let mut tracker = cfg.build_tracker(SimulatedSensor::new(frame))?;
//!
//! let report = tracker.tick();
//! assert_eq!(report.estimate.heading_deg, Some(260.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `fieldpose::core`: pipelines, roles, readings, calibration, the sensor trait.
//! - `fieldpose::geometry`: distance, field position and heading formulas.
//! - `fieldpose::scanner`: pipeline scanning.

pub use fieldpose_core as core;
pub use fieldpose_geometry as geometry;
pub use fieldpose_scanner as scanner;

pub use fieldpose_core::{
    CalibrationConstants, MarkerAnchors, PipelineId, PoseEstimate, TargetRole, VisionReading,
    VisionSensor,
};
pub use fieldpose_geometry::GeometryEngine;
pub use fieldpose_scanner::{PipelineScanner, ScanOutcome};

mod error;
pub mod io;
mod tracker;

pub use error::FieldPoseError;
pub use io::{FieldPoseConfig, FieldPoseConfigError, FieldPoseIoError, ReplayInput, ReplayReport};
pub use tracker::{TickReport, VisionTracker};
