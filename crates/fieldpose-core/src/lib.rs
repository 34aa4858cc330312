//! Core types for vision-based target acquisition and field pose estimation.
//!
//! This crate holds the data model shared by the pipeline scanner and the
//! geometry engine, plus the [`VisionSensor`] boundary they are built against.
//! It does *not* talk to any concrete sensor transport.

mod calibration;
mod estimate;
mod pipeline;
mod reading;
mod sensor;
pub mod serde_float;
pub mod sim;

pub use calibration::{CalibrationConstants, CalibrationError, MarkerAnchors};
pub use estimate::PoseEstimate;
pub use pipeline::{PipelineId, PipelineIdError, TargetRole};
pub use reading::{RawTargetValues, VisionReading};
pub use sensor::VisionSensor;
