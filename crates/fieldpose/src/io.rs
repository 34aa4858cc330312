//! JSON configuration, recorded frames, and replay reports.

use std::{fs, path::Path};

use fieldpose_core::sim::{SensorFrame, SimulatedSensor};
use fieldpose_core::{CalibrationConstants, CalibrationError, MarkerAnchors, VisionSensor};
use fieldpose_geometry::GeometryEngine;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{TickReport, VisionTracker};

#[derive(thiserror::Error, Debug)]
pub enum FieldPoseIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum FieldPoseConfigError {
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error("anchor for {marker} must have finite coordinates")]
    NonFiniteAnchor { marker: &'static str },
}

/// Robot calibration and field anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPoseConfig {
    pub calibration: CalibrationConstants,
    pub anchors: MarkerAnchors,
}

impl FieldPoseConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, FieldPoseIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), FieldPoseIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FieldPoseConfigError> {
        self.calibration.validate()?;
        let anchors = &self.anchors;
        for (marker, anchor) in [
            ("marker1", anchors.marker1),
            ("marker2", anchors.marker2),
            ("marker3", anchors.marker3),
            ("marker4", anchors.marker4),
        ] {
            if !(anchor.x.is_finite() && anchor.y.is_finite()) {
                return Err(FieldPoseConfigError::NonFiniteAnchor { marker });
            }
        }
        Ok(())
    }

    /// Build a geometry engine from the validated config.
    pub fn build_engine(&self) -> Result<GeometryEngine, FieldPoseConfigError> {
        self.validate()?;
        Ok(GeometryEngine::new(self.calibration, self.anchors))
    }

    /// Build a tracker around `sensor`.
    pub fn build_tracker<S: VisionSensor>(
        &self,
        sensor: S,
    ) -> Result<VisionTracker<S>, FieldPoseConfigError> {
        Ok(VisionTracker::new(sensor, self.build_engine()?))
    }
}

/// Recorded sensor frames, one per tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayInput {
    /// Ticks a pipeline select takes to reach the simulated sensor.
    #[serde(default)]
    pub switch_latency_ticks: u32,
    pub frames: Vec<SensorFrame>,
}

impl ReplayInput {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, FieldPoseIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Run one tick per frame against a simulated sensor.
    pub fn replay(
        &self,
        config: &FieldPoseConfig,
    ) -> Result<Vec<TickReport>, FieldPoseConfigError> {
        let sensor =
            SimulatedSensor::new(SensorFrame::empty()).with_latency(self.switch_latency_ticks);
        let mut tracker = config.build_tracker(sensor)?;
        let reports: Vec<TickReport> = self
            .frames
            .iter()
            .map(|frame| {
                tracker.sensor_mut().set_frame(frame.clone());
                let report = tracker.tick();
                let sensor = tracker.sensor_mut();
                sensor.advance_tick();
                sensor.clear_selects();
                report
            })
            .collect();
        let found = reports.iter().filter(|r| r.target_found).count();
        info!("replayed {} frames, target found in {}", reports.len(), found);
        Ok(reports)
    }
}

/// Output of a replay run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    pub config_path: String,
    pub frames_path: String,
    pub ticks: Vec<TickReport>,
}

impl ReplayReport {
    pub fn new(config_path: &Path, frames_path: &Path, ticks: Vec<TickReport>) -> Self {
        Self {
            config_path: config_path.to_string_lossy().into_owned(),
            frames_path: frames_path.to_string_lossy().into_owned(),
            ticks,
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, FieldPoseIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), FieldPoseIoError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, FieldPoseIoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
