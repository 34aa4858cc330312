use fieldpose_core::{PipelineId, PoseEstimate, TargetRole, VisionReading, VisionSensor};
use fieldpose_geometry::GeometryEngine;
use fieldpose_scanner::PipelineScanner;
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Everything produced by one control-loop tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Zero-based tick counter.
    pub tick: u64,
    /// Pipeline left active by the scan.
    pub pipeline: PipelineId,
    pub role: Option<TargetRole>,
    /// Validity flag of the reading sampled after the scan.
    pub target_found: bool,
    /// Pipeline selects issued during this tick's scan.
    pub selects: usize,
    pub reading: VisionReading,
    /// Horizontal offset to steer toward; `None` without a target.
    #[serde(default, with = "fieldpose_core::serde_float")]
    pub aim_offset: Option<f64>,
    pub estimate: PoseEstimate,
    /// Set when an estimate field is NaN or infinite.
    pub non_finite: bool,
}

/// Scan-then-compute loop driven by an external scheduler.
///
/// Call [`VisionTracker::tick`] once per control-loop period. A tick never
/// blocks; its outputs depend only on what the sensor reports during it.
#[derive(Debug)]
pub struct VisionTracker<S> {
    scanner: PipelineScanner<S>,
    engine: GeometryEngine,
    ticks: u64,
    last: Option<TickReport>,
}

impl<S: VisionSensor> VisionTracker<S> {
    pub fn new(sensor: S, engine: GeometryEngine) -> Self {
        Self {
            scanner: PipelineScanner::new(sensor),
            engine,
            ticks: 0,
            last: None,
        }
    }

    /// Run one scan, sample the sensor once, and compute the pose.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(tick = self.ticks)))]
    pub fn tick(&mut self) -> TickReport {
        let outcome = self.scanner.scan();
        let reading = self.scanner.sensor().reading();
        let estimate = self.engine.estimate(outcome.active, &reading);

        let report = TickReport {
            tick: self.ticks,
            pipeline: outcome.active,
            role: outcome.active.role(),
            target_found: reading.valid,
            selects: outcome.selects,
            reading,
            aim_offset: reading.aim_offset(),
            estimate,
            non_finite: estimate.has_non_finite(),
        };
        debug!(
            "tick {}: pipeline {} role {:?} valid {} estimate {:?}",
            report.tick, report.pipeline, report.role, report.target_found, estimate
        );

        self.ticks += 1;
        self.last = Some(report);
        report
    }

    /// Report from the most recent tick.
    pub fn last_report(&self) -> Option<&TickReport> {
        self.last.as_ref()
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn scanner(&self) -> &PipelineScanner<S> {
        &self.scanner
    }

    pub fn engine(&self) -> &GeometryEngine {
        &self.engine
    }

    pub fn sensor(&self) -> &S {
        self.scanner.sensor()
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        self.scanner.sensor_mut()
    }

    pub fn into_sensor(self) -> S {
        self.scanner.into_sensor()
    }
}
