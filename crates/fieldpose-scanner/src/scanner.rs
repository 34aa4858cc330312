use fieldpose_core::{PipelineId, VisionSensor};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Result of one scan pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutcome {
    /// Pipeline left selected on the sensor.
    pub active: PipelineId,
    /// Whether the validity flag was set when the scan stopped.
    pub target_found: bool,
    /// Number of pipeline-select commands sent.
    pub selects: usize,
}

/// Drives a sensor through its pipelines until one reports a target.
///
/// The scanner owns the sensor so that it is the only writer of the sensor's
/// pipeline selection.
#[derive(Debug)]
pub struct PipelineScanner<S> {
    sensor: S,
    active: PipelineId,
}

impl<S: VisionSensor> PipelineScanner<S> {
    /// Wrap a sensor. The active pipeline starts as the sensor's own readback,
    /// or [`PipelineId::FIRST`] when it has none.
    pub fn new(sensor: S) -> Self {
        let active = sensor.active_pipeline().unwrap_or(PipelineId::FIRST);
        Self { sensor, active }
    }

    /// Pipeline most recently selected by this scanner.
    #[inline]
    pub fn active(&self) -> PipelineId {
        self.active
    }

    #[inline]
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    #[inline]
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn into_sensor(self) -> S {
        self.sensor
    }

    /// Select pipelines in ascending order and stop at the first one whose
    /// validity flag is set.
    ///
    /// The flag is read right after each select without waiting for the sensor
    /// to switch, so a sensor with switching latency may answer for the
    /// previously selected pipeline. When nothing is found the last pipeline
    /// stays selected and `target_found` is `false`.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn scan(&mut self) -> ScanOutcome {
        let mut selects = 0;
        for pipeline in PipelineId::all() {
            self.sensor.set_pipeline(pipeline);
            self.active = pipeline;
            selects += 1;
            trace!("selected pipeline {pipeline}");
            if self.sensor.has_target() {
                debug!("target found on pipeline {pipeline} after {selects} selects");
                return ScanOutcome {
                    active: pipeline,
                    target_found: true,
                    selects,
                };
            }
        }
        debug!(
            "no target on pipelines {}..={}, leaving {} selected",
            PipelineId::FIRST,
            PipelineId::LAST,
            self.active
        );
        ScanOutcome {
            active: self.active,
            target_found: false,
            selects,
        }
    }

    /// Scan and return the pipeline left active.
    ///
    /// The returned id alone does not mean a target is visible; re-check the
    /// reading's validity.
    pub fn scan_for_target(&mut self) -> PipelineId {
        self.scan().active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldpose_core::sim::{SensorFrame, SimulatedSensor};

    fn ids(indices: &[u8]) -> Vec<PipelineId> {
        indices
            .iter()
            .map(|&i| PipelineId::new(i).unwrap())
            .collect()
    }

    #[test]
    fn stops_at_first_valid_pipeline() {
        let frame = SensorFrame::from_validity(&[false, false, false, true, false, true]);
        let mut scanner = PipelineScanner::new(SimulatedSensor::new(frame));

        assert_eq!(scanner.scan_for_target(), PipelineId::new(3).unwrap());
        assert_eq!(scanner.sensor().selects(), ids(&[0, 1, 2, 3]).as_slice());
        assert_eq!(scanner.active(), PipelineId::new(3).unwrap());
    }

    #[test]
    fn exhausted_scan_leaves_last_pipeline_selected() {
        let mut scanner = PipelineScanner::new(SimulatedSensor::new(SensorFrame::empty()));

        let outcome = scanner.scan();
        assert_eq!(
            outcome,
            ScanOutcome {
                active: PipelineId::LAST,
                target_found: false,
                selects: 11,
            }
        );
        assert_eq!(
            scanner.sensor().selects(),
            ids(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).as_slice()
        );
        assert_eq!(scanner.sensor().selected(), PipelineId::LAST);
    }

    #[test]
    fn target_on_first_pipeline_needs_one_select() {
        let frame = SensorFrame::from_validity(&[true]);
        let mut scanner = PipelineScanner::new(SimulatedSensor::new(frame));
        let outcome = scanner.scan();
        assert_eq!(outcome.active, PipelineId::FIRST);
        assert_eq!(outcome.selects, 1);
        assert!(outcome.target_found);
    }

    #[test]
    fn reserved_pipelines_are_scanned_too() {
        let mut validity = [false; 11];
        validity[8] = true;
        let frame = SensorFrame::from_validity(&validity);
        let mut scanner = PipelineScanner::new(SimulatedSensor::new(frame));
        assert_eq!(scanner.scan_for_target(), PipelineId::new(8).unwrap());
    }

    #[test]
    fn every_scan_restarts_from_first_pipeline() {
        let frame = SensorFrame::from_validity(&[false, true]);
        let mut scanner = PipelineScanner::new(SimulatedSensor::new(frame));
        scanner.scan();
        scanner.sensor_mut().clear_selects();
        scanner.scan();
        assert_eq!(scanner.sensor().selects(), ids(&[0, 1]).as_slice());
    }

    #[test]
    fn initial_active_comes_from_sensor_readback() {
        let sensor = SimulatedSensor::new(SensorFrame::empty())
            .with_selected(PipelineId::new(4).unwrap());
        let scanner = PipelineScanner::new(sensor);
        assert_eq!(scanner.active(), PipelineId::new(4).unwrap());
    }

    #[test]
    fn switching_latency_makes_validity_lag_the_select() {
        // Pipeline 0 is selected and sees a target; pipeline 2 does too.
        let frame = SensorFrame::from_validity(&[true, false, true]);
        let sensor = SimulatedSensor::new(frame).with_latency(1);
        let mut scanner = PipelineScanner::new(sensor);

        // The first select has not applied yet, so pipeline 0's stale flag wins.
        let outcome = scanner.scan();
        assert_eq!(outcome.active, PipelineId::FIRST);
        assert!(outcome.target_found);

        // Move the real sensor onto pipeline 1 (no target) and let it settle.
        scanner.sensor_mut().set_pipeline(PipelineId::new(1).unwrap());
        scanner.sensor_mut().advance_tick();
        scanner.sensor_mut().clear_selects();

        // Reads still report pipeline 1 during the scan, so nothing is found
        // even though pipelines 0 and 2 both see a target.
        let outcome = scanner.scan();
        assert!(!outcome.target_found);
        assert_eq!(outcome.active, PipelineId::LAST);
        assert_eq!(outcome.selects, PipelineId::COUNT);
    }

    #[test]
    fn scanner_can_borrow_the_sensor() {
        let mut sensor = SimulatedSensor::new(SensorFrame::from_validity(&[false, true]));
        {
            let mut scanner = PipelineScanner::new(&mut sensor);
            assert_eq!(scanner.scan_for_target(), PipelineId::new(1).unwrap());
        }
        assert_eq!(sensor.selects().len(), 2);
    }
}
