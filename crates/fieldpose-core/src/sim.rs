//! In-memory sensor for tests and for replaying recorded frames.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{PipelineId, RawTargetValues, VisionSensor};

/// What the sensor would report for one pipeline if it were selected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineView {
    pub pipeline: PipelineId,
    #[serde(flatten)]
    pub values: RawTargetValues,
}

/// A snapshot of the world as seen through every pipeline.
///
/// Pipelines that are not listed report [`RawTargetValues::NO_TARGET`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorFrame {
    #[serde(default)]
    pub pipelines: Vec<PipelineView>,
}

impl SensorFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add (or replace) the values for one pipeline.
    pub fn with(mut self, pipeline: PipelineId, values: RawTargetValues) -> Self {
        self.pipelines.retain(|view| view.pipeline != pipeline);
        self.pipelines.push(PipelineView { pipeline, values });
        self
    }

    /// Frame where pipeline `i` sees a target iff `valid[i]` is true.
    ///
    /// Entries past [`PipelineId::LAST`] are ignored.
    pub fn from_validity(valid: &[bool]) -> Self {
        valid
            .iter()
            .zip(PipelineId::all())
            .filter(|(v, _)| **v)
            .fold(Self::empty(), |frame, (_, pipeline)| {
                frame.with(
                    pipeline,
                    RawTargetValues {
                        tv: 1.0,
                        ..RawTargetValues::NO_TARGET
                    },
                )
            })
    }

    pub fn values(&self, pipeline: PipelineId) -> RawTargetValues {
        self.pipelines
            .iter()
            .find(|view| view.pipeline == pipeline)
            .map(|view| view.values)
            .unwrap_or(RawTargetValues::NO_TARGET)
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingSelect {
    remaining: u32,
    pipeline: PipelineId,
}

/// Simulated sensor backed by a [`SensorFrame`].
///
/// With a switch latency of `n` ticks, a select only takes effect after `n`
/// calls to [`SimulatedSensor::advance_tick`]; until then reads keep reporting
/// the previously selected pipeline. Every select is recorded.
///
/// Nothing is dropped on its own: with latency above zero, queued selects
/// pile up until `advance_tick` is called, and the select log grows until
/// [`SimulatedSensor::clear_selects`]. Long-running drivers (benches, replay)
/// should call both once per tick.
#[derive(Clone, Debug)]
pub struct SimulatedSensor {
    frame: SensorFrame,
    selected: PipelineId,
    latency_ticks: u32,
    pending: VecDeque<PendingSelect>,
    selects: Vec<PipelineId>,
}

impl SimulatedSensor {
    pub fn new(frame: SensorFrame) -> Self {
        Self {
            frame,
            selected: PipelineId::FIRST,
            latency_ticks: 0,
            pending: VecDeque::new(),
            selects: Vec::new(),
        }
    }

    pub fn with_latency(mut self, ticks: u32) -> Self {
        self.latency_ticks = ticks;
        self
    }

    /// Start with `pipeline` already selected.
    pub fn with_selected(mut self, pipeline: PipelineId) -> Self {
        self.selected = pipeline;
        self
    }

    /// Replace the world snapshot, e.g. with the next recorded frame.
    pub fn set_frame(&mut self, frame: SensorFrame) {
        self.frame = frame;
    }

    pub fn frame(&self) -> &SensorFrame {
        &self.frame
    }

    /// Pipeline whose values reads currently return.
    pub fn selected(&self) -> PipelineId {
        self.selected
    }

    /// Every pipeline passed to `set_pipeline`, in call order.
    pub fn selects(&self) -> &[PipelineId] {
        &self.selects
    }

    pub fn clear_selects(&mut self) {
        self.selects.clear();
    }

    /// Let one tick of switching latency elapse.
    pub fn advance_tick(&mut self) {
        for pending in &mut self.pending {
            pending.remaining = pending.remaining.saturating_sub(1);
        }
        while let Some(front) = self.pending.front() {
            if front.remaining > 0 {
                break;
            }
            self.selected = front.pipeline;
            self.pending.pop_front();
        }
    }

    fn current(&self) -> RawTargetValues {
        self.frame.values(self.selected)
    }
}

impl VisionSensor for SimulatedSensor {
    fn set_pipeline(&mut self, pipeline: PipelineId) {
        self.selects.push(pipeline);
        if self.latency_ticks == 0 {
            self.selected = pipeline;
        } else {
            self.pending.push_back(PendingSelect {
                remaining: self.latency_ticks,
                pipeline,
            });
        }
    }

    fn tx(&self) -> f64 {
        self.current().tx
    }

    fn ty(&self) -> f64 {
        self.current().ty
    }

    fn ts(&self) -> f64 {
        self.current().ts
    }

    fn tv(&self) -> f64 {
        self.current().tv
    }

    fn active_pipeline(&self) -> Option<PipelineId> {
        Some(self.selected)
    }
}
