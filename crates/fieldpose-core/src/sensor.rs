//! Boundary to the vision sensor transport.

use crate::{PipelineId, VisionReading};

/// A vision sensor that reports one target at a time for its selected pipeline.
///
/// Implementations must not block: reads return the most recently received
/// values, and [`VisionSensor::set_pipeline`] is fire-and-forget. A sensor with
/// switching latency may keep reporting the previous pipeline's values for a
/// while after a select.
pub trait VisionSensor {
    /// Request a pipeline switch. No acknowledgment is awaited.
    fn set_pipeline(&mut self, pipeline: PipelineId);

    /// Horizontal offset angle (deg).
    fn tx(&self) -> f64;

    /// Vertical offset angle (deg).
    fn ty(&self) -> f64;

    /// Skew angle (deg).
    fn ts(&self) -> f64;

    /// Validity flag; non-zero means a target is detected.
    fn tv(&self) -> f64;

    /// Pipeline the sensor reports as active, if the transport exposes it.
    fn active_pipeline(&self) -> Option<PipelineId> {
        None
    }

    #[inline]
    fn has_target(&self) -> bool {
        self.tv() != 0.0
    }

    /// Sample all four values into one snapshot.
    fn reading(&self) -> VisionReading {
        VisionReading::new(self.tx(), self.ty(), self.ts(), self.has_target())
    }
}

impl<S: VisionSensor + ?Sized> VisionSensor for &mut S {
    fn set_pipeline(&mut self, pipeline: PipelineId) {
        (**self).set_pipeline(pipeline)
    }

    fn tx(&self) -> f64 {
        (**self).tx()
    }

    fn ty(&self) -> f64 {
        (**self).ty()
    }

    fn ts(&self) -> f64 {
        (**self).ts()
    }

    fn tv(&self) -> f64 {
        (**self).tv()
    }

    fn active_pipeline(&self) -> Option<PipelineId> {
        (**self).active_pipeline()
    }

    fn has_target(&self) -> bool {
        (**self).has_target()
    }

    fn reading(&self) -> VisionReading {
        (**self).reading()
    }
}

impl<S: VisionSensor + ?Sized> VisionSensor for Box<S> {
    fn set_pipeline(&mut self, pipeline: PipelineId) {
        (**self).set_pipeline(pipeline)
    }

    fn tx(&self) -> f64 {
        (**self).tx()
    }

    fn ty(&self) -> f64 {
        (**self).ty()
    }

    fn ts(&self) -> f64 {
        (**self).ts()
    }

    fn tv(&self) -> f64 {
        (**self).tv()
    }

    fn active_pipeline(&self) -> Option<PipelineId> {
        (**self).active_pipeline()
    }

    fn has_target(&self) -> bool {
        (**self).has_target()
    }

    fn reading(&self) -> VisionReading {
        (**self).reading()
    }
}
