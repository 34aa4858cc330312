//! Pipeline scanner.
//!
//! Finds a pipeline with a currently valid target by selecting pipelines
//! `0..=10` in order on the sensor and checking its validity flag after each
//! select. One scan completes within a single control-loop tick.

mod scanner;

pub use scanner::{PipelineScanner, ScanOutcome};
