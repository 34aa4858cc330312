//! Geometry engine: turns one vision reading into distances and a field pose.
//!
//! The active pipeline's [`TargetRole`](fieldpose_core::TargetRole) selects
//! which formulas apply:
//!
//! | role | distance to shooter | distance to marker | field x/y | heading |
//! |------|:---:|:---:|:---:|:---:|
//! | shooter target | yes | | | |
//! | fuel target | | | | |
//! | corner markers 1-4 | | yes | yes | yes |
//!
//! Reserved pipelines and readings without a valid target produce
//! [`PoseEstimate::UNAVAILABLE`](fieldpose_core::PoseEstimate::UNAVAILABLE).

mod engine;
pub mod formulas;

pub use engine::GeometryEngine;
pub use formulas::corrected_bearing;
