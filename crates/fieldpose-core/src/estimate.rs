use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Per-tick geometry output.
///
/// Each field is `None` when its formula does not apply to the active role or
/// the reading is not valid. `None` never stands for zero.
///
/// Values are not checked for finiteness: a reading at a tangent asymptote
/// yields an infinite or huge distance rather than `None`. Use
/// [`PoseEstimate::has_non_finite`] to detect that case. In JSON an absent
/// field is `null` and a non-finite one is `"inf"`, `"-inf"` or `"nan"`
/// (see [`crate::serde_float`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseEstimate {
    #[serde(default, with = "crate::serde_float")]
    pub distance_to_shooter: Option<f64>,
    #[serde(default, with = "crate::serde_float")]
    pub distance_to_marker: Option<f64>,
    #[serde(default, with = "crate::serde_float")]
    pub field_x: Option<f64>,
    #[serde(default, with = "crate::serde_float")]
    pub field_y: Option<f64>,
    #[serde(default, with = "crate::serde_float")]
    pub heading_deg: Option<f64>,
}

impl PoseEstimate {
    pub const UNAVAILABLE: PoseEstimate = PoseEstimate {
        distance_to_shooter: None,
        distance_to_marker: None,
        field_x: None,
        field_y: None,
        heading_deg: None,
    };

    /// Robot position on the field, when both coordinates are known.
    pub fn field_position(&self) -> Option<Point2<f64>> {
        Some(Point2::new(self.field_x?, self.field_y?))
    }

    /// `true` when no output is available.
    pub fn is_empty(&self) -> bool {
        self.values().all(|v| v.is_none())
    }

    /// `true` when an available output is NaN or infinite.
    pub fn has_non_finite(&self) -> bool {
        self.values().flatten().any(|v| !v.is_finite())
    }

    fn values(&self) -> impl Iterator<Item = Option<f64>> {
        [
            self.distance_to_shooter,
            self.distance_to_marker,
            self.field_x,
            self.field_y,
            self.heading_deg,
        ]
        .into_iter()
    }
}
