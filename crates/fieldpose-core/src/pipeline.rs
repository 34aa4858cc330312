use serde::{Deserialize, Serialize};

/// Index of a sensor-side target-detection pipeline.
///
/// The sensor exposes pipelines `0..=10`. Only `0..=5` carry a [`TargetRole`];
/// `6..=10` are reserved and can still be selected by a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PipelineId(u8);

/// Pipeline id construction errors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineIdError {
    #[error("pipeline id {0} is outside 0..=10")]
    OutOfRange(i64),
}

impl PipelineId {
    pub const FIRST: PipelineId = PipelineId(0);
    pub const LAST: PipelineId = PipelineId(10);

    /// Number of selectable pipelines.
    pub const COUNT: usize = Self::LAST.0 as usize + 1;

    /// Build a pipeline id, or `None` when `index` is past [`PipelineId::LAST`].
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index <= Self::LAST.0 {
            Some(Self(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// All pipeline ids in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = PipelineId> + ExactSizeIterator {
        (Self::FIRST.0..=Self::LAST.0).map(PipelineId)
    }

    /// Role assigned to this pipeline, if any.
    #[inline]
    pub fn role(self) -> Option<TargetRole> {
        TargetRole::from_pipeline(self)
    }
}

impl TryFrom<u8> for PipelineId {
    type Error = PipelineIdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PipelineId::new(value).ok_or(PipelineIdError::OutOfRange(i64::from(value)))
    }
}

impl TryFrom<i64> for PipelineId {
    type Error = PipelineIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(PipelineId::new)
            .ok_or(PipelineIdError::OutOfRange(value))
    }
}

impl From<PipelineId> for u8 {
    fn from(id: PipelineId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PipelineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semantic meaning of a pipeline.
///
/// Looking down on the field with the initiation line to the south, the corner
/// markers sit at:
///
/// ```text
/// 2|                 N                 |3
///  W                                   E
/// 1|_________________S_________________|4
/// ```
///
/// Markers 1 and 3 face one way, 2 and 4 the other; see
/// `fieldpose_geometry::corrected_bearing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRole {
    ShooterTarget,
    FuelTarget,
    CornerMarker1,
    CornerMarker2,
    CornerMarker3,
    CornerMarker4,
}

impl TargetRole {
    pub const ALL: [TargetRole; 6] = [
        TargetRole::ShooterTarget,
        TargetRole::FuelTarget,
        TargetRole::CornerMarker1,
        TargetRole::CornerMarker2,
        TargetRole::CornerMarker3,
        TargetRole::CornerMarker4,
    ];

    /// Role for a pipeline; `None` for the reserved ids `6..=10`.
    pub fn from_pipeline(pipeline: PipelineId) -> Option<Self> {
        Self::ALL.get(usize::from(pipeline.index())).copied()
    }

    /// Pipeline that detects this role.
    pub fn pipeline(self) -> PipelineId {
        let index = match self {
            TargetRole::ShooterTarget => 0,
            TargetRole::FuelTarget => 1,
            TargetRole::CornerMarker1 => 2,
            TargetRole::CornerMarker2 => 3,
            TargetRole::CornerMarker3 => 4,
            TargetRole::CornerMarker4 => 5,
        };
        PipelineId(index)
    }

    #[inline]
    pub fn is_corner_marker(self) -> bool {
        !matches!(self, TargetRole::ShooterTarget | TargetRole::FuelTarget)
    }
}
