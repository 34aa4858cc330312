use serde::{Deserialize, Serialize};

/// Raw values the sensor transport reports for one pipeline.
///
/// Field names follow the transport: `tx`/`ty` are horizontal/vertical offset
/// angles, `ts` is skew, `tv` is non-zero when a target is detected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTargetValues {
    #[serde(default)]
    pub tx: f64,
    #[serde(default)]
    pub ty: f64,
    #[serde(default)]
    pub ts: f64,
    #[serde(default)]
    pub tv: f64,
}

impl RawTargetValues {
    /// Values reported when the selected pipeline sees nothing.
    pub const NO_TARGET: RawTargetValues = RawTargetValues {
        tx: 0.0,
        ty: 0.0,
        ts: 0.0,
        tv: 0.0,
    };

    #[inline]
    pub fn has_target(&self) -> bool {
        self.tv != 0.0
    }
}

impl From<RawTargetValues> for VisionReading {
    fn from(raw: RawTargetValues) -> Self {
        VisionReading {
            angle_x: raw.tx,
            angle_y: raw.ty,
            skew: raw.ts,
            valid: raw.has_target(),
        }
    }
}

/// One tick's snapshot of the sensor, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisionReading {
    /// Horizontal offset from the crosshair to the target.
    pub angle_x: f64,
    /// Vertical offset from the crosshair to the target.
    pub angle_y: f64,
    /// Rotation of the target's bounding shape.
    pub skew: f64,
    /// Whether the active pipeline currently detects a target.
    pub valid: bool,
}

impl VisionReading {
    pub fn new(angle_x: f64, angle_y: f64, skew: f64, valid: bool) -> Self {
        Self {
            angle_x,
            angle_y,
            skew,
            valid,
        }
    }

    /// Reading reported when no target is visible.
    pub fn lost() -> Self {
        RawTargetValues::NO_TARGET.into()
    }

    /// Horizontal offset to steer toward, only while a target is visible.
    #[inline]
    pub fn aim_offset(&self) -> Option<f64> {
        self.valid.then_some(self.angle_x)
    }
}
