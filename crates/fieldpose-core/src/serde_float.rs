//! Serde adapter for `Option<f64>` fields that may hold NaN or infinity.
//!
//! JSON has no encoding for non-finite numbers and `serde_json` writes them as
//! `null`, which is also how `None` is written. This adapter keeps the two
//! apart: `None` is `null`, finite values are plain numbers, and non-finite
//! values are the strings `"inf"`, `"-inf"` and `"nan"`.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Sample {
//!     #[serde(default, with = "fieldpose_core::serde_float")]
//!     value: Option<f64>,
//! }
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

const INF: &str = "inf";
const NEG_INF: &str = "-inf";
const NAN: &str = "nan";

pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match *value {
        None => serializer.serialize_none(),
        Some(v) if v.is_finite() => serializer.serialize_some(&v),
        Some(v) if v.is_nan() => serializer.serialize_some(NAN),
        Some(v) if v > 0.0 => serializer.serialize_some(INF),
        Some(_) => serializer.serialize_some(NEG_INF),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Repr::Number(v)) => Ok(Some(v)),
        Some(Repr::Text(text)) => match text.as_str() {
            INF => Ok(Some(f64::INFINITY)),
            NEG_INF => Ok(Some(f64::NEG_INFINITY)),
            NAN => Ok(Some(f64::NAN)),
            other => Err(D::Error::custom(format!(
                "expected a number, null, \"{INF}\", \"{NEG_INF}\" or \"{NAN}\", got \"{other}\""
            ))),
        },
    }
}
