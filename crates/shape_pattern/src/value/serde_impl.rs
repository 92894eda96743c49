//! Interop between `Value` and serde data.
//!
//! Conversion goes through `serde_json::Value`, which already models the same
//! JSON-like shapes. Two lossy edges exist: non-finite numbers become `null`
//! on the way out (JSON has no NaN or infinity), and integers past 2^53 round
//! on the way in (there is one `f64` numeric kind).

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Record, Value};
use crate::errors::ValueError;

/// Largest magnitude below which every integral `f64` is an exact integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Value {
    /// Build a value from anything serde can serialize.
    ///
    /// ```text
    /// let value = Value::from_serialize(&Blog { id: 1, title: "a".into() })?;
    /// ```
    pub fn from_serialize<S: Serialize + ?Sized>(source: &S) -> Result<Self, ValueError> {
        serde_json::to_value(source)
            .map(Value::from)
            .map_err(ValueError::Serialize)
    }

    /// Decode this value into a concrete type.
    ///
    /// Integral numbers are presented to the deserializer as integers, so a
    /// `Number(1.0)` decodes into `u32` as well as `f64`.
    pub fn deserialize_into<U: DeserializeOwned>(&self) -> Result<U, ValueError> {
        serde_json::from_value(serde_json::Value::from(self)).map_err(ValueError::Deserialize)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::string(s),
            serde_json::Value::Array(items) => {
                Value::list(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::from_record(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, Value::from(value)))
                    .collect::<Record>(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::Str(s) => serde_json::Value::String(s.to_string()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Record(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "guarded: integral and within the exact-integer range"
)]
fn number_to_json(n: f64) -> serde_json::Value {
    // -0.0 keeps its sign only as a float.
    let negative_zero = n == 0.0 && n.is_sign_negative();
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER && !negative_zero {
        return serde_json::Value::Number((n as i64).into());
    }
    serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}
