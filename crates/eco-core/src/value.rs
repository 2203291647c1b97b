//! Payload values carried on bus channels and stored in data points.

use serde::{Deserialize, Serialize};

/// A scalar reading or a normalized sensor frame.
///
/// Raw byte-array payloads (e.g. spectral frames) are normalized to a
/// sequence of small integers so they serialize uniformly (a JSON array of
/// numbers) and can be compared against the previously written frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Sequence(Vec<u8>),
}

impl Value {
    pub fn scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    /// Normalize a raw byte frame into a sequence payload.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::Sequence(bytes.to_vec())
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Sequence(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}
