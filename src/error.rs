//! Failure tiers.
//!
//! Two tiers:
//!
//! - [`Degenerate`]: the data cannot support the statistic (empty sample,
//!   too few points, a horizon too long to extrapolate). Reported inside a
//!   well-formed result, never raised.
//! - [`BridgeError`]: the request itself cannot be interpreted. This is the
//!   only hard failure.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Data-insufficiency marker returned in place of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degenerate {
    /// No usable value remained after coercion.
    NoUsableData,
    /// Fewer usable values than the analysis needs.
    InsufficientData {
        /// Minimum number of values required.
        required: usize,
        /// Number of usable values supplied.
        found: usize,
    },
    /// More forecast periods requested than a single call extrapolates.
    HorizonTooLong {
        /// Largest accepted horizon.
        max: usize,
        /// Requested horizon.
        requested: usize,
    },
}

impl Degenerate {
    /// Stable machine-readable marker.
    pub fn code(&self) -> &'static str {
        match self {
            Degenerate::NoUsableData => "no_usable_data",
            Degenerate::InsufficientData { .. } => "insufficient_data",
            Degenerate::HorizonTooLong { .. } => "horizon_too_long",
        }
    }

    /// Marker for a sample of `found` values against a minimum of `required`.
    ///
    /// An empty sample is always [`Degenerate::NoUsableData`].
    pub fn for_len(required: usize, found: usize) -> Self {
        if found == 0 {
            Degenerate::NoUsableData
        } else {
            Degenerate::InsufficientData { required, found }
        }
    }
}

impl fmt::Display for Degenerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degenerate::NoUsableData => write!(f, "no usable data"),
            Degenerate::InsufficientData { required, found } => write!(
                f,
                "insufficient data: need at least {required} values, got {found}"
            ),
            Degenerate::HorizonTooLong { max, requested } => write!(
                f,
                "forecast horizon too long: {requested} periods requested, at most {max}"
            ),
        }
    }
}

impl Serialize for Degenerate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Degenerate", 2)?;
        s.serialize_field("error", &self.to_string())?;
        s.serialize_field("code", self.code())?;
        s.end()
    }
}

/// Hard failure of the command interface.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The input is not valid JSON or not the expected structure.
    #[error("Invalid JSON: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// The requested analysis kind is not one of the supported ones.
    #[error("Unknown analysis type: {0}")]
    UnknownAnalysis(String),

    /// The response could not be encoded.
    #[error("Encoding error: {0}")]
    Encoding(String),
}
