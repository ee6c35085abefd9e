//! JSON command interface.
//!
//! One call takes an analysis kind and a JSON document, and produces one
//! JSON document. Degenerate data and unknown analysis kinds are reported
//! inside the response; only a request that cannot be interpreted fails the
//! call.
//!
//! # Request
//!
//! ```text
//! {
//!   "values":      [number | numeric string | {"value": ...}, ...],   required
//!   "spec_limits": {"min_value": f64?, "max_value": f64?},            optional
//!   "threshold":   f64,                                               optional
//!   "periods":     non-negative integer,                              optional
//!   "config":      EngineConfig                                       optional
//! }
//! ```
//!
//! `specLimits`, `minValue` and `maxValue` are accepted as aliases.
//!
//! # Response
//!
//! ```text
//! {"analysis_type": "...", "input_size": n, "result": {...}}
//! {"analysis_type": "...", "input_size": n, "error": "...", "code": "..."}
//! ```
//!
//! The response carries no clock reading, so the same request always encodes
//! to the same bytes.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::capability::{CapabilityReport, SpecLimits};
use crate::config::EngineConfig;
use crate::detection::AnomalyReport;
use crate::engine::{AnalysisKind, Engine};
use crate::error::{BridgeError, Degenerate};
use crate::forecast::ForecastReport;
use crate::sample::Sample;
use crate::spc::SpcReport;

/// A parsed request document.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Raw submitted entries, coerced into a [`Sample`] before analysis.
    pub values: Vec<Value>,
    /// Specification limits, used by `spc` and `capability`.
    #[serde(default, alias = "specLimits")]
    pub spec_limits: Option<SpecLimits>,
    /// Anomaly threshold override.
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Forecast horizon override.
    #[serde(default)]
    pub periods: Option<usize>,
    /// Engine configuration; defaults apply when absent.
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

impl Request {
    /// Parses a request document.
    pub fn from_json(input: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// The payload of a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    /// Output of [`AnalysisKind::Spc`].
    Spc(SpcReport),
    /// Output of [`AnalysisKind::Capability`].
    Capability(CapabilityReport),
    /// Output of [`AnalysisKind::Anomaly`].
    Anomaly(AnomalyReport),
    /// Output of [`AnalysisKind::Forecast`].
    Forecast(ForecastReport),
}

/// Why a response carries no result.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// The data could not support the analysis.
    Degenerate(Degenerate),
    /// The requested analysis kind does not exist.
    UnknownAnalysis(String),
}

impl Rejection {
    /// Stable machine-readable marker.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::Degenerate(d) => d.code(),
            Rejection::UnknownAnalysis(_) => "unknown_analysis",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Degenerate(d) => fmt::Display::fmt(d, f),
            Rejection::UnknownAnalysis(kind) => write!(f, "Unknown analysis type: {kind}"),
        }
    }
}

impl Serialize for Rejection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rejection::Degenerate(d) => d.serialize(serializer),
            Rejection::UnknownAnalysis(_) => {
                let mut s = serializer.serialize_struct("Rejection", 2)?;
                s.serialize_field("error", &self.to_string())?;
                s.serialize_field("code", self.code())?;
                s.end()
            }
        }
    }
}

/// The response document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// The requested analysis: the canonical name when recognised, the
    /// caller's string otherwise.
    pub analysis_type: String,
    /// Number of raw entries submitted, before coercion.
    pub input_size: usize,
    /// The analysis output, absent when the request was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    /// Why no result was produced.
    #[serde(flatten)]
    pub rejection: Option<Rejection>,
}

impl Response {
    fn new<T>(
        kind: AnalysisKind,
        input_size: usize,
        outcome: Result<T, Degenerate>,
        wrap: impl FnOnce(T) -> AnalysisResult,
    ) -> Self {
        let (result, rejection) = match outcome {
            Ok(report) => (Some(wrap(report)), None),
            Err(d) => {
                warn!(%kind, code = d.code(), "degenerate input: {d}");
                (None, Some(Rejection::Degenerate(d)))
            }
        };
        Self {
            analysis_type: kind.as_str().to_string(),
            input_size,
            result,
            rejection,
        }
    }

    fn unknown(kind: &str, input_size: usize) -> Self {
        warn!(kind, "unknown analysis type");
        Self {
            analysis_type: kind.to_string(),
            input_size,
            result: None,
            rejection: Some(Rejection::UnknownAnalysis(kind.to_string())),
        }
    }

    /// Whether the data could not support the analysis.
    pub fn is_degenerate(&self) -> bool {
        matches!(self.rejection, Some(Rejection::Degenerate(_)))
    }

    /// Whether no result was produced, for any reason.
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// Encodes the response as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, BridgeError> {
        serde_json::to_string_pretty(self).map_err(|e| BridgeError::Encoding(e.to_string()))
    }
}

/// Runs one analysis on an already parsed request.
pub fn dispatch(kind: AnalysisKind, request: &Request) -> Response {
    let engine = Engine::new(request.config.clone().unwrap_or_default());
    let sample = Sample::from_json(&request.values);
    let input_size = request.values.len();
    debug!(%kind, input_size, usable = sample.len(), "dispatching");

    match kind {
        AnalysisKind::Spc => Response::new(
            kind,
            input_size,
            engine.spc(&sample, request.spec_limits.as_ref()),
            AnalysisResult::Spc,
        ),
        AnalysisKind::Capability => {
            let spec = request.spec_limits.unwrap_or_default();
            Response::new(
                kind,
                input_size,
                engine.capability(&sample, &spec),
                AnalysisResult::Capability,
            )
        }
        AnalysisKind::Anomaly => Response::new(
            kind,
            input_size,
            engine.anomalies(&sample, request.threshold),
            AnalysisResult::Anomaly,
        ),
        AnalysisKind::Forecast => Response::new(
            kind,
            input_size,
            engine.forecast(&sample, request.periods),
            AnalysisResult::Forecast,
        ),
    }
}

/// Parses `input`, then runs the analysis named by `kind`.
///
/// An unrecognised `kind` is answered with a response that echoes it and
/// carries an `unknown_analysis` error, like degenerate data.
///
/// # Errors
///
/// [`BridgeError::MalformedInput`] if `input` is not a valid request.
///
/// # Examples
///
/// ```
/// use u_spc::bridge::run;
///
/// let response = run("forecast", r#"{"values": [1, 2, 3, 4, 5], "periods": 3}"#).unwrap();
/// let json = serde_json::to_value(&response).unwrap();
/// assert_eq!(json["result"]["slope"], 1.0);
/// assert_eq!(json["result"]["forecasts"][0]["period"], 6);
///
/// let degenerate = run("anomaly", r#"{"values": [1, 2]}"#).unwrap();
/// assert!(degenerate.is_degenerate());
///
/// let unknown = run("pareto", r#"{"values": [1, 2, 3]}"#).unwrap();
/// assert!(unknown.is_rejected());
///
/// assert!(run("spc", "not json").is_err());
/// ```
pub fn run(kind: &str, input: &str) -> Result<Response, BridgeError> {
    let request = Request::from_json(input)?;
    match kind.parse::<AnalysisKind>() {
        Ok(kind) => Ok(dispatch(kind, &request)),
        Err(_) => Ok(Response::unknown(kind, request.values.len())),
    }
}
