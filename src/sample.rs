//! Measurement samples and value extraction.
//!
//! A [`Sample`] is the ordered sequence of usable measurements an analysis
//! runs over. Entries that cannot be read as a finite number are dropped
//! before any statistic is computed; dropping is never an error.

use serde_json::Value;
use tracing::debug;

/// An ordered sequence of finite measurements.
///
/// The index of a value is its position among the retained values, in
/// submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
    dropped: usize,
}

impl Sample {
    /// Builds a sample from raw numbers, dropping NaN and infinities.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_spc::sample::Sample;
    ///
    /// let s = Sample::from_values(vec![1.0, f64::NAN, 3.0]);
    /// assert_eq!(s.values(), &[1.0, 3.0]);
    /// assert_eq!(s.dropped(), 1);
    /// ```
    pub fn from_values(raw: Vec<f64>) -> Self {
        let total = raw.len();
        let values: Vec<f64> = raw.into_iter().filter(|v| v.is_finite()).collect();
        let dropped = total - values.len();
        if dropped > 0 {
            debug!(dropped, kept = values.len(), "dropped non-finite values");
        }
        Self { values, dropped }
    }

    /// Builds a sample from loosely typed JSON entries.
    ///
    /// Accepted entries:
    ///
    /// - numbers
    /// - strings holding a number (surrounding whitespace ignored)
    /// - objects with a `"value"` field that is a number or numeric string;
    ///   all other fields are ignored
    ///
    /// Everything else is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use u_spc::sample::Sample;
    ///
    /// let raw = json!([1, "2.5", {"value": 3, "date": "2024-01-01"}, null, "abc"]);
    /// let s = Sample::from_json(raw.as_array().unwrap());
    /// assert_eq!(s.values(), &[1.0, 2.5, 3.0]);
    /// assert_eq!(s.dropped(), 2);
    /// ```
    pub fn from_json(raw: &[Value]) -> Self {
        let values: Vec<f64> = raw.iter().filter_map(coerce_entry).collect();
        let dropped = raw.len() - values.len();
        if dropped > 0 {
            debug!(dropped, kept = values.len(), "dropped non-numeric entries");
        }
        Self { values, dropped }
    }

    /// The usable values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of usable values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no usable value remains.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of submitted entries that were not usable.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl From<Vec<f64>> for Sample {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

impl From<&[f64]> for Sample {
    fn from(values: &[f64]) -> Self {
        Self::from_values(values.to_vec())
    }
}

fn coerce_entry(entry: &Value) -> Option<f64> {
    match entry {
        Value::Object(fields) => fields.get("value").and_then(coerce_scalar),
        other => coerce_scalar(other),
    }
}

fn coerce_scalar(entry: &Value) -> Option<f64> {
    let v = match entry {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}
