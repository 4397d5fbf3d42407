use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::format::format_number;
use crate::error::{ChartError, ChartResult};

/// One data row: field name to untyped scalar, in insertion order.
pub type Row = IndexMap<String, Value>;

/// Largest absolute epoch-millis value accepted as a valid timestamp.
pub const MAX_TIMESTAMP_MILLIS: f64 = 8.64e15;

const NAIVE_DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const NAIVE_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Untyped scalar stored in a [`Row`].
///
/// JSON input never produces `Date`; date-like strings stay `Text` and are
/// recognized lazily by axis inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "JsonScalar")]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonScalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<JsonScalar> for Value {
    fn from(value: JsonScalar) -> Self {
        match value {
            JsonScalar::Null => Self::Null,
            JsonScalar::Bool(v) => Self::Bool(v),
            JsonScalar::Number(v) => Self::Number(v),
            JsonScalar::Text(v) => Self::Text(v),
        }
    }
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns the raw number for `Number` values, including non-finite ones.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Resolves the value as a timestamp in epoch milliseconds.
    ///
    /// Native dates, parseable date strings and finite numbers inside the
    /// representable timestamp range are accepted.
    #[must_use]
    pub fn to_epoch_millis(&self) -> Option<f64> {
        match self {
            Self::Date(time) => Some(time.timestamp_millis() as f64),
            Self::Number(v) if v.is_finite() && v.abs() <= MAX_TIMESTAMP_MILLIS => Some(*v),
            Self::Text(text) => parse_date_str(text).map(|time| time.timestamp_millis() as f64),
            _ => None,
        }
    }

    /// Numeric coercion used by numeric axes; unconvertible values become NaN.
    #[must_use]
    pub fn to_numeric(&self) -> f64 {
        match self {
            Self::Null => f64::NAN,
            Self::Bool(v) => f64::from(u8::from(*v)),
            Self::Number(v) => *v,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            Self::Date(time) => time.timestamp_millis() as f64,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Number(v) => f.write_str(&format_number(*v)),
            Self::Text(text) => f.write_str(text),
            Self::Date(time) => f.write_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// Parses the date string spellings accepted on date axes.
#[must_use]
pub fn parse_date_str(input: &str) -> Option<DateTime<Utc>> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.with_timezone(&Utc));
    }
    if let Ok(time) = DateTime::parse_from_rfc2822(text) {
        return Some(time.with_timezone(&Utc));
    }
    for pattern in NAIVE_DATE_TIME_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(time.and_utc());
        }
    }
    for pattern in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, pattern) {
            return date.and_hms_opt(0, 0, 0).map(|time| time.and_utc());
        }
    }
    None
}

/// Builds a row from `(field, value)` pairs.
#[must_use]
pub fn row<K, V, I>(fields: I) -> Row
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    fields
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// Parses a JSON array of flat objects into rows.
pub fn rows_from_json_str(input: &str) -> ChartResult<Vec<Row>> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse rows json payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::{Value, parse_date_str, rows_from_json_str};

    #[test]
    fn json_rows_keep_date_strings_as_text() {
        let rows = rows_from_json_str(r#"[{"t":"2024-01-01","v":1.5,"flag":true,"gap":null}]"#)
            .expect("rows");
        assert_eq!(rows[0]["t"], Value::Text("2024-01-01".to_owned()));
        assert_eq!(rows[0]["v"], Value::Number(1.5));
        assert_eq!(rows[0]["flag"], Value::Bool(true));
        assert_eq!(rows[0]["gap"], Value::Null);
    }

    #[test]
    fn date_strings_parse_across_common_spellings() {
        assert!(parse_date_str("2024-01-01").is_some());
        assert!(parse_date_str("2024-01-01T10:30:00Z").is_some());
        assert!(parse_date_str("2024-01-01 10:30").is_some());
        assert!(parse_date_str("low").is_none());
        assert!(parse_date_str("   ").is_none());
    }

    #[test]
    fn numeric_coercion_follows_loose_number_rules() {
        assert_eq!(Value::from("42").to_numeric(), 42.0);
        assert_eq!(Value::from("").to_numeric(), 0.0);
        assert!(Value::from("abc").to_numeric().is_nan());
        assert!(Value::Null.to_numeric().is_nan());
    }
}
