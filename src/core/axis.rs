use serde::{Deserialize, Serialize};

use crate::core::value::Value;

/// Classification of the x-axis values of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Numeric,
    Date,
    Categorical,
}

/// Caller-provided x-axis type; `Auto` runs inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisTypeHint {
    #[default]
    Auto,
    Numeric,
    Date,
    Categorical,
}

impl AxisTypeHint {
    #[must_use]
    pub fn explicit(self) -> Option<AxisType> {
        match self {
            Self::Auto => None,
            Self::Numeric => Some(AxisType::Numeric),
            Self::Date => Some(AxisType::Date),
            Self::Categorical => Some(AxisType::Categorical),
        }
    }
}

impl From<AxisType> for AxisTypeHint {
    fn from(value: AxisType) -> Self {
        match value {
            AxisType::Numeric => Self::Numeric,
            AxisType::Date => Self::Date,
            AxisType::Categorical => Self::Categorical,
        }
    }
}

/// Classifies raw x values: all numbers → numeric, all valid dates → date,
/// anything else (including no values at all) → categorical.
#[must_use]
pub fn infer_axis_type(values: &[Value]) -> AxisType {
    if values.is_empty() {
        return AxisType::Categorical;
    }
    if values.iter().all(Value::is_number) {
        return AxisType::Numeric;
    }
    if values.iter().all(|value| value.to_epoch_millis().is_some()) {
        return AxisType::Date;
    }
    AxisType::Categorical
}

#[must_use]
pub fn resolve_axis_type(hint: AxisTypeHint, values: &[Value]) -> AxisType {
    hint.explicit().unwrap_or_else(|| infer_axis_type(values))
}
