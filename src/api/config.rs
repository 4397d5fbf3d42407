use serde::{Deserialize, Serialize};

use crate::core::{AxisTypeHint, Margin};
use crate::error::{ChartError, ChartResult};

use super::{ThemeOverrides, TooltipGapPolicy};

/// Height used whenever the caller does not pin a literal pixel height.
pub const DEFAULT_CHART_HEIGHT: f64 = 300.0;

pub const CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Sizing mode for one axis of the outer chart box.
///
/// Serialized as the string `"auto"` or a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "SizeModeRepr", into = "SizeModeRepr")]
pub enum SizeMode {
    #[default]
    Auto,
    Fixed(f64),
}

impl SizeMode {
    #[must_use]
    pub fn fixed(self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Fixed(value) => Some(value),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SizeModeRepr {
    Fixed(f64),
    Keyword(String),
}

impl TryFrom<SizeModeRepr> for SizeMode {
    type Error = ChartError;

    fn try_from(value: SizeModeRepr) -> Result<Self, Self::Error> {
        match value {
            SizeModeRepr::Fixed(value) => Ok(Self::Fixed(value)),
            SizeModeRepr::Keyword(keyword) if keyword == "auto" => Ok(Self::Auto),
            SizeModeRepr::Keyword(keyword) => Err(ChartError::InvalidConfig(format!(
                "unsupported size mode `{keyword}`"
            ))),
        }
    }
}

impl From<SizeMode> for SizeModeRepr {
    fn from(value: SizeMode) -> Self {
        match value {
            SizeMode::Auto => Self::Keyword("auto".to_owned()),
            SizeMode::Fixed(value) => Self::Fixed(value),
        }
    }
}

/// Accessibility wiring for the rendered chart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct A11yConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub table_fallback: bool,
}

impl A11yConfig {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_table_fallback(mut self, enabled: bool) -> Self {
        self.table_fallback = enabled;
        self
    }
}

/// Serializable part of the chart props.
///
/// Host applications can persist/load this without inventing their own
/// format; data, callbacks and collaborators stay outside.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    #[serde(default)]
    pub width: SizeMode,
    #[serde(default)]
    pub height: SizeMode,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub theme: ThemeOverrides,
    #[serde(default)]
    pub a11y: A11yConfig,
    #[serde(default)]
    pub x_axis_type: AxisTypeHint,
    #[serde(default)]
    pub tooltip_gap_policy: TooltipGapPolicy,
}

impl ChartConfig {
    #[must_use]
    pub fn with_width(mut self, width: SizeMode) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: SizeMode) -> Self {
        self.height = height;
        self
    }

    /// Pins both outer dimensions to literal pixel values.
    #[must_use]
    pub fn with_fixed_size(self, width: f64, height: f64) -> Self {
        self.with_width(SizeMode::Fixed(width))
            .with_height(SizeMode::Fixed(height))
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ThemeOverrides) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_a11y(mut self, a11y: A11yConfig) -> Self {
        self.a11y = a11y;
        self
    }

    #[must_use]
    pub fn with_x_axis_type(mut self, hint: AxisTypeHint) -> Self {
        self.x_axis_type = hint;
        self
    }

    #[must_use]
    pub fn with_tooltip_gap_policy(mut self, policy: TooltipGapPolicy) -> Self {
        self.tooltip_gap_policy = policy;
        self
    }

    /// Resolved pixel height: the literal value, or the fixed default.
    #[must_use]
    pub fn resolved_height(&self) -> f64 {
        self.height.fixed().unwrap_or(DEFAULT_CHART_HEIGHT)
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (axis, mode) in [("width", self.width), ("height", self.height)] {
            if let SizeMode::Fixed(value) = mode {
                if !value.is_finite() || value < 0.0 {
                    return Err(ChartError::InvalidConfig(format!(
                        "fixed {axis} must be finite and >= 0"
                    )));
                }
            }
        }
        self.margin.validate()
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartConfigJsonContractV1 {
            schema_version: CHART_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize chart config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config object or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(config) = serde_json::from_str::<Self>(input) {
            config.validate()?;
            return Ok(config);
        }
        let payload: ChartConfigJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse chart config json payload: {e}"))
        })?;
        if payload.schema_version != CHART_CONFIG_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidConfig(format!(
                "unsupported chart config schema version: {}",
                payload.schema_version
            )));
        }
        payload.config.validate()?;
        Ok(payload.config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ChartConfig,
}
