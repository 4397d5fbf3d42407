use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Outer plot margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(16.0, 16.0, 32.0, 48.0)
    }
}

/// Outer pixel box plus margins; the plot area is what remains inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    #[must_use]
    pub fn inner_width(self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    #[must_use]
    pub fn inner_height(self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Pixel coordinate inside the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One plotted series: which row field supplies its y values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub y_key: String,
}

impl SeriesDef {
    #[must_use]
    pub fn new(id: impl Into<String>, y_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            y_key: y_key.into(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Human-facing name: the label when set, the id otherwise.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Rejects empty or repeated series ids.
pub fn validate_series(series: &[SeriesDef]) -> ChartResult<()> {
    let mut seen = HashSet::with_capacity(series.len());
    for def in series {
        if def.id.is_empty() {
            return Err(ChartError::InvalidProps(
                "series id must not be empty".to_owned(),
            ));
        }
        if !seen.insert(def.id.as_str()) {
            return Err(ChartError::InvalidProps(format!(
                "duplicate series id `{}`",
                def.id
            )));
        }
    }
    Ok(())
}
