use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

pub const DEFAULT_FONT_FAMILY: &str = "system-ui, sans-serif";
pub const DEFAULT_FONT_SIZE_PX: f64 = 12.0;

const DEFAULT_PALETTE: [Color; 6] = [
    Color::rgb(0.145, 0.388, 0.922),
    Color::rgb(0.086, 0.639, 0.290),
    Color::rgb(0.863, 0.149, 0.149),
    Color::rgb(0.576, 0.200, 0.918),
    Color::rgb(0.918, 0.345, 0.047),
    Color::rgb(0.031, 0.569, 0.698),
];

/// Fully resolved chart theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub palette: Vec<Color>,
    pub grid_color: Color,
    pub axis_color: Color,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            grid_color: Color::rgb(0.898, 0.906, 0.922),
            axis_color: Color::rgb(0.420, 0.447, 0.502),
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size: DEFAULT_FONT_SIZE_PX,
        }
    }
}

impl Theme {
    /// Merges `overrides` over the defaults and validates the result.
    pub fn resolve(overrides: &ThemeOverrides) -> ChartResult<Self> {
        let defaults = Self::default();
        let theme = Self {
            palette: overrides.palette.clone().unwrap_or(defaults.palette),
            grid_color: overrides.grid_color.unwrap_or(defaults.grid_color),
            axis_color: overrides.axis_color.unwrap_or(defaults.axis_color),
            font_family: overrides
                .font_family
                .clone()
                .unwrap_or(defaults.font_family),
            font_size: overrides.font_size.unwrap_or(defaults.font_size),
        };
        theme.validate()?;
        Ok(theme)
    }

    /// Color for the series at `index`, cycling through the palette.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return self.axis_color;
        }
        self.palette[index % self.palette.len()]
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.palette.is_empty() {
            return Err(ChartError::InvalidConfig(
                "theme palette must contain at least one color".to_owned(),
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "theme font size must be finite and > 0".to_owned(),
            ));
        }
        for color in self
            .palette
            .iter()
            .chain([&self.grid_color, &self.axis_color])
        {
            color.validate()?;
        }
        Ok(())
    }
}

/// Partial theme supplied by callers; unset fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<Color>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl ThemeOverrides {
    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = Some(palette);
        self
    }

    #[must_use]
    pub fn with_grid_color(mut self, color: Color) -> Self {
        self.grid_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_axis_color(mut self, color: Color) -> Self {
        self.axis_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.font_family = Some(family.into());
        self.font_size = Some(size);
        self
    }
}
