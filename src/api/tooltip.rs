use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::format::{format_date_label, format_trimmed};
use crate::core::{AxisType, ChartGeometry, SeriesDef, Value, hit_test};

use super::{XLabelFormatterFn, YLabelFormatterFn};

const DEFAULT_VALUE_DECIMALS: usize = 2;

/// What happens to the tooltip when the nearest row has no plottable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipGapPolicy {
    /// Hide the tooltip while hovering a gap.
    #[default]
    Clear,
    /// Keep showing the last resolved tooltip.
    KeepPrevious,
}

/// Tooltip anchored at the nearest row of the first series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub index: usize,
    /// Plot-local pixel x of the anchor.
    pub x: f64,
    /// Plot-local pixel y of the anchor.
    pub y: f64,
    pub x_label: String,
    pub series_id: String,
    pub series_label: String,
    pub value: f64,
    pub value_label: String,
}

/// Outcome of resolving a pointer position against the current geometry.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum TooltipLookup {
    Hit(TooltipState),
    /// Nearest row sits in a gap of the first series (or there is no series).
    Gap { index: usize },
    /// Nothing to hit: no rows, or no finite positions.
    Miss,
}

pub(super) fn resolve_tooltip(
    geometry: &ChartGeometry,
    series: &[SeriesDef],
    local_plot_x: f64,
    format_x: Option<&XLabelFormatterFn>,
    format_y: Option<&YLabelFormatterFn>,
) -> TooltipLookup {
    let Some(nearest) = hit_test(geometry, local_plot_x) else {
        return TooltipLookup::Miss;
    };
    let Some(first) = series.first() else {
        return TooltipLookup::Gap {
            index: nearest.index,
        };
    };
    if !nearest.value.is_finite() {
        return TooltipLookup::Gap {
            index: nearest.index,
        };
    }

    trace!(index = nearest.index, local_plot_x, "tooltip hit");
    TooltipLookup::Hit(TooltipState {
        index: nearest.index,
        x: nearest.x,
        y: nearest.y,
        x_label: format_x_label(&geometry.raw_x[nearest.index], geometry.axis_type, format_x),
        series_id: first.id.clone(),
        series_label: first.display_label().to_owned(),
        value: nearest.value,
        value_label: format_y_value(nearest.value, format_y),
    })
}

/// Label for a raw x value: caller formatter, else a date label on date
/// axes, else plain string conversion.
#[must_use]
pub fn format_x_label(
    value: &Value,
    axis_type: AxisType,
    formatter: Option<&XLabelFormatterFn>,
) -> String {
    if let Some(formatter) = formatter {
        return formatter(value);
    }
    match (axis_type, value.to_epoch_millis()) {
        (AxisType::Date, Some(millis)) => format_date_label(millis),
        _ => value.to_string(),
    }
}

#[must_use]
pub fn format_y_value(value: f64, formatter: Option<&YLabelFormatterFn>) -> String {
    match formatter {
        Some(formatter) => formatter(value),
        None => format_trimmed(value, DEFAULT_VALUE_DECIMALS),
    }
}
