use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::format::format_trimmed;
use crate::core::types::PixelPoint;

const PATH_COORD_DECIMALS: usize = 2;

/// Projected geometry of one series in plot-local pixels.
///
/// `subpaths` holds the runs of consecutive plottable points; `d` is the same
/// geometry as an SVG path command string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPath {
    pub series_id: String,
    pub series_index: usize,
    pub subpaths: Vec<Vec<PixelPoint>>,
    pub d: String,
}

impl SeriesPath {
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }
}

/// Builds a series path from per-row pixel positions.
///
/// A row whose x or y is non-finite breaks the line: the next plottable row
/// starts a fresh `M` command instead of being joined across the gap.
pub fn project_series_path<I>(
    series_id: &str,
    series_index: usize,
    x_positions: &[f64],
    y_positions: I,
) -> SeriesPath
where
    I: IntoIterator<Item = f64>,
{
    let mut subpaths: Vec<Vec<PixelPoint>> = Vec::new();
    let mut current: Vec<PixelPoint> = Vec::new();

    for (&x, y) in x_positions.iter().zip(y_positions) {
        if x.is_finite() && y.is_finite() {
            current.push(PixelPoint::new(x, y));
        } else if !current.is_empty() {
            subpaths.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        subpaths.push(current);
    }

    let d = path_commands(&subpaths);
    SeriesPath {
        series_id: series_id.to_owned(),
        series_index,
        subpaths,
        d,
    }
}

/// Serializes subpaths as `"M x,y L x,y ..."`.
#[must_use]
pub fn path_commands(subpaths: &[Vec<PixelPoint>]) -> String {
    let mut d = String::new();
    for subpath in subpaths {
        for (i, point) in subpath.iter().enumerate() {
            if !d.is_empty() {
                d.push(' ');
            }
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(
                d,
                "{command} {},{}",
                format_trimmed(point.x, PATH_COORD_DECIMALS),
                format_trimmed(point.y, PATH_COORD_DECIMALS)
            );
        }
    }
    d
}
