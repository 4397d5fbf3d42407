use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::pipeline::ChartGeometry;

/// 2D affine transform in the `[a c e; b d f]` layout used by SVG CTMs.
///
/// Maps local SVG user space to screen space; hit-testing applies the inverse
/// to undo responsive scaling and page offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for ScreenMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ScreenMatrix {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Axis-aligned scale followed by a translation.
    #[must_use]
    pub const fn scale_translate(scale_x: f64, scale_y: f64, tx: f64, ty: f64) -> Self {
        Self {
            a: scale_x,
            b: 0.0,
            c: 0.0,
            d: scale_y,
            e: tx,
            f: ty,
        }
    }

    #[must_use]
    pub fn apply(self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Returns `None` when the matrix is singular or not finite.
    #[must_use]
    pub fn inverse(self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    /// Converts a screen coordinate into local SVG user space.
    #[must_use]
    pub fn to_local(self, screen_x: f64, screen_y: f64) -> Option<(f64, f64)> {
        self.inverse().map(|inverse| inverse.apply(screen_x, screen_y))
    }
}

/// Nearest row for a pointer, resolved against the first series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestPoint {
    pub index: usize,
    /// Plot-local pixel x of the row.
    pub x: f64,
    /// Plot-local pixel y of the first series; NaN in a gap.
    pub y: f64,
    /// First-series data value; NaN in a gap or when there are no series.
    pub value: f64,
}

/// Index of the position closest to `local_x`; ties keep the earliest row.
///
/// Linear scan, O(n) per call. Non-finite positions never match.
#[must_use]
pub fn nearest_index(positions: &[f64], local_x: f64) -> Option<usize> {
    if !local_x.is_finite() {
        return None;
    }
    positions
        .iter()
        .enumerate()
        .filter(|(_, position)| position.is_finite())
        .min_by_key(|(_, position)| OrderedFloat((*position - local_x).abs()))
        .map(|(index, _)| index)
}

/// Resolves the row nearest to a plot-local x coordinate.
#[must_use]
pub fn hit_test(geometry: &ChartGeometry, local_plot_x: f64) -> Option<NearestPoint> {
    let index = nearest_index(&geometry.x_positions, local_plot_x)?;
    let value = geometry
        .series_values
        .first()
        .and_then(|values| values.get(index).copied())
        .unwrap_or(f64::NAN);
    let y = if value.is_finite() {
        geometry.y_scale.apply(value)
    } else {
        f64::NAN
    };

    Some(NearestPoint {
        index,
        x: geometry.x_positions[index],
        y,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::{ScreenMatrix, nearest_index};

    #[test]
    fn inverse_undoes_scale_and_translation() {
        let ctm = ScreenMatrix::scale_translate(0.5, 0.5, 100.0, 40.0);
        let (x, y) = ctm.to_local(150.0, 90.0).expect("invertible");
        assert!((x - 100.0).abs() <= 1e-9);
        assert!((y - 100.0).abs() <= 1e-9);
    }

    #[test]
    fn singular_matrix_has_no_local_space() {
        let ctm = ScreenMatrix::scale_translate(0.0, 1.0, 0.0, 0.0);
        assert!(ctm.to_local(1.0, 1.0).is_none());
    }

    #[test]
    fn nearest_index_skips_non_finite_positions() {
        assert_eq!(nearest_index(&[f64::NAN, 50.0, 100.0], 0.0), Some(1));
        assert_eq!(nearest_index(&[], 10.0), None);
        assert_eq!(nearest_index(&[0.0, 10.0], f64::NAN), None);
    }

    #[test]
    fn equidistant_pointer_keeps_earliest_row() {
        assert_eq!(nearest_index(&[0.0, 10.0], 5.0), Some(0));
    }
}
