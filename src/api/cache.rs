use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AxisTypeHint, ChartGeometry, Dimensions, Row, SeriesDef};

/// Runtime metrics exposed by the derived-geometry cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeometryCacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Everything the coordinate pipeline reads.
///
/// Data is compared by `Arc` identity, so replacing the rows (even with equal
/// content) invalidates; mutating nothing in place is the caller contract.
#[derive(Debug, Clone)]
pub(super) struct GeometryKey {
    data: Arc<Vec<Row>>,
    x_key: String,
    series: Vec<SeriesDef>,
    width: OrderedFloat<f64>,
    height: OrderedFloat<f64>,
    margin: [OrderedFloat<f64>; 4],
    axis_hint: AxisTypeHint,
}

impl GeometryKey {
    pub(super) fn new(
        data: &Arc<Vec<Row>>,
        x_key: &str,
        series: &[SeriesDef],
        dimensions: Dimensions,
        axis_hint: AxisTypeHint,
    ) -> Self {
        let margin = dimensions.margin;
        Self {
            data: Arc::clone(data),
            x_key: x_key.to_owned(),
            series: series.to_vec(),
            width: OrderedFloat(dimensions.width),
            height: OrderedFloat(dimensions.height),
            margin: [
                OrderedFloat(margin.top),
                OrderedFloat(margin.right),
                OrderedFloat(margin.bottom),
                OrderedFloat(margin.left),
            ],
            axis_hint,
        }
    }
}

impl PartialEq for GeometryKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
            && self.x_key == other.x_key
            && self.series == other.series
            && self.width == other.width
            && self.height == other.height
            && self.margin == other.margin
            && self.axis_hint == other.axis_hint
    }
}

impl Eq for GeometryKey {}

/// Single-entry memo for the coordinate pipeline output.
#[derive(Debug, Default)]
pub(super) struct DerivedCache {
    entry: Option<(GeometryKey, Arc<ChartGeometry>)>,
    hits: u64,
    misses: u64,
}

impl DerivedCache {
    pub(super) fn get_or_compute(
        &mut self,
        key: GeometryKey,
        compute: impl FnOnce() -> ChartGeometry,
    ) -> Arc<ChartGeometry> {
        if let Some((cached_key, geometry)) = &self.entry {
            if *cached_key == key {
                self.hits = self.hits.saturating_add(1);
                trace!(hits = self.hits, "geometry cache hit");
                return Arc::clone(geometry);
            }
        }

        self.misses = self.misses.saturating_add(1);
        let geometry = Arc::new(compute());
        self.entry = Some((key, Arc::clone(&geometry)));
        geometry
    }

    pub(super) fn clear(&mut self) {
        self.entry = None;
    }

    pub(super) fn stats(&self) -> GeometryCacheStats {
        GeometryCacheStats {
            hits: self.hits,
            misses: self.misses,
        }
    }
}
