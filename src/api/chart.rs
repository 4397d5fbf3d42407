use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{
    ChartGeometry, Dimensions, GeometryInput, ScreenMatrix, compute_geometry, project_table,
};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::cache::{DerivedCache, GeometryCacheStats, GeometryKey};
use super::collaborators::{
    BuiltInComponents, DEFAULT_TABLE_ARIA_LABEL, DataTableRequest, EMPTY_STATE_MESSAGE,
    EMPTY_STATE_TITLE, ERROR_STATE_TITLE, EmptyStateIcon, EmptyStateRequest, FallbackComponents,
    SkeletonRequest, data_table_markup, empty_state_markup, skeleton_markup,
};
use super::frame_builder::build_render_frame;
use super::measurement::{ContentBox, MeasuredSize, ResizeObserver, ResizeSubscription};
use super::tooltip::{TooltipGapPolicy, TooltipLookup, TooltipState, resolve_tooltip};
use super::{ChartPhase, ChartProps, DEFAULT_CHART_HEIGHT, Theme};

/// Outcome of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Error {
        markup: String,
    },
    Loading {
        markup: String,
    },
    Empty {
        markup: String,
    },
    /// Ready, but no usable width yet; nothing was drawn.
    Measuring {
        table: Option<String>,
    },
    Ready {
        geometry: Arc<ChartGeometry>,
        table: Option<String>,
    },
}

impl ChartView {
    #[must_use]
    pub fn phase(&self) -> ChartPhase {
        match self {
            Self::Error { .. } => ChartPhase::Error,
            Self::Loading { .. } => ChartPhase::Loading,
            Self::Empty { .. } => ChartPhase::Empty,
            Self::Measuring { .. } | Self::Ready { .. } => ChartPhase::Ready,
        }
    }

    /// Fallback markup for the error, loading and empty phases.
    #[must_use]
    pub fn markup(&self) -> Option<&str> {
        match self {
            Self::Error { markup } | Self::Loading { markup } | Self::Empty { markup } => {
                Some(markup)
            }
            Self::Measuring { .. } | Self::Ready { .. } => None,
        }
    }

    /// Accessible table markup, when the table fallback is enabled.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::Measuring { table } | Self::Ready { table, .. } => table.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&Arc<ChartGeometry>> {
        match self {
            Self::Ready { geometry, .. } => Some(geometry),
            _ => None,
        }
    }
}

/// Line chart orchestrator.
///
/// Owns the renderer, the measured container size, the derived-geometry
/// cache and the transient tooltip. Everything else is re-derived from
/// [`ChartProps`] on each [`LineChart::render`] call.
pub struct LineChart<R: Renderer> {
    renderer: R,
    components: Box<dyn FallbackComponents>,
    measured: MeasuredSize,
    cache: DerivedCache,
    last_geometry: Option<Arc<ChartGeometry>>,
    tooltip: Option<TooltipState>,
    last_phase: Option<ChartPhase>,
}

impl<R: Renderer> LineChart<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self::with_components(renderer, BuiltInComponents)
    }

    #[must_use]
    pub fn with_components(renderer: R, components: impl FallbackComponents + 'static) -> Self {
        Self {
            renderer,
            components: Box::new(components),
            measured: MeasuredSize::default(),
            cache: DerivedCache::default(),
            last_geometry: None,
            tooltip: None,
            last_phase: None,
        }
    }

    /// Starts observing the container; dropping the guard stops it.
    pub fn mount<O: ResizeObserver>(&self, observer: O) -> ResizeSubscription<O> {
        ResizeSubscription::establish(observer, &self.measured)
    }

    /// Host-driven measurement; returns `false` when the box was rejected.
    pub fn set_content_box(&mut self, content_box: ContentBox) -> bool {
        self.measured.set(content_box)
    }

    #[must_use]
    pub fn content_box(&self) -> ContentBox {
        self.measured.get()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.as_ref()
    }

    #[must_use]
    pub fn cache_stats(&self) -> GeometryCacheStats {
        self.cache.stats()
    }

    /// Drops the cached geometry; the next ready render recomputes it.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Renders the current phase.
    ///
    /// Error, loading and empty phases always produce their fallback markup;
    /// props and config are validated only once the chart is ready to draw.
    pub fn render(&mut self, props: &ChartProps) -> ChartResult<ChartView> {
        let phase = props.phase();
        if self.last_phase != Some(phase) {
            debug!(from = ?self.last_phase, to = ?phase, "chart phase changed");
            self.last_phase = Some(phase);
        }
        if phase != ChartPhase::Ready {
            self.tooltip = None;
            self.last_geometry = None;
        }

        match phase {
            ChartPhase::Error => {
                let message = props.error.as_deref().unwrap_or_default();
                let markup = empty_state_markup(
                    self.components.as_ref(),
                    &EmptyStateRequest {
                        title: ERROR_STATE_TITLE,
                        message,
                        icon: Some(EmptyStateIcon::Alert),
                        is_error: true,
                        props: &props.component_props.empty_state,
                    },
                );
                Ok(ChartView::Error { markup })
            }
            ChartPhase::Loading => {
                let width = props
                    .config
                    .width
                    .fixed()
                    .filter(|width| width.is_finite() && *width >= 0.0)
                    .or_else(|| self.measured_width());
                let height = Some(props.config.resolved_height())
                    .filter(|height| height.is_finite() && *height >= 0.0)
                    .unwrap_or(DEFAULT_CHART_HEIGHT);
                let markup = skeleton_markup(
                    self.components.as_ref(),
                    &SkeletonRequest {
                        width,
                        height,
                        props: &props.component_props.skeleton,
                    },
                );
                Ok(ChartView::Loading { markup })
            }
            ChartPhase::Empty => {
                let markup = empty_state_markup(
                    self.components.as_ref(),
                    &EmptyStateRequest {
                        title: EMPTY_STATE_TITLE,
                        message: EMPTY_STATE_MESSAGE,
                        icon: Some(EmptyStateIcon::Chart),
                        is_error: false,
                        props: &props.component_props.empty_state,
                    },
                );
                Ok(ChartView::Empty { markup })
            }
            ChartPhase::Ready => self.render_ready(props),
        }
    }

    /// Resolves the tooltip for a pointer position in screen space.
    ///
    /// Uses the geometry of the last ready render; a no-op before one. Call
    /// [`LineChart::render`] afterwards to draw the updated overlay.
    pub fn pointer_move(
        &mut self,
        props: &ChartProps,
        screen_x: f64,
        screen_y: f64,
        ctm: ScreenMatrix,
    ) -> Option<&TooltipState> {
        let geometry = Arc::clone(self.last_geometry.as_ref()?);

        let lookup = match ctm.to_local(screen_x, screen_y) {
            Some((local_x, _)) => resolve_tooltip(
                &geometry,
                &props.series,
                local_x - geometry.dimensions.margin.left,
                props.format_x.as_ref(),
                props.format_y.as_ref(),
            ),
            None => TooltipLookup::Miss,
        };

        match lookup {
            TooltipLookup::Hit(state) => self.tooltip = Some(state),
            TooltipLookup::Gap { index } => match props.config.tooltip_gap_policy {
                TooltipGapPolicy::Clear => {
                    if self.tooltip.take().is_some() {
                        warn!(index, "tooltip dropped: nearest row has no plottable value");
                    }
                }
                TooltipGapPolicy::KeepPrevious => {}
            },
            TooltipLookup::Miss => self.tooltip = None,
        }

        self.tooltip.as_ref()
    }

    pub fn pointer_leave(&mut self) {
        self.tooltip = None;
    }

    fn measured_width(&self) -> Option<f64> {
        let width = self.measured.get().width;
        (width > 0.0).then_some(width)
    }

    fn render_ready(&mut self, props: &ChartProps) -> ChartResult<ChartView> {
        let table = props
            .config
            .a11y
            .table_fallback
            .then(|| self.table_markup(props));

        props.validate()?;
        let theme = Theme::resolve(&props.config.theme)?;

        let width = props
            .config
            .width
            .fixed()
            .unwrap_or_else(|| self.measured.get().width);
        let height = props.config.resolved_height();
        if width.is_nan() || width <= 0.0 || height.is_nan() || height <= 0.0 {
            debug!(width, height, "chart has no drawable area yet");
            self.last_geometry = None;
            self.tooltip = None;
            return Ok(ChartView::Measuring { table });
        }

        let dimensions = Dimensions::new(width, height, props.config.margin);
        let key = GeometryKey::new(
            &props.data,
            &props.x_key,
            &props.series,
            dimensions,
            props.config.x_axis_type,
        );
        let geometry = self.cache.get_or_compute(key, || {
            compute_geometry(GeometryInput {
                rows: &props.data,
                x_key: &props.x_key,
                series: &props.series,
                dimensions,
                axis_hint: props.config.x_axis_type,
            })
        });

        let same_geometry = self
            .last_geometry
            .as_ref()
            .is_some_and(|previous| Arc::ptr_eq(previous, &geometry));
        if !same_geometry {
            self.tooltip = None;
        }

        let frame = build_render_frame(&geometry, &theme, props, self.tooltip.as_ref());
        self.renderer.render(&frame)?;
        self.last_geometry = Some(Arc::clone(&geometry));

        Ok(ChartView::Ready { geometry, table })
    }

    fn table_markup(&self, props: &ChartProps) -> String {
        let table = project_table(&props.data, &props.x_key, &props.series);
        let aria_label = props
            .config
            .a11y
            .title
            .as_deref()
            .unwrap_or(DEFAULT_TABLE_ARIA_LABEL);
        data_table_markup(
            self.components.as_ref(),
            &DataTableRequest {
                table: &table,
                rows: &props.data,
                aria_label,
                props: &props.component_props.data_table,
            },
        )
    }
}
