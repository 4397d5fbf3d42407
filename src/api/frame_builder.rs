use crate::core::ChartGeometry;
use crate::render::{
    Color, FrameLabels, LinePrimitive, PathPrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::{ChartProps, Theme, TooltipState, format_x_label, format_y_value};

const GRID_STROKE_WIDTH: f64 = 1.0;
const AXIS_STROKE_WIDTH: f64 = 1.0;
const SERIES_STROKE_WIDTH: f64 = 2.0;
const Y_LABEL_GAP_PX: f64 = 8.0;
const X_LABEL_GAP_PX: f64 = 6.0;
const TOOLTIP_OFFSET_PX: f64 = 8.0;
const TOOLTIP_PADDING_PX: f64 = 6.0;
const TOOLTIP_CORNER_RADIUS_PX: f64 = 4.0;
const APPROX_GLYPH_WIDTH_EM: f64 = 0.6;

/// Materializes one deterministic frame from cached geometry.
pub(super) fn build_render_frame(
    geometry: &ChartGeometry,
    theme: &Theme,
    props: &ChartProps,
    tooltip: Option<&TooltipState>,
) -> RenderFrame {
    let a11y = &props.config.a11y;
    let mut frame = RenderFrame::new(geometry.dimensions)
        .with_labels(FrameLabels {
            title: a11y.title.clone(),
            description: a11y.description.clone(),
        })
        .with_font_family(theme.font_family.clone());

    push_axes(&mut frame, geometry, theme, props);

    for path in &geometry.paths {
        if path.is_empty() {
            continue;
        }
        frame = frame.with_path(PathPrimitive {
            id: path.series_id.clone(),
            d: path.d.clone(),
            subpaths: path.subpaths.clone(),
            stroke_width: SERIES_STROKE_WIDTH,
            color: theme.series_color(path.series_index),
        });
    }

    if let Some(tooltip) = tooltip {
        push_tooltip(&mut frame, theme, tooltip);
    }

    frame
}

fn push_axes(frame: &mut RenderFrame, geometry: &ChartGeometry, theme: &Theme, props: &ChartProps) {
    let (left, top) = frame.plot_origin();
    let right = left + geometry.inner_width;
    let bottom = top + geometry.inner_height;
    let font_size = theme.font_size;

    for tick in &geometry.y_ticks {
        let y = top + tick.position;
        frame.lines.push(LinePrimitive::new(
            left,
            y,
            right,
            y,
            GRID_STROKE_WIDTH,
            theme.grid_color,
        ));
        push_label(
            frame,
            format_y_value(tick.value, props.format_y.as_ref()),
            left - Y_LABEL_GAP_PX,
            y + font_size / 3.0,
            font_size,
            theme.axis_color,
            TextHAlign::Right,
        );
    }

    frame.lines.push(LinePrimitive::new(
        left,
        bottom,
        right,
        bottom,
        AXIS_STROKE_WIDTH,
        theme.axis_color,
    ));
    frame.lines.push(LinePrimitive::new(
        left,
        top,
        left,
        bottom,
        AXIS_STROKE_WIDTH,
        theme.axis_color,
    ));

    for tick in &geometry.x_ticks {
        let Some(raw) = geometry.raw_x.get(tick.row_index) else {
            continue;
        };
        push_label(
            frame,
            format_x_label(raw, geometry.axis_type, props.format_x.as_ref()),
            left + tick.position,
            bottom + font_size + X_LABEL_GAP_PX,
            font_size,
            theme.axis_color,
            TextHAlign::Center,
        );
    }
}

fn push_tooltip(frame: &mut RenderFrame, theme: &Theme, tooltip: &TooltipState) {
    let (left, top) = frame.plot_origin();
    let anchor_x = left + tooltip.x;
    let anchor_y = top + tooltip.y;
    if !anchor_x.is_finite() || !anchor_y.is_finite() {
        return;
    }

    let text = format!(
        "{}  {}: {}",
        tooltip.x_label, tooltip.series_label, tooltip.value_label
    );
    let font_size = theme.font_size;
    let width = text.chars().count() as f64 * font_size * APPROX_GLYPH_WIDTH_EM
        + 2.0 * TOOLTIP_PADDING_PX;
    let height = font_size + 2.0 * TOOLTIP_PADDING_PX;
    let x = anchor_x + TOOLTIP_OFFSET_PX;
    let y = anchor_y - TOOLTIP_OFFSET_PX - height;

    frame.rects.push(
        RectPrimitive::new(x, y, width, height, Color::rgb(1.0, 1.0, 1.0))
            .with_border(1.0, theme.axis_color)
            .with_corner_radius(TOOLTIP_CORNER_RADIUS_PX),
    );
    push_label(
        frame,
        text,
        x + TOOLTIP_PADDING_PX,
        y + TOOLTIP_PADDING_PX + font_size * 0.8,
        font_size,
        theme.axis_color,
        TextHAlign::Left,
    );
}

fn push_label(
    frame: &mut RenderFrame,
    text: String,
    x: f64,
    y: f64,
    font_size: f64,
    color: Color,
    h_align: TextHAlign,
) {
    if text.is_empty() || !x.is_finite() || !y.is_finite() {
        return;
    }
    frame
        .texts
        .push(TextPrimitive::new(text, x, y, font_size, color, h_align));
}
