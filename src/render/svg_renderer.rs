use std::fmt::{self, Write as _};

use crate::core::format::format_trimmed;
use crate::error::{ChartError, ChartResult};
use crate::render::markup::escape_markup;
use crate::render::{RenderFrame, Renderer, TextHAlign};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const COORD_DECIMALS: usize = 2;
const FALLBACK_ARIA_LABEL: &str = "Line chart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Renders frames into a standalone SVG document string.
///
/// The root element is wired for assistive technology: `role="img"` plus
/// `aria-labelledby` pointing at `<title>`/`<desc>` when the frame carries
/// labels. A transparent hit area covers the plot so hosts can bind pointer
/// events to it.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    id_prefix: String,
    document: String,
    last_stats: SvgRenderStats,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new("line-chart")
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            document: String::new(),
            last_stats: SvgRenderStats::default(),
        }
    }

    #[must_use]
    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    /// Document produced by the most recent successful render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn take_document(&mut self) -> String {
        std::mem::take(&mut self.document)
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_document(&self, frame: &RenderFrame, out: &mut String) -> fmt::Result {
        let width = px(frame.dimensions.width);
        let height = px(frame.dimensions.height);
        let title_id = format!("{}-title", self.id_prefix);
        let desc_id = format!("{}-desc", self.id_prefix);

        write!(
            out,
            r#"<svg xmlns="{SVG_NAMESPACE}" width="{width}" height="{height}" viewBox="0 0 {width} {height}" role="img""#
        )?;
        let mut labelled_by = Vec::with_capacity(2);
        if frame.labels.title.is_some() {
            labelled_by.push(title_id.as_str());
        }
        if frame.labels.description.is_some() {
            labelled_by.push(desc_id.as_str());
        }
        if labelled_by.is_empty() {
            write!(out, r#" aria-label="{FALLBACK_ARIA_LABEL}""#)?;
        } else {
            write!(out, r#" aria-labelledby="{}""#, labelled_by.join(" "))?;
        }
        if !frame.font_family.is_empty() {
            write!(
                out,
                r#" font-family="{}""#,
                escape_markup(&frame.font_family)
            )?;
        }
        out.push('>');

        if let Some(title) = &frame.labels.title {
            write!(out, r#"<title id="{title_id}">{}</title>"#, escape_markup(title))?;
        }
        if let Some(description) = &frame.labels.description {
            write!(
                out,
                r#"<desc id="{desc_id}">{}</desc>"#,
                escape_markup(description)
            )?;
        }

        out.push_str(r#"<g class="chart-axes">"#);
        for line in &frame.lines {
            write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                px(line.x1),
                px(line.y1),
                px(line.x2),
                px(line.y2),
                line.color,
                px(line.stroke_width)
            )?;
        }
        out.push_str("</g>");

        let (origin_x, origin_y) = frame.plot_origin();
        write!(
            out,
            r#"<g class="chart-series" transform="translate({},{})">"#,
            px(origin_x),
            px(origin_y)
        )?;
        for path in &frame.paths {
            write!(
                out,
                r#"<path data-series-id="{}" d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round"/>"#,
                escape_markup(&path.id),
                path.d,
                path.color,
                px(path.stroke_width)
            )?;
        }
        out.push_str("</g>");

        out.push_str(r#"<g class="chart-overlay">"#);
        for rect in &frame.rects {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                px(rect.x),
                px(rect.y),
                px(rect.width),
                px(rect.height),
                rect.fill_color
            )?;
            if rect.corner_radius > 0.0 {
                write!(out, r#" rx="{}""#, px(rect.corner_radius))?;
            }
            if rect.border_width > 0.0 {
                write!(
                    out,
                    r#" stroke="{}" stroke-width="{}""#,
                    rect.border_color,
                    px(rect.border_width)
                )?;
            }
            out.push_str("/>");
        }
        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{anchor}">{}</text>"#,
                px(text.x),
                px(text.y),
                px(text.font_size_px),
                text.color,
                escape_markup(&text.text)
            )?;
        }
        out.push_str("</g>");

        write!(
            out,
            r#"<rect class="chart-hit-area" x="{}" y="{}" width="{}" height="{}" fill="transparent" pointer-events="all"/>"#,
            px(origin_x),
            px(origin_y),
            px(frame.dimensions.inner_width()),
            px(frame.dimensions.inner_height())
        )?;
        out.push_str("</svg>");
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut document = String::new();
        self.write_document(frame, &mut document)
            .map_err(|err| ChartError::Render(format!("failed to write svg document: {err}")))?;

        self.document = document;
        self.last_stats = SvgRenderStats {
            lines_drawn: frame.lines.len(),
            paths_drawn: frame.paths.len(),
            rects_drawn: frame.rects.len(),
            texts_drawn: frame.texts.len(),
        };
        Ok(())
    }
}

fn px(value: f64) -> String {
    format_trimmed(value, COORD_DECIMALS)
}
