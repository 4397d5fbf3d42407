use crate::core::Dimensions;
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive};

/// Accessible name and description attached to a rendered chart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameLabels {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Lines, rects and texts are in outer-box pixels. Paths stay plot-local and
/// are offset by [`RenderFrame::plot_origin`] at draw time. Painting follows
/// field order: lines, then paths, then rects, then texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub dimensions: Dimensions,
    pub labels: FrameLabels,
    pub font_family: String,
    pub lines: Vec<LinePrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            labels: FrameLabels::default(),
            font_family: String::new(),
            lines: Vec::new(),
            paths: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_labels(mut self, labels: FrameLabels) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: PathPrimitive) -> Self {
        self.paths.push(path);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    /// Outer x/y of the plot area's top-left corner.
    #[must_use]
    pub fn plot_origin(&self) -> (f64, f64) {
        (self.dimensions.margin.left, self.dimensions.margin.top)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.dimensions.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.dimensions.width,
                height: self.dimensions.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.paths.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
    }
}
