use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Row, SeriesDef, Value, validate_series};
use crate::error::ChartResult;

use super::{ChartConfig, ComponentProps};

/// Caller-supplied x label formatter (tooltip and axis labels).
pub type XLabelFormatterFn = Arc<dyn Fn(&Value) -> String + Send + Sync + 'static>;
/// Caller-supplied y value formatter (tooltip and axis labels).
pub type YLabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

/// Display phase derived from props, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartPhase {
    Error,
    Loading,
    Empty,
    Ready,
}

/// Inputs of one chart render pass.
#[derive(Clone)]
pub struct ChartProps {
    pub data: Arc<Vec<Row>>,
    pub x_key: String,
    pub series: Vec<SeriesDef>,
    pub config: ChartConfig,
    pub is_loading: bool,
    pub is_empty: bool,
    pub error: Option<String>,
    pub format_x: Option<XLabelFormatterFn>,
    pub format_y: Option<YLabelFormatterFn>,
    pub component_props: ComponentProps,
}

impl ChartProps {
    #[must_use]
    pub fn new(
        data: impl Into<Arc<Vec<Row>>>,
        x_key: impl Into<String>,
        series: Vec<SeriesDef>,
    ) -> Self {
        Self {
            data: data.into(),
            x_key: x_key.into(),
            series,
            config: ChartConfig::default(),
            is_loading: false,
            is_empty: false,
            error: None,
            format_x: None,
            format_y: None,
            component_props: ComponentProps::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    #[must_use]
    pub fn with_empty(mut self, is_empty: bool) -> Self {
        self.is_empty = is_empty;
        self
    }

    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_x_formatter(
        mut self,
        formatter: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.format_x = Some(Arc::new(formatter));
        self
    }

    #[must_use]
    pub fn with_y_formatter(
        mut self,
        formatter: impl Fn(f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.format_y = Some(Arc::new(formatter));
        self
    }

    #[must_use]
    pub fn with_component_props(mut self, component_props: ComponentProps) -> Self {
        self.component_props = component_props;
        self
    }

    /// Error beats loading, loading beats empty; zero rows count as empty.
    #[must_use]
    pub fn phase(&self) -> ChartPhase {
        if self.error.is_some() {
            ChartPhase::Error
        } else if self.is_loading {
            ChartPhase::Loading
        } else if self.is_empty || self.data.is_empty() {
            ChartPhase::Empty
        } else {
            ChartPhase::Ready
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_series(&self.series)?;
        self.config.validate()
    }
}

impl fmt::Debug for ChartProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartProps")
            .field("rows", &self.data.len())
            .field("x_key", &self.x_key)
            .field("series", &self.series)
            .field("config", &self.config)
            .field("is_loading", &self.is_loading)
            .field("is_empty", &self.is_empty)
            .field("error", &self.error)
            .field("format_x", &self.format_x.is_some())
            .field("format_y", &self.format_y.is_some())
            .field("component_props", &self.component_props)
            .finish()
    }
}
