mod cache;
mod chart;
mod collaborators;
mod config;
mod frame_builder;
mod measurement;
mod props;
mod theme;
mod tooltip;

pub use cache::GeometryCacheStats;
pub use chart::{ChartView, LineChart};
pub use collaborators::{
    BuiltInComponents, ComponentProps, DEFAULT_TABLE_ARIA_LABEL, DataTableRequest,
    EMPTY_STATE_MESSAGE, EMPTY_STATE_TITLE, ERROR_STATE_TITLE, EmptyStateIcon, EmptyStateRequest,
    FallbackComponents, LOADING_STATUS_TEXT, SkeletonRequest,
};
pub use config::{
    A11yConfig, CHART_CONFIG_JSON_SCHEMA_V1, ChartConfig, ChartConfigJsonContractV1,
    DEFAULT_CHART_HEIGHT, SizeMode,
};
pub use measurement::{
    ContentBox, ManualResizeObserver, ResizeCallback, ResizeObserver, ResizeSubscription,
};
pub use props::{ChartPhase, ChartProps, XLabelFormatterFn, YLabelFormatterFn};
pub use theme::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PX, Theme, ThemeOverrides};
pub use tooltip::{TooltipGapPolicy, TooltipState, format_x_label, format_y_value};
