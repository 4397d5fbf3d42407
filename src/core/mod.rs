pub mod axis;
pub mod format;
pub mod hit_test;
pub mod line_series;
pub mod pipeline;
pub mod scale;
pub mod table;
pub mod types;
pub mod value;

pub use axis::{AxisType, AxisTypeHint, infer_axis_type, resolve_axis_type};
pub use hit_test::{NearestPoint, ScreenMatrix, hit_test, nearest_index};
pub use line_series::{SeriesPath, project_series_path};
pub use pipeline::{ChartGeometry, GeometryInput, XScale, XTick, YTick, compute_geometry};
pub use scale::{BandScale, LinearScale, TickValues, extent, nice_domain, ticks};
pub use table::{TableColumn, TableProjection, project_table};
pub use types::{Dimensions, Margin, PixelPoint, SeriesDef, validate_series};
pub use value::{Row, Value, row, rows_from_json_str};
