//! line-chart-rs: line chart rendering engine.
//!
//! Turns tabular rows into pixel-space geometry for a line chart: scale
//! primitives, axis type inference, a loading/error/empty/ready orchestrator,
//! nearest-point tooltips and an accessible table fallback. Drawing goes
//! through the [`render::Renderer`] trait.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartPhase, ChartProps, ChartView, LineChart};
pub use error::{ChartError, ChartResult};
