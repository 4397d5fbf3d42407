use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid chart props: {0}")]
    InvalidProps(String),

    #[error("invalid chart config: {0}")]
    InvalidConfig(String),

    #[error("render backend failure: {0}")]
    Render(String),
}
