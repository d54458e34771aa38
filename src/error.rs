use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid config: {0}")]
    Config(String),

    #[error("unrecognized scale type `{found}` on the {axis} axis")]
    UnknownScaleType { axis: &'static str, found: String },

    #[error("field `{field}` is missing or not coercible on record {index}")]
    DataMapping { field: String, index: usize },

    #[error("invalid surface size: width={width}, height={height}")]
    InvalidSurface { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
