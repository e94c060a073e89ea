use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolarError {
    #[error("{axis} axis needs at least two breakpoints, got {got}")]
    TooFewBreakpoints { axis: &'static str, got: usize },

    #[error("{axis} breakpoints must be strictly increasing (index {index})")]
    NotIncreasing { axis: &'static str, index: usize },

    #[error("angle breakpoints must span 0..=180 degrees, got {first}..={last}")]
    AngleRange { first: f64, last: f64 },

    #[error("wind breakpoints must be positive, got {0}")]
    NonPositiveWind(f64),

    #[error("{table} table: expected {expected} entries, got {got}")]
    ShapeMismatch { table: &'static str, expected: usize, got: usize },

    #[error("{table} table holds an invalid speed {value}")]
    InvalidSpeed { table: &'static str, value: f64 },
}

pub type PolarResult<T> = Result<T, PolarError>;
