use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindError {
    #[error("base wind speed must be positive, got {0}")]
    InvalidSpeed(f64),

    #[error("base wind direction must be finite, got {0}")]
    InvalidDirection(f64),

    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
}

pub type WindResult<T> = Result<T, WindError>;
