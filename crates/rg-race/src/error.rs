use thiserror::Error;

#[derive(Debug, Error)]
pub enum RaceError {
    #[error("a race needs at least one leg")]
    NoLegs,

    #[error("{name} must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("race has no boats")]
    NoBoats,
}

pub type RaceResult<T> = Result<T, RaceError>;
