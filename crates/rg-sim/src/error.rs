use rg_core::BoatId;
use rg_course::CourseError;
use rg_fleet::FleetError;
use rg_physics::PolarError;
use rg_race::RaceError;
use rg_wind::WindError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{name} must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("{0} is not in the fleet")]
    UnknownBoat(BoatId),

    #[error("course error: {0}")]
    Course(#[from] CourseError),

    #[error("wind error: {0}")]
    Wind(#[from] WindError),

    #[error("polar error: {0}")]
    Polar(#[from] PolarError),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),

    #[error("race error: {0}")]
    Race(#[from] RaceError),
}

pub type SimResult<T> = Result<T, SimError>;
