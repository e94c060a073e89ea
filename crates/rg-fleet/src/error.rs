use thiserror::Error;

use rg_core::BoatId;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("fleet is empty")]
    Empty,

    #[error("fleet of {0} boats exceeds the boat id range")]
    TooManyBoats(usize),

    #[error("{boat}: {stat} = {value} is outside -5..=5")]
    StatOutOfRange { boat: BoatId, stat: &'static str, value: i8 },

    #[error("{boat}: starting position is not finite")]
    InvalidPosition { boat: BoatId },
}

pub type FleetResult<T> = Result<T, FleetError>;
