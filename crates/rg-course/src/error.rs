//! Course construction errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("course is missing the {0}")]
    MissingGate(&'static str),

    #[error("{what} is degenerate (mark separation {separation:.1})")]
    DegenerateGate { what: &'static str, separation: f64 },

    #[error("boundary radius must be positive, got {0}")]
    InvalidBoundary(f64),

    #[error("obstacle {index} has {vertices} vertices; at least 3 are required")]
    DegenerateObstacle { index: usize, vertices: usize },

    #[error("leg length must be positive, got {0}")]
    InvalidLegLength(f64),
}

pub type CourseResult<T> = Result<T, CourseError>;
