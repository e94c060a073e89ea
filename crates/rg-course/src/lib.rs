//! `rg-course` — static race course geometry.
//!
//! A course is four marks forming two gates (the start line, which doubles
//! as the leeward gate and finish, and the windward gate), a circular
//! playable boundary, and any number of static obstacles.  Courses are built
//! once by the setup collaborator and are immutable for the race.
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`mark`]     | `Mark`, mark and zone radii                         |
//! | [`obstacle`] | `Obstacle` (outline, convex hull, bounding radius)  |
//! | [`course`]   | `Course`, `Gate`, `GateSpec`, `Boundary`, builder   |
//! | [`error`]    | `CourseError`, `CourseResult`                       |

pub mod course;
pub mod error;
pub mod mark;
pub mod obstacle;

#[cfg(test)]
mod tests;

pub use course::{Boundary, Course, CourseBuilder, Gate, GateSpec};
pub use error::{CourseError, CourseResult};
pub use mark::{MARK_RADIUS, Mark, ZONE_RADIUS};
pub use obstacle::Obstacle;
