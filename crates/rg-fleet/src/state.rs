//! Per-boat physical state.

use rg_core::Vec2;
use rg_core::geom::forward;

/// Which side the wind comes over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tack {
    /// Wind over the starboard side, boom to port.
    Starboard,
    Port,
}

impl Tack {
    /// `+1.0` for starboard, `−1.0` for port.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Tack::Starboard => 1.0,
            Tack::Port => -1.0,
        }
    }

    #[inline]
    pub fn opposite(self) -> Tack {
        match self {
            Tack::Starboard => Tack::Port,
            Tack::Port => Tack::Starboard,
        }
    }

    /// The tack that a signed wind angle (`heading − wind`) puts a boat on.
    /// Headings grow clockwise, so a negative angle has the wind coming over
    /// the starboard side.
    #[inline]
    pub fn for_wind_angle(signed_twa: f64) -> Tack {
        if signed_twa < 0.0 { Tack::Starboard } else { Tack::Port }
    }
}

/// Who steers the boat.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Helm {
    /// Commands come from the AI controller.
    #[default]
    Autonomous,
    /// Commands are pushed in by an external input collaborator.
    External,
}

/// Position and motion.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kinematics {
    pub position: Vec2,
    /// Position at the start of the last integration step.
    pub last_position: Vec2,
    /// Radians, always normalized to `(−π, π]`.
    pub heading: f64,
    /// Speed through the water, knots.
    pub speed: f64,
    /// Velocity over ground including current, world units per second.
    pub velocity: Vec2,
}

impl Kinematics {
    pub fn at(position: Vec2, heading: f64) -> Self {
        Self { position, last_position: position, heading, ..Self::default() }
    }

    #[inline]
    pub fn forward(&self) -> Vec2 {
        forward(self.heading)
    }
}

/// Sail and boom state.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rig {
    /// Continuous boom position in `[-1, 1]`; positive is starboard tack.
    pub boom_side: f64,
    /// Sail angle off the centreline, radians.
    pub sail_angle: f64,
    /// Spinnaker deployment progress in `[0, 1]`.
    pub spinnaker: f64,
}

impl Default for Rig {
    fn default() -> Self {
        Self { boom_side: 1.0, sail_angle: 0.0, spinnaker: 0.0 }
    }
}

impl Rig {
    /// Tack implied by the boom; the boom at exactly zero counts as port.
    #[inline]
    pub fn tack(&self) -> Tack {
        if self.boom_side > 0.0 { Tack::Starboard } else { Tack::Port }
    }
}
