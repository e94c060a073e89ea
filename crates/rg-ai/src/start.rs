//! Prestart: hover below the line, then time the run in for the gun.

use rg_core::geom::{downwind, forward};
use rg_core::{BoatId, Vec2};
use rg_fleet::Tack;

use crate::strategy::{CLOSE_HAULED, tack_heading};
use crate::{HelmContext, StartPlan};

/// Planning speed for the run in, world units per second.
const APPROACH_SPEED: f64 = 30.0;
/// Seconds of slack on top of the planned run in.
const APPROACH_BUFFER: f64 = 10.0;
/// Always start the run in by this many seconds before the gun.
const FINAL_APPROACH: f64 = 10.0;
/// Close enough to the setup point to park.
const SETUP_TOLERANCE: f64 = 20.0;
/// Park when this much closer to the line than the setup distance.
const SETUP_SLACK: f64 = 10.0;
const PARK_SPEED: f64 = 0.2;
/// Expected speed on the run in, world units per second.
const RUN_IN_SPEED: f64 = 100.0;
/// Arriving this many seconds early means slow down.
const EARLY_MARGIN: f64 = 2.0;
const HOLD_BACK_SPEED: f64 = 0.1;
/// An early boat heads for a point this far below its spot on the line.
const RECROSS_DEPTH: f64 = 100.0;

/// What the prestart wants from the helm.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StartCommand {
    /// Sail this heading.
    Steer { heading: f64, speed_limit: f64 },
    /// Work toward `target` the usual way (tacking if needed).
    SailTo { target: Vec2, speed_limit: f64 },
}

/// Prestart command for `boat` following `plan`.
pub fn start_command(boat: BoatId, ctx: &HelmContext<'_>, plan: &StartPlan) -> StartCommand {
    let position = ctx.fleet.position(boat);
    let (pin, committee) = ctx.course.gate_points(ctx.course.start_line);
    let spot = pin.lerp(committee, plan.line_fraction);
    let wind = ctx.wind.direction();
    let countdown = ctx.race.clock.countdown;

    if ctx.race.state(boat).ocs {
        let below = spot + downwind(wind) * RECROSS_DEPTH;
        return StartCommand::Steer { heading: (below - position).heading(), speed_limit: 1.0 };
    }

    let to_spot = position.distance(spot);
    let hovering = countdown > to_spot / APPROACH_SPEED + APPROACH_BUFFER && countdown > FINAL_APPROACH;
    if hovering {
        let setup = spot + downwind(wind) * plan.setup_distance;
        let park = StartCommand::Steer {
            heading: tack_heading(wind, CLOSE_HAULED, Tack::Starboard),
            speed_limit: PARK_SPEED,
        };
        if position.distance(setup) <= SETUP_TOLERANCE {
            return park;
        }
        let to_line = (spot - position).dot(forward(wind));
        if to_line < plan.setup_distance - SETUP_SLACK {
            return park;
        }
        return StartCommand::Steer { heading: (setup - position).heading(), speed_limit: 1.0 };
    }

    let early = to_spot / RUN_IN_SPEED < countdown - EARLY_MARGIN;
    StartCommand::SailTo { target: spot, speed_limit: if early { HOLD_BACK_SPEED } else { 1.0 } }
}
