//! Per-frame position update: propose a step, ask the road mask, then commit
//! or penalize.
//!
//! Collisions are resolved by rejection. A step that would land on blocked
//! terrain is thrown away and the car loses half its speed, so the committed
//! position never sits on a wall. The speed drop on impact is abrupt; there is
//! no sliding along walls.

use crate::config;
use crate::cooldown::{Clock, CooldownGate, GateAction};
use crate::road_mask::{RoadMask, Terrain};
use crate::types::Point;
use crate::vehicle::Vehicle;

/// What happened to the car during one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionOutcome {
    /// Terrain under the car after the step (the rejected target if blocked)
    pub terrain: Terrain,
    pub moved: bool,
    pub distance: f64,
    pub refueled: bool,
}

/// Displacement the car would cover this frame along its heading.
pub fn displacement(vehicle: &Vehicle, dt: f64) -> Point {
    let heading_rad = vehicle.heading.to_radians();
    Point::new(
        heading_rad.cos() * vehicle.speed * dt,
        heading_rad.sin() * vehicle.speed * dt,
    )
}

/// Moves the car one frame if the terrain allows it.
pub fn advance(vehicle: &mut Vehicle, dt: f64, mask: &RoadMask, frame: u64) -> MotionOutcome {
    let step = displacement(vehicle, dt);
    let proposed = vehicle.position + step;
    let terrain = mask.classify(proposed);

    if terrain.is_blocked() {
        let old_speed = vehicle.speed;
        vehicle.speed *= config::COLLISION_SPEED_FACTOR;
        crate::debug_terrain!(
            frame = frame,
            "Blocked at ({:.1}, {:.1}), speed {:.2} -> {:.2}",
            proposed.x,
            proposed.y,
            old_speed,
            vehicle.speed
        );
        return MotionOutcome {
            terrain,
            moved: false,
            distance: 0.0,
            refueled: false,
        };
    }

    let distance = step.length();
    vehicle.position = proposed;
    vehicle.facing = vehicle.heading;
    vehicle.mileage += distance;

    crate::debug_vehicle!(
        frame = frame,
        "Moved {:.3} to ({:.1}, {:.1}) on {:?}, speed {:.2}, heading {:.1}",
        distance,
        vehicle.position.x,
        vehicle.position.y,
        terrain,
        vehicle.speed,
        vehicle.heading
    );

    MotionOutcome {
        terrain,
        moved: true,
        distance,
        refueled: false,
    }
}

/// Adds fuel when the car sits on a refuel pad and the player asks for it,
/// at most once per refuel cooldown. Returns true if fuel was added.
pub fn try_refuel<C: Clock>(
    vehicle: &mut Vehicle,
    terrain: Terrain,
    requested: bool,
    gate: &mut CooldownGate<GateAction, C>,
) -> bool {
    if terrain != Terrain::RefuelZone || !requested {
        return false;
    }
    if !gate.is_ready(GateAction::Refuel, config::REFUEL_COOLDOWN) {
        return false;
    }
    let before = vehicle.fuel;
    vehicle.refuel();
    crate::debug_vehicle!("Refueled {:.1} -> {:.1}", before, vehicle.fuel);
    true
}

/// Full integration step: move (or bounce), then refuel on the terrain the
/// car ends up on.
pub fn integrate<C: Clock>(
    vehicle: &mut Vehicle,
    dt: f64,
    mask: &RoadMask,
    refuel_requested: bool,
    gate: &mut CooldownGate<GateAction, C>,
    frame: u64,
) -> MotionOutcome {
    let mut outcome = advance(vehicle, dt, mask, frame);
    if outcome.moved {
        outcome.refueled = try_refuel(vehicle, outcome.terrain, refuel_requested, gate);
    }
    outcome
}
