use crate::config;
use crate::cooldown::{Clock, CooldownGate, GateAction, MonotonicClock};
use crate::error::SimError;
use crate::motion::{self, MotionOutcome};
use crate::road_mask::{RoadMask, Terrain};
use crate::types::{FrameInput, Point};
use crate::utils;
use crate::vehicle::Vehicle;
use log::info;

/// The driving core: one car on one road mask, updated once per frame.
#[derive(Debug)]
pub struct Simulation<C: Clock = MonotonicClock> {
    pub vehicle: Vehicle,
    mask: RoadMask,
    gate: CooldownGate<GateAction, C>,
    frame: u64,
}

impl Simulation<MonotonicClock> {
    pub fn new(mask: RoadMask, start: Point) -> Result<Self, SimError> {
        Self::with_clock(mask, start, MonotonicClock::new())
    }
}

impl<C: Clock> Simulation<C> {
    pub fn with_clock(mask: RoadMask, start: Point, clock: C) -> Result<Self, SimError> {
        if mask.classify(start).is_blocked() {
            return Err(SimError::StartBlocked {
                x: start.x,
                y: start.y,
            });
        }
        info!(
            "Simulation ready on {}x{} map, car at ({:.0}, {:.0})",
            mask.width(),
            mask.height(),
            start.x,
            start.y
        );
        Ok(Simulation {
            vehicle: Vehicle::new(start, config::START_HEADING),
            mask,
            gate: CooldownGate::with_clock(clock),
            frame: 0,
        })
    }

    pub fn mask(&self) -> &RoadMask {
        &self.mask
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Terrain directly under the car.
    pub fn current_terrain(&self) -> Terrain {
        self.mask.classify(self.vehicle.position)
    }

    /// Advances the car by one frame. While paused nothing changes and `None`
    /// is returned, so no fuel, mileage or movement accrues.
    pub fn step(&mut self, input: &FrameInput, dt: f64, paused: bool) -> Option<MotionOutcome> {
        if paused {
            return None;
        }
        let dt = utils::sanitize_delta(dt);
        self.frame += 1;

        if self.vehicle.is_out_of_fuel() {
            // Stalled: the car stays put, but a pad under it still works
            let terrain = self.current_terrain();
            let refueled =
                motion::try_refuel(&mut self.vehicle, terrain, input.refuel, &mut self.gate);
            if refueled {
                info!("Refueled a stalled car, fuel now {:.0}", self.vehicle.fuel);
            }
            return Some(MotionOutcome {
                terrain,
                moved: false,
                distance: 0.0,
                refueled,
            });
        }

        self.vehicle
            .apply_controls(&input.controls, dt, config::TURN_RATE);
        let outcome = motion::integrate(
            &mut self.vehicle,
            dt,
            &self.mask,
            input.refuel,
            &mut self.gate,
            self.frame,
        );

        if self.vehicle.is_out_of_fuel() {
            info!(
                "Out of fuel at ({:.0}, {:.0}) after {:.0} units",
                self.vehicle.position.x, self.vehicle.position.y, self.vehicle.mileage
            );
        }
        Some(outcome)
    }

    /// The "Restart" menu action.
    pub fn restart(&mut self) {
        self.vehicle.reset();
        self.frame = 0;
        let start = self.vehicle.start();
        info!("Simulation restarted at ({:.0}, {:.0})", start.x, start.y);
    }

    /// Rate-limited check for non-driving actions such as song changes.
    pub fn action_ready(&mut self, action: GateAction, cooldown: f64) -> bool {
        self.gate.is_ready(action, cooldown)
    }
}
