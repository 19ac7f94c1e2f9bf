use crate::config;
use crate::types::{Controls, Point};
use crate::utils;

/// The player's car: kinematics plus the fuel and odometer it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub position: Point,
    pub heading: f64, // Steering direction in degrees, [0, 360)
    pub facing: f64,  // Rotation of the last committed move, used for drawing
    pub speed: f64,   // +forward, -reverse
    pub fuel: f64,
    pub mileage: f64,
    start: Point,
    start_heading: f64,
}

impl Vehicle {
    pub fn new(start: Point, heading: f64) -> Self {
        let heading = utils::normalize_degrees(heading);
        Vehicle {
            position: start,
            heading,
            facing: heading,
            speed: 0.0,
            fuel: config::FUEL_CAPACITY,
            mileage: 0.0,
            start,
            start_heading: heading,
        }
    }

    /// Puts the car back where it was created with a full tank and a zeroed odometer.
    pub fn reset(&mut self) {
        *self = Vehicle::new(self.start, self.start_heading);
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn is_out_of_fuel(&self) -> bool {
        self.fuel <= 0.0
    }

    /// Applies throttle, brake, drag, friction and steering for one frame.
    ///
    /// An empty tank freezes the car completely: no input, drag, friction or
    /// turning is applied until it is refueled.
    pub fn apply_controls(&mut self, controls: &Controls, dt: f64, handling: f64) {
        if self.is_out_of_fuel() {
            return;
        }

        if controls.forward {
            self.speed = (self.speed + config::ACCELERATION * dt).min(config::MAX_SPEED);
            self.fuel -= config::THROTTLE_FUEL_RATE * dt;
        }

        if controls.backward {
            self.speed = (self.speed - config::BRAKE_FACTOR * config::ACCELERATION * dt)
                .max(-config::MAX_REVERSE_SPEED);
            self.fuel -= config::BRAKE_FUEL_RATE * dt;
        }

        self.fuel = self.fuel.max(0.0);

        self.speed *= 1.0 - config::DRAG * dt;
        self.speed = utils::approach_zero(self.speed, config::FRICTION * dt);

        // Steering scales with the speed fraction; in reverse the wheels turn the other way
        let can_turn = self.speed.abs() > config::MIN_TURN_SPEED;
        let turn = handling * dt * (self.speed / config::MAX_SPEED);
        if controls.turn_left && can_turn {
            self.heading -= turn;
        }
        if controls.turn_right && can_turn {
            self.heading += turn;
        }
        self.heading = utils::normalize_degrees(self.heading);
    }

    /// One refuel event: +10 below the threshold, a full tank at or above it.
    pub fn refuel(&mut self) {
        if self.fuel >= config::REFUEL_THRESHOLD {
            self.fuel = config::FUEL_CAPACITY;
        } else {
            self.fuel += config::REFUEL_AMOUNT;
        }
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Vehicle::new(
            Point::new(config::START_X, config::START_Y),
            config::START_HEADING,
        )
    }
}
