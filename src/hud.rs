//! Values shown on the stats overlay and in trip snapshots.
//!
//! Map pixels are shown as "metres" at 2 px per metre, so speeds are halved
//! for km/h and a kilometre of mileage is 2000 px.

use crate::config;
use crate::vehicle::Vehicle;
use chrono::{DateTime, Local};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudStats {
    pub fuel_percent: i64,
    pub speed_kmh: i64,
    pub position: (i64, i64),
    pub mileage_km: i64,
}

impl HudStats {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        HudStats {
            fuel_percent: (vehicle.fuel as i64) / (config::FUEL_CAPACITY as i64 / 100),
            speed_kmh: (vehicle.speed.abs() / 2.0) as i64,
            position: (vehicle.position.x as i64, vehicle.position.y as i64),
            mileage_km: ((vehicle.mileage / 1000.0) as i64) / 2,
        }
    }

    /// Overlay rows, top to bottom.
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Fuel: {}%", self.fuel_percent),
            format!("Speed: {} km/h", self.speed_kmh),
            format!("Position: ({}, {})", self.position.0, self.position.1),
            format!("Mileage: {} km", self.mileage_km),
        ]
    }
}

/// Point-in-time summary of the car, written to the log on request.
#[derive(Debug, Clone)]
pub struct TripSnapshot {
    pub taken_at: DateTime<Local>,
    pub position: (f64, f64),
    pub mileage_km: f64,
    pub fuel_litres: f64,
    pub tire_wear_percent: i64,
}

impl TripSnapshot {
    pub fn capture(vehicle: &Vehicle) -> Self {
        TripSnapshot::capture_at(vehicle, Local::now())
    }

    pub fn capture_at(vehicle: &Vehicle, taken_at: DateTime<Local>) -> Self {
        TripSnapshot {
            taken_at,
            position: (vehicle.position.x, vehicle.position.y),
            mileage_km: vehicle.mileage / 2000.0,
            fuel_litres: vehicle.fuel / 20.0,
            tire_wear_percent: (vehicle.mileage / 1000.0) as i64,
        }
    }
}

impl fmt::Display for TripSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} position=({:.1}, {:.1}) mileage={:.2} km fuel={:.1} L tire_wear={}%",
            self.taken_at.format("%Y-%m-%d %H:%M:%S"),
            self.position.0,
            self.position.1,
            self.mileage_km,
            self.fuel_litres,
            self.tire_wear_percent
        )
    }
}
