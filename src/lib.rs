//! Top-down car driving core: vehicle physics, road mask collisions,
//! camera clamping and the menu state around them.

pub mod config;
pub mod cooldown;
pub mod error;
pub mod hud;
pub mod logging;
pub mod motion;
pub mod playlist;
pub mod road_mask;
pub mod simulation;
pub mod types;
pub mod ui_state;
pub mod utils;
pub mod vehicle;
pub mod viewport;

pub use error::SimError;
pub use simulation::Simulation;
