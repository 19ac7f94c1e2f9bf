//! Configuration constants for the car simulation.

// Vehicle physics
pub const ACCELERATION: f64 = 100.0; // Units/s^2 while throttle is held
pub const MAX_SPEED: f64 = 120.0;
pub const MAX_REVERSE_SPEED: f64 = MAX_SPEED / 3.0;
pub const BRAKE_FACTOR: f64 = 0.5; // Fraction of ACCELERATION applied when braking/reversing
pub const FRICTION: f64 = 26.0; // Units/s removed each second, always towards zero
pub const DRAG: f64 = 0.02; // Air resistance, fraction of speed lost per second
pub const MIN_TURN_SPEED: f64 = 20.0; // Below this the wheels don't turn the car
pub const TURN_RATE: f64 = 120.0; // Degrees/s at full speed (handling)
pub const COLLISION_SPEED_FACTOR: f64 = 0.5; // Speed multiplier when bumping into blocked terrain

// Fuel
pub const FUEL_CAPACITY: f64 = 2000.0;
pub const THROTTLE_FUEL_RATE: f64 = 5.0; // Fuel/s while accelerating
pub const BRAKE_FUEL_RATE: f64 = 2.0; // Fuel/s while braking
pub const REFUEL_AMOUNT: f64 = 10.0;
pub const REFUEL_THRESHOLD: f64 = 1051.0; // At or above this a refuel fills the tank
pub const REFUEL_COOLDOWN: f64 = 0.33; // Seconds between refuel events while the key is held

// Music menu
pub const SONG_CHANGE_COOLDOWN: f64 = 0.2;
pub const VOLUME_CHANGE_COOLDOWN: f64 = 0.2;
pub const VOLUME_STEP: f32 = 5.0;
pub const DEFAULT_VOLUME: f32 = 50.0;
pub const DEFAULT_SONGS: [&str; 4] = [
    "basic_music.mp3",
    "Adele.mp3",
    "Ainsi-Bas-La-Vida.mp3",
    "Akela-hon.mp3",
];

// Start state
pub const START_X: f64 = 2450.0;
pub const START_Y: f64 = 2064.0;
pub const START_HEADING: f64 = 0.0;

// Camera and minimap
pub const VIEW_WIDTH: f64 = 1280.0;
pub const VIEW_HEIGHT: f64 = 768.0;
pub const MINIMAP_WIDTH: f64 = 300.0;
pub const MINIMAP_HEIGHT: f64 = 200.0;
pub const MINIMAP_MARGIN: f64 = 10.0; // Gap to the top-right corner of the screen
pub const ENLARGED_MINIMAP_SCALE: f64 = 0.27;

// Window
pub const WINDOW_WIDTH: i32 = 1280;
pub const WINDOW_HEIGHT: i32 = 768;
pub const CAR_LENGTH: f32 = 80.0;
pub const CAR_WIDTH: f32 = 40.0;

// Assets
pub const DEFAULT_MASK_ASSET: &str = "track_mask.png";
