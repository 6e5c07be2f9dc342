//! Simulation constants and default tuning parameters.
//!
//! Everything a deployment may want to tune is mirrored in `SimConfig`;
//! these values are the defaults written to a fresh `config.json`.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World ---

/// Planet radius (world units).
pub const DEFAULT_PLANET_RADIUS: f32 = 100.0;

/// Number of airports distributed over the planet.
pub const DEFAULT_AIRPORT_COUNT: u32 = 25;

/// Seed for the engine's setup RNG and the per-airport spawn streams.
pub const DEFAULT_SEED: u64 = 72;

// --- Population & spawning ---

/// Maximum simultaneously live guide/plane pairs.
pub const DEFAULT_MAX_PLANE_COUNT: u32 = 500;

/// Bounds for the interval between two departures from one airport (seconds).
pub const SPAWN_INTERVAL_MIN_SECS: f64 = 2.0;
pub const SPAWN_INTERVAL_MAX_SECS: f64 = 6.0;

/// Bounds for an airport's first departure time (seconds).
pub const INITIAL_SPAWN_DELAY_MIN_SECS: f64 = 2.0;
pub const INITIAL_SPAWN_DELAY_MAX_SECS: f64 = 10.0;

/// Height above the airport at which a flight appears.
pub const SPAWN_HEIGHT: f32 = 1.0;

/// Cruise altitude as a fraction of the chord distance to the destination.
pub const ALTITUDE_FRACTION_MIN: f32 = 0.01;
pub const ALTITUDE_FRACTION_MAX: f32 = 0.05;

// --- Flight ---

/// Guide speed (world units per second).
pub const PLANE_SPEED: f32 = 5.0;

/// Maximum change of heading per tick (degrees).
pub const MAX_TURN_DEGREES: f32 = 0.5;

/// Height band around the target altitude that counts as cruising.
pub const CRUISE_TOLERANCE: f32 = 0.25;

/// Descent starts at `target_altitude * DESCENT_RATIO` from the end point.
pub const DESCENT_RATIO: f32 = 8.0;

/// Distance to the end point at which a flight has landed.
pub const LANDING_TOLERANCE: f32 = 1.0;

// --- Avoidance ---

/// An alert is dropped once the threat is farther than this.
pub const ALERT_RELEASE_DISTANCE: f32 = 10.0;

/// `dot(to_threat, forward)` above which a threat counts as head-on.
pub const HEAD_ON_THRESHOLD: f32 = 0.95;

/// Starboard offset used for head-on and parallel encounters (degrees).
pub const EVASIVE_TURN_DEGREES: f32 = 30.0;

// --- Stabilizer ---

pub const STABILIZER_ROTATION_SPEED: f32 = 6.0;
pub const STABILIZER_DAMPING: f32 = 7.0;
pub const STABILIZER_MAX_ANGULAR_SPEED: f32 = 6.0;
pub const STABILIZER_RESPONSE_SPEED: f32 = 8.0;
pub const STABILIZER_FORWARD_WEIGHT: f32 = 1.0;
pub const STABILIZER_UP_WEIGHT: f32 = 0.5;

/// Squared angular error below which the stabilizer only damps.
pub const STABILIZER_SETTLE_EPSILON: f32 = 1.0e-6;

// --- Physics ---

/// Radius of a plane's solid body.
pub const BODY_RADIUS: f32 = 0.25;

/// Radius of a plane's proximity trigger volume.
pub const TRIGGER_RADIUS: f32 = 2.0;

/// Rate (1/s) at which a plane's linear velocity follows its guide.
pub const TETHER_RATE: f32 = 30.0;

/// Radial gravity applied to planes. Zero keeps planes on their guides.
pub const GRAVITY_ACCELERATION: f32 = 0.0;

// --- Explosions ---

/// Lifetime of an explosion actor (seconds).
pub const EXPLOSION_DURATION_SECS: f64 = 1.0;

// --- Execution ---

/// Items per chunk in the partitioned strategy.
pub const DEFAULT_PARTITION_SIZE: usize = 64;

/// File name of the configuration written next to the working directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
