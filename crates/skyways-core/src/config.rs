//! Process-wide configuration. Loaded once from `config.json` at startup.
//!
//! Every field has a default, so a partial file only overrides what it names.
//! A missing or broken file never stops the simulation: `load_or_create`
//! falls back to the defaults and writes them out.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::ExecutionMode;

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Per-guide kinematic constants consumed by the navigation and avoidance math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightParams {
    /// Guide speed (units/s).
    pub speed: f32,
    /// Maximum heading change per tick (degrees).
    pub max_turn_degrees: f32,
    pub cruise_tolerance: f32,
    /// Descent threshold as a multiple of the target altitude.
    pub descent_ratio: f32,
    pub landing_tolerance: f32,
    pub alert_release_distance: f32,
    pub head_on_threshold: f32,
    pub evasive_turn_degrees: f32,
    /// Height above the source airport at which a flight appears.
    pub spawn_height: f32,
    pub altitude_fraction_min: f32,
    pub altitude_fraction_max: f32,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            speed: PLANE_SPEED,
            max_turn_degrees: MAX_TURN_DEGREES,
            cruise_tolerance: CRUISE_TOLERANCE,
            descent_ratio: DESCENT_RATIO,
            landing_tolerance: LANDING_TOLERANCE,
            alert_release_distance: ALERT_RELEASE_DISTANCE,
            head_on_threshold: HEAD_ON_THRESHOLD,
            evasive_turn_degrees: EVASIVE_TURN_DEGREES,
            spawn_height: SPAWN_HEIGHT,
            altitude_fraction_min: ALTITUDE_FRACTION_MIN,
            altitude_fraction_max: ALTITUDE_FRACTION_MAX,
        }
    }
}

impl FlightParams {
    /// Maximum heading change per tick in radians.
    pub fn max_turn_radians(&self) -> f32 {
        self.max_turn_degrees.to_radians()
    }

    /// Distance from the end point at which descent begins.
    pub fn descent_threshold(&self, target_altitude: f32) -> f32 {
        target_altitude * self.descent_ratio
    }
}

/// PD controller gains for plane stabilization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerGains {
    /// Proportional gain on the angular error.
    pub rotation_speed: f32,
    /// Derivative gain on the current angular velocity.
    pub damping: f32,
    pub max_angular_speed: f32,
    /// Rate of the exponential blend toward the commanded velocity.
    pub response_speed: f32,
    pub forward_weight: f32,
    pub up_weight: f32,
}

impl Default for StabilizerGains {
    fn default() -> Self {
        Self {
            rotation_speed: STABILIZER_ROTATION_SPEED,
            damping: STABILIZER_DAMPING,
            max_angular_speed: STABILIZER_MAX_ANGULAR_SPEED,
            response_speed: STABILIZER_RESPONSE_SPEED,
            forward_weight: STABILIZER_FORWARD_WEIGHT,
            up_weight: STABILIZER_UP_WEIGHT,
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub tick_rate: u32,
    pub execution_mode: ExecutionMode,
    /// Items per chunk in the parallel strategy.
    pub partition_size: usize,

    pub planet_radius: f32,
    pub airport_count: u32,
    pub max_plane_count: u32,

    pub spawn_interval_min: f64,
    pub spawn_interval_max: f64,
    pub initial_spawn_delay_min: f64,
    pub initial_spawn_delay_max: f64,

    pub enable_despawn_on_collision: bool,
    pub enable_explosions: bool,
    pub explosion_duration: f64,

    pub gravity_acceleration: f32,
    pub tether_rate: f32,
    pub body_radius: f32,
    pub trigger_radius: f32,

    pub flight: FlightParams,
    pub stabilizer: StabilizerGains,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            time_scale: 1.0,
            tick_rate: TICK_RATE,
            execution_mode: ExecutionMode::default(),
            partition_size: DEFAULT_PARTITION_SIZE,
            planet_radius: DEFAULT_PLANET_RADIUS,
            airport_count: DEFAULT_AIRPORT_COUNT,
            max_plane_count: DEFAULT_MAX_PLANE_COUNT,
            spawn_interval_min: SPAWN_INTERVAL_MIN_SECS,
            spawn_interval_max: SPAWN_INTERVAL_MAX_SECS,
            initial_spawn_delay_min: INITIAL_SPAWN_DELAY_MIN_SECS,
            initial_spawn_delay_max: INITIAL_SPAWN_DELAY_MAX_SECS,
            enable_despawn_on_collision: true,
            enable_explosions: true,
            explosion_duration: EXPLOSION_DURATION_SECS,
            gravity_acceleration: GRAVITY_ACCELERATION,
            tether_rate: TETHER_RATE,
            body_radius: BODY_RADIUS,
            trigger_radius: TRIGGER_RADIUS,
            flight: FlightParams::default(),
            stabilizer: StabilizerGains::default(),
        }
    }
}

impl SimConfig {
    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.planet_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "planet_radius must be positive, got {}",
                self.planet_radius
            )));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be non-zero".into()));
        }
        if self.partition_size == 0 {
            return Err(ConfigError::Invalid("partition_size must be non-zero".into()));
        }
        if self.spawn_interval_min > self.spawn_interval_max || self.spawn_interval_min < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "spawn interval bounds out of order: [{}, {}]",
                self.spawn_interval_min, self.spawn_interval_max
            )));
        }
        if self.initial_spawn_delay_min > self.initial_spawn_delay_max
            || self.initial_spawn_delay_min < 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "initial spawn delay bounds out of order: [{}, {}]",
                self.initial_spawn_delay_min, self.initial_spawn_delay_max
            )));
        }
        let flight = &self.flight;
        if flight.altitude_fraction_min > flight.altitude_fraction_max
            || flight.altitude_fraction_min < 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "altitude fraction bounds out of order: [{}, {}]",
                flight.altitude_fraction_min, flight.altitude_fraction_max
            )));
        }
        if !(flight.speed > 0.0) || !(flight.max_turn_degrees > 0.0) {
            return Err(ConfigError::Invalid(
                "flight speed and max_turn_degrees must be positive".into(),
            ));
        }
        if self.body_radius < 0.0 || self.trigger_radius < 0.0 {
            return Err(ConfigError::Invalid("physics radii must not be negative".into()));
        }
        Ok(())
    }

    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or fall back to defaults and persist them.
    ///
    /// Never fails: every error is logged and replaced by the default config.
    pub fn load_or_create(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {:?}", path);
                return config;
            }
            Err(ConfigError::Io { ref source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::warn!("Config file not found at {:?}, creating default config", path);
            }
            Err(e) => log::warn!("{}, using defaults", e),
        }

        let config = Self::default();
        if let Err(e) = config.save(path) {
            log::warn!("Could not write default config: {}", e);
        }
        config
    }
}

/// `config.json` in the current directory.
pub fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}
