use serde::Deserialize;
use std::{env, fmt, path::Path, path::PathBuf, time::Duration};

use crate::use_cases::context::{DEFAULT_CONTROLLED_BODY, DEFAULT_MAX_RATE};

// Runtime/server constants (not world description).

pub const SNAPSHOT_BROADCAST_CAPACITY: usize = 64;
pub const DEFAULT_TIMESTEP: f64 = 0.002;
pub const DEFAULT_WHEELBASE: f64 = 0.29;
pub const DEFAULT_MAX_STEERING_ANGLE: f64 = 0.34;

pub fn http_port() -> u16 {
    env::var("SIM_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3100)
}

// Path to the TOML world description; the built-in world is used when unset.
pub fn world_config_path() -> Option<PathBuf> {
    env::var_os("SIM_WORLD_CONFIG").map(PathBuf::from)
}

pub const DEFAULT_OBSERVER_HZ: f64 = 30.0;

pub fn observer_interval() -> Duration {
    interval_from_hz(env::var("SIM_OBSERVER_HZ").ok().as_deref())
}

// Rates that are unparsable or give an unrepresentable or zero period fall back to the default.
fn interval_from_hz(raw: Option<&str>) -> Duration {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|hz| hz.is_finite() && *hz > 0.0)
        .and_then(|hz| Duration::try_from_secs_f64(1.0 / hz).ok())
        .filter(|period| !period.is_zero())
        .unwrap_or_else(|| Duration::from_secs_f64(1.0 / DEFAULT_OBSERVER_HZ))
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read world config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse world config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid world config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
pub struct PositionConfig {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

// Initial placement; heading is given as yaw about +Z.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
pub struct PoseConfig {
    #[serde(default)]
    pub position: PositionConfig,
    #[serde(default)]
    pub yaw: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CarConfig {
    pub name: String,
    #[serde(default = "default_wheelbase")]
    pub wheelbase: f64,
    #[serde(default = "default_max_steering_angle")]
    pub max_steering_angle: f64,
    #[serde(default)]
    pub pose: PoseConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    #[serde(default)]
    pub pose: PoseConfig,
}

/// World description loaded at startup.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WorldConfig {
    #[serde(default = "default_max_rate")]
    pub max_rate: f64,
    #[serde(default = "default_timestep")]
    pub timestep: f64,
    #[serde(default = "default_controlled_body")]
    pub controlled_body: String,
    #[serde(default)]
    pub cars: Vec<CarConfig>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

fn default_max_rate() -> f64 {
    DEFAULT_MAX_RATE
}

fn default_timestep() -> f64 {
    DEFAULT_TIMESTEP
}

fn default_controlled_body() -> String {
    DEFAULT_CONTROLLED_BODY.to_string()
}

fn default_wheelbase() -> f64 {
    DEFAULT_WHEELBASE
}

fn default_max_steering_angle() -> f64 {
    DEFAULT_MAX_STEERING_ANGLE
}

impl Default for WorldConfig {
    // One car and one block, enough to drive and reset without a config file.
    fn default() -> Self {
        Self {
            max_rate: DEFAULT_MAX_RATE,
            timestep: DEFAULT_TIMESTEP,
            controlled_body: DEFAULT_CONTROLLED_BODY.to_string(),
            cars: vec![CarConfig {
                name: DEFAULT_CONTROLLED_BODY.to_string(),
                wheelbase: DEFAULT_WHEELBASE,
                max_steering_angle: DEFAULT_MAX_STEERING_ANGLE,
                pose: PoseConfig::default(),
            }],
            bodies: vec![BodyConfig {
                name: "block".to_string(),
                pose: PoseConfig {
                    position: PositionConfig {
                        x: 1.0,
                        y: 0.0,
                        z: 0.0,
                    },
                    yaw: 0.0,
                },
            }],
        }
    }
}

impl WorldConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    // Loads from `SIM_WORLD_CONFIG` when set, otherwise the built-in world.
    pub fn from_env() -> Result<Self, ConfigError> {
        match world_config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        for car in &self.cars {
            // NaN fails every comparison, so test finiteness first.
            if !car.wheelbase.is_finite() || car.wheelbase <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "car '{}' needs a positive wheelbase, got {}",
                    car.name, car.wheelbase
                )));
            }
            if !car.max_steering_angle.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "car '{}' needs a finite max_steering_angle, got {}",
                    car.name, car.max_steering_angle
                )));
            }
        }
        Ok(())
    }
}
