//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Fleet size, seed, and charger rating.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Sampling bounds for synthetic session generation.
    #[serde(default)]
    pub fleet: FleetConfig,
    /// Rule-based smart strategy parameters.
    #[serde(default)]
    pub smart: SmartConfig,
}

/// Fleet size, seed, and charger rating.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of EVs to generate.
    pub evs: u32,
    /// Master random seed.
    pub seed: u64,
    /// Per-EV charger rating (kW, must be > 0).
    pub charging_power_kw: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            evs: 50,
            seed: 42,
            charging_power_kw: 7.0,
        }
    }
}

/// Sampling bounds for synthetic session generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FleetConfig {
    /// Earliest sampled arrival hour (inclusive).
    pub arrival_hour_min: u8,
    /// Latest sampled arrival hour (inclusive, must be <= 22 so a departure
    /// hour still fits the day).
    pub arrival_hour_max: u8,
    /// Smallest battery capacity (kWh).
    pub battery_kwh_min: f32,
    /// Largest battery capacity (kWh).
    pub battery_kwh_max: f32,
    /// Lowest initial SOC on arrival.
    pub initial_soc_min: f32,
    /// Highest initial SOC on arrival.
    pub initial_soc_max: f32,
    /// Lower bound of the target SOC band.
    pub target_soc_min: f32,
    /// Upper bound of the target SOC band.
    pub target_soc_max: f32,
    /// Minimum SOC gained per session; targets are lifted to at least
    /// `initial_soc + min_soc_lift`.
    pub min_soc_lift: f32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            arrival_hour_min: 0,
            arrival_hour_max: 20,
            battery_kwh_min: 40.0,
            battery_kwh_max: 80.0,
            initial_soc_min: 0.15,
            initial_soc_max: 0.70,
            target_soc_min: 0.80,
            target_soc_max: 0.95,
            min_soc_lift: 0.10,
        }
    }
}

/// Rule-based smart strategy parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmartConfig {
    /// Hours of day (0-23) the smart strategy defers; may be empty.
    pub peak_hours: Vec<u8>,
}

impl Default for SmartConfig {
    fn default() -> Self {
        Self {
            peak_hours: vec![16, 17, 18],
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.charging_power_kw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario (commuter fleet, 7 kW chargers,
    /// evening peak 16-18).
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            fleet: FleetConfig::default(),
            smart: SmartConfig::default(),
        }
    }

    /// Returns the evening-rush preset: a larger commuter fleet arriving
    /// between 15:00 and 20:00 with emptier batteries.
    pub fn evening_rush() -> Self {
        Self {
            simulation: SimulationConfig {
                evs: 80,
                ..SimulationConfig::default()
            },
            fleet: FleetConfig {
                arrival_hour_min: 15,
                arrival_hour_max: 20,
                initial_soc_min: 0.10,
                initial_soc_max: 0.45,
                ..FleetConfig::default()
            },
            smart: SmartConfig {
                peak_hours: vec![17, 18, 19],
            },
        }
    }

    /// Returns the overnight-fleet preset: depot vehicles arriving late with
    /// large batteries on 11 kW chargers, leaving only short windows before
    /// the end of day.
    pub fn overnight_fleet() -> Self {
        Self {
            simulation: SimulationConfig {
                evs: 30,
                charging_power_kw: 11.0,
                ..SimulationConfig::default()
            },
            fleet: FleetConfig {
                arrival_hour_min: 18,
                arrival_hour_max: 22,
                battery_kwh_min: 60.0,
                battery_kwh_max: 100.0,
                initial_soc_min: 0.20,
                initial_soc_max: 0.60,
                ..FleetConfig::default()
            },
            smart: SmartConfig {
                peak_hours: vec![18, 19, 20],
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "evening_rush", "overnight_fleet"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "evening_rush" => Ok(Self::evening_rush()),
            "overnight_fleet" => Ok(Self::overnight_fleet()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. A fleet size of
    /// zero is deliberately allowed; an empty run is well defined.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if !s.charging_power_kw.is_finite() || s.charging_power_kw <= 0.0 {
            errors.push(ConfigError {
                field: "simulation.charging_power_kw".into(),
                message: "must be > 0 and finite".into(),
            });
        }

        let fl = &self.fleet;
        // NaN bounds slip through every ordering check below (all
        // comparisons are false) and panic later in the range sampler, so
        // finiteness is checked first.
        for (field, value) in [
            ("fleet.battery_kwh_min", fl.battery_kwh_min),
            ("fleet.battery_kwh_max", fl.battery_kwh_max),
            ("fleet.initial_soc_min", fl.initial_soc_min),
            ("fleet.initial_soc_max", fl.initial_soc_max),
            ("fleet.target_soc_min", fl.target_soc_min),
            ("fleet.target_soc_max", fl.target_soc_max),
            ("fleet.min_soc_lift", fl.min_soc_lift),
        ] {
            if !value.is_finite() {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be finite".into(),
                });
            }
        }
        if fl.arrival_hour_min > fl.arrival_hour_max {
            errors.push(ConfigError {
                field: "fleet.arrival_hour_min".into(),
                message: "must be <= fleet.arrival_hour_max".into(),
            });
        }
        if fl.arrival_hour_max > 22 {
            errors.push(ConfigError {
                field: "fleet.arrival_hour_max".into(),
                message: "must be <= 22 so a departure hour fits the day".into(),
            });
        }
        if fl.battery_kwh_min <= 0.0 {
            errors.push(ConfigError {
                field: "fleet.battery_kwh_min".into(),
                message: "must be > 0".into(),
            });
        }
        if fl.battery_kwh_min > fl.battery_kwh_max {
            errors.push(ConfigError {
                field: "fleet.battery_kwh_min".into(),
                message: "must be <= fleet.battery_kwh_max".into(),
            });
        }
        if !(0.0..=1.0).contains(&fl.initial_soc_min) || !(0.0..=1.0).contains(&fl.initial_soc_max)
        {
            errors.push(ConfigError {
                field: "fleet.initial_soc_min".into(),
                message: "bounds must be in [0.0, 1.0]".into(),
            });
        }
        if fl.initial_soc_min > fl.initial_soc_max {
            errors.push(ConfigError {
                field: "fleet.initial_soc_min".into(),
                message: "must be <= fleet.initial_soc_max".into(),
            });
        }
        if !(0.0..=1.0).contains(&fl.target_soc_min) || !(0.0..=1.0).contains(&fl.target_soc_max) {
            errors.push(ConfigError {
                field: "fleet.target_soc_min".into(),
                message: "bounds must be in [0.0, 1.0]".into(),
            });
        }
        if fl.target_soc_min > fl.target_soc_max {
            errors.push(ConfigError {
                field: "fleet.target_soc_min".into(),
                message: "must be <= fleet.target_soc_max".into(),
            });
        }
        if fl.min_soc_lift <= 0.0 {
            errors.push(ConfigError {
                field: "fleet.min_soc_lift".into(),
                message: "must be > 0".into(),
            });
        }
        // Keeps every generated session valid: the lifted target must fit
        // under the target band's ceiling even for the fullest arrival.
        if fl.initial_soc_max + fl.min_soc_lift > fl.target_soc_max {
            errors.push(ConfigError {
                field: "fleet.initial_soc_max".into(),
                message: "fleet.initial_soc_max + fleet.min_soc_lift must be <= fleet.target_soc_max"
                    .into(),
            });
        }

        for &hour in &self.smart.peak_hours {
            if hour > 23 {
                errors.push(ConfigError {
                    field: "smart.peak_hours".into(),
                    message: format!("hour {hour} is outside 0..24"),
                });
            }
        }

        errors
    }
}
