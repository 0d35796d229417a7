//! Immutable per-EV charging session records and boundary validation.

use std::fmt;
use std::ops::Range;

/// One EV's charging session for the simulated day.
///
/// The EV is plugged in over `[arrival_hour, departure_hour)` — the departure
/// hour itself is not available for charging (arrival 10, departure 13 means
/// charging may happen in hours 10, 11 and 12). Energy need is derived from
/// battery size and the SOC lift instead of being stored, so a profile can
/// never carry an inconsistent need.
#[derive(Debug, Clone, PartialEq)]
pub struct EvProfile {
    /// Fleet-unique identifier (1-based in generated fleets).
    pub ev_id: u32,
    /// Plug-in hour of day, 0-23.
    pub arrival_hour: u8,
    /// Unplug hour of day, 1-24, exclusive upper bound; must exceed arrival.
    pub departure_hour: u8,
    /// Usable battery capacity in kWh, positive.
    pub battery_kwh: f32,
    /// State of charge at arrival, in [0, 1].
    pub initial_soc: f32,
    /// Desired state of charge at departure, in [0, 1]; must exceed `initial_soc`.
    pub target_soc: f32,
}

impl EvProfile {
    /// Energy required to lift the battery from initial to target SOC (kWh).
    pub fn energy_needed_kwh(&self) -> f32 {
        self.battery_kwh * (self.target_soc - self.initial_soc)
    }

    /// Number of whole hours the EV is plugged in.
    pub fn available_hours(&self) -> u8 {
        self.departure_hour - self.arrival_hour
    }

    /// The charging window as an hour-index range, `arrival..departure`.
    pub fn window(&self) -> Range<usize> {
        usize::from(self.arrival_hour)..usize::from(self.departure_hour)
    }

    /// Checks every profile invariant, returning the first violation.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] naming this EV and the offending field when
    /// the window is empty or out of range, the battery is non-positive, or
    /// the SOC pair is out of `[0, 1]` or not strictly increasing.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.arrival_hour > 23 {
            return Err(self.error(format!(
                "arrival_hour {} out of range 0-23",
                self.arrival_hour
            )));
        }
        if self.departure_hour < 1 || self.departure_hour > 24 {
            return Err(self.error(format!(
                "departure_hour {} out of range 1-24",
                self.departure_hour
            )));
        }
        if self.departure_hour <= self.arrival_hour {
            return Err(self.error(format!(
                "departure_hour {} must be greater than arrival_hour {}",
                self.departure_hour, self.arrival_hour
            )));
        }
        if !(self.battery_kwh > 0.0) || !self.battery_kwh.is_finite() {
            return Err(self.error(format!(
                "battery_kwh {} must be positive and finite",
                self.battery_kwh
            )));
        }
        if !(0.0..=1.0).contains(&self.initial_soc) {
            return Err(self.error(format!(
                "initial_soc {} must be in [0, 1]",
                self.initial_soc
            )));
        }
        if !(0.0..=1.0).contains(&self.target_soc) {
            return Err(self.error(format!(
                "target_soc {} must be in [0, 1]",
                self.target_soc
            )));
        }
        if self.target_soc <= self.initial_soc {
            return Err(self.error(format!(
                "target_soc {} must be greater than initial_soc {}",
                self.target_soc, self.initial_soc
            )));
        }
        Ok(())
    }

    fn error(&self, message: String) -> ProfileError {
        ProfileError {
            ev_id: self.ev_id,
            message,
        }
    }
}

/// A profile invariant violation, tagged with the offending EV.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileError {
    /// Identifier of the EV whose profile failed validation.
    pub ev_id: u32,
    /// Human-readable description of the violated invariant.
    pub message: String,
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid profile for EV {}: {}", self.ev_id, self.message)
    }
}

/// Validates a whole fleet, returning the first offending profile.
///
/// # Errors
///
/// Returns the [`ProfileError`] of the first profile (in input order) that
/// violates an invariant.
pub fn validate_fleet(profiles: &[EvProfile]) -> Result<(), ProfileError> {
    for profile in profiles {
        profile.validate()?;
    }
    Ok(())
}
