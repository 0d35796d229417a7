//! Core allocation types: strategy configuration and per-EV results.

use std::fmt;

/// Number of hourly slots in the simulation horizon (one day).
pub const HOURS_PER_DAY: usize = 24;

/// Shortfall at or below this many kWh counts as a completed session.
///
/// Allocation runs in `f32`; per-EV energies up to ~100 kWh accumulate
/// rounding on the order of 1e-5 kWh, so 1e-4 kWh separates a met need from
/// a real shortfall with margin.
pub const COMPLETION_EPS_KWH: f32 = 1e-4;

/// Whole-run charging configuration shared by every EV.
///
/// `charging_power_kw` is the constant power available in any charging hour.
/// `peak_hours` lists the hours of day (0-23) the smart strategy defers while
/// non-peak slots remain; the set may be empty, in which case the smart
/// strategy degrades to the uncontrolled fill order.
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    /// Constant charging power in kW, the per-hour energy cap at 1 h resolution.
    pub charging_power_kw: f32,
    /// Hours of day (0-23) designated as peak.
    pub peak_hours: Vec<u8>,
}

impl StrategyConfig {
    /// Creates a configuration with no designated peak hours.
    pub fn new(charging_power_kw: f32) -> Self {
        Self {
            charging_power_kw,
            peak_hours: Vec::new(),
        }
    }

    /// Creates a configuration with the given peak-hour set.
    pub fn with_peak_hours(charging_power_kw: f32, peak_hours: Vec<u8>) -> Self {
        Self {
            charging_power_kw,
            peak_hours,
        }
    }

    /// Returns `true` when `hour` is designated as a peak hour.
    pub fn is_peak_hour(&self, hour: usize) -> bool {
        self.peak_hours.iter().any(|&h| usize::from(h) == hour)
    }
}

/// Outcome of one EV's allocation under one strategy.
///
/// `hourly_energy` is always fully populated over the 24-hour horizon, with
/// zeros outside the EV's `[arrival_hour, departure_hour)` window. At hourly
/// resolution kWh-per-slot numerically equals average kW over the slot.
#[derive(Debug, Clone, PartialEq)]
pub struct EvResult {
    /// Identifier copied from the input profile.
    pub ev_id: u32,
    /// Plug-in hour (0-23), copied from the profile.
    pub arrival_hour: u8,
    /// Unplug hour (1-24, exclusive bound), copied from the profile.
    pub departure_hour: u8,
    /// Energy the session asked for (kWh).
    pub energy_needed_kwh: f32,
    /// Energy delivered in each hour of the day (kWh).
    pub hourly_energy: [f32; HOURS_PER_DAY],
    /// Total energy delivered over the day (kWh).
    pub delivered_kwh: f32,
    /// Unmet energy, `max(0, needed - delivered)` (kWh).
    pub shortfall_kwh: f32,
    /// Whether the shortfall is within [`COMPLETION_EPS_KWH`].
    pub completed: bool,
    /// Whether the window could carry the need at all (strategy-independent).
    pub feasible: bool,
}

impl fmt::Display for EvResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EV {:>4} | window {:>2}-{:<2} | need {:>6.2} kWh  delivered {:>6.2} kWh  \
             shortfall {:>5.2} kWh | completed={} feasible={}",
            self.ev_id,
            self.arrival_hour,
            self.departure_hour,
            self.energy_needed_kwh,
            self.delivered_kwh,
            self.shortfall_kwh,
            self.completed,
            self.feasible,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_hour_membership() {
        let config = StrategyConfig::with_peak_hours(7.0, vec![16, 17, 18]);
        assert!(!config.is_peak_hour(15));
        assert!(config.is_peak_hour(16));
        assert!(config.is_peak_hour(18));
        assert!(!config.is_peak_hour(19));
    }

    #[test]
    fn empty_peak_set_has_no_peak_hours() {
        let config = StrategyConfig::new(7.0);
        assert!((0..HOURS_PER_DAY).all(|h| !config.is_peak_hour(h)));
    }

    #[test]
    fn ev_result_display_does_not_panic() {
        let result = EvResult {
            ev_id: 3,
            arrival_hour: 10,
            departure_hour: 13,
            energy_needed_kwh: 15.0,
            hourly_energy: [0.0; HOURS_PER_DAY],
            delivered_kwh: 15.0,
            shortfall_kwh: 0.0,
            completed: true,
            feasible: true,
        };
        let s = format!("{result}");
        assert!(!s.is_empty());
    }
}
