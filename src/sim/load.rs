//! Fleet-level load aggregation.
//!
//! Hourly timesteps make the per-hour energy in kWh numerically equal to the
//! average power in kW for that hour, so the profile is stored and reported
//! in kW.

use super::types::{EvResult, HOURS_PER_DAY};

/// Aggregate charging load of a fleet across the 24 hours of a day.
///
/// Built by summing per-EV allocations hour by hour. Per-hour sums depend on
/// the order sessions are added only up to float rounding; callers comparing
/// profiles built in different orders should allow a small tolerance.
#[derive(Debug, Clone)]
pub struct FleetLoadProfile {
    hourly_kw: [f32; HOURS_PER_DAY],
}

impl FleetLoadProfile {
    /// Creates an empty profile with zero load in every hour.
    pub fn new() -> Self {
        Self {
            hourly_kw: [0.0; HOURS_PER_DAY],
        }
    }

    /// Builds the profile for a batch of simulated sessions.
    pub fn from_results(results: &[EvResult]) -> Self {
        let mut profile = Self::new();
        for result in results {
            profile.add_session(&result.hourly_energy);
        }
        profile
    }

    /// Adds one session's hourly allocation to the fleet total.
    pub fn add_session(&mut self, hourly_kwh: &[f32; HOURS_PER_DAY]) {
        for (total, kwh) in self.hourly_kw.iter_mut().zip(hourly_kwh) {
            *total += kwh;
        }
    }

    /// Returns the fleet load for one hour in kW.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24`.
    pub fn kw_at(&self, hour: usize) -> f32 {
        self.hourly_kw[hour]
    }

    /// Returns the full 24-hour load curve in kW.
    pub fn hourly_kw(&self) -> &[f32; HOURS_PER_DAY] {
        &self.hourly_kw
    }

    /// Returns the highest hourly load in kW.
    pub fn peak_kw(&self) -> f32 {
        self.hourly_kw.iter().copied().fold(0.0, f32::max)
    }

    /// Returns the first hour at which the peak load occurs.
    pub fn peak_hour(&self) -> usize {
        let peak = self.peak_kw();
        self.hourly_kw
            .iter()
            .position(|&kw| kw == peak)
            .unwrap_or(0)
    }

    /// Returns the total energy moved over the day in kWh.
    pub fn total_kwh(&self) -> f32 {
        self.hourly_kw.iter().sum()
    }
}

impl Default for FleetLoadProfile {
    fn default() -> Self {
        Self::new()
    }
}
