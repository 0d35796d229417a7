//! Fleet simulation driver: validation, allocation, aggregation, KPIs.

use std::fmt;

use crate::fleet::{EvProfile, ProfileError, validate_fleet};

use super::feasibility::is_feasible;
use super::kpi::KpiSummary;
use super::load::FleetLoadProfile;
use super::strategy::Strategy;
use super::types::{COMPLETION_EPS_KWH, EvResult, HOURS_PER_DAY, StrategyConfig};

/// Rejection raised before any allocation work starts.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// The strategy configuration itself is unusable.
    InvalidConfig(String),
    /// A session in the input fleet failed validation.
    InvalidProfile(ProfileError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfig(message) => {
                write!(f, "invalid simulation config: {message}")
            }
            SimError::InvalidProfile(err) => err.fmt(f),
        }
    }
}

impl From<ProfileError> for SimError {
    fn from(err: ProfileError) -> Self {
        SimError::InvalidProfile(err)
    }
}

/// Complete outcome of one strategy applied to one fleet.
#[derive(Debug, Clone)]
pub struct FleetRun {
    /// Strategy that produced this run.
    pub strategy: Strategy,
    /// Per-EV outcomes, in input order.
    pub results: Vec<EvResult>,
    /// Aggregate hourly load curve.
    pub load: FleetLoadProfile,
    /// Fleet-level indicators derived from `results` and `load`.
    pub kpi: KpiSummary,
}

/// Simulates one day of charging for a whole fleet under one strategy.
///
/// Every profile is validated before any allocation runs, so a rejected
/// fleet produces no partial output. Each EV is then scheduled independently
/// and its hourly allocation folded into the fleet load curve.
///
/// # Arguments
///
/// * `profiles` - Charging sessions to simulate
/// * `cfg` - Charger rating and peak-hour set shared by the fleet
/// * `strategy` - Allocation policy to apply
///
/// # Errors
///
/// Returns `SimError::InvalidConfig` for a non-positive or non-finite
/// charger rating or a peak hour outside 0..24, and
/// `SimError::InvalidProfile` for the first session that fails validation.
pub fn run_fleet(
    profiles: &[EvProfile],
    cfg: &StrategyConfig,
    strategy: Strategy,
) -> Result<FleetRun, SimError> {
    validate_strategy_config(cfg)?;
    validate_fleet(profiles)?;

    let mut results = Vec::with_capacity(profiles.len());
    let mut load = FleetLoadProfile::new();

    for profile in profiles {
        let allocation = strategy.allocate(profile, cfg);
        let needed = profile.energy_needed_kwh();
        // Accumulated delivery can land a float ulp above the demand; clamp
        // so shortfall stays nonnegative.
        let shortfall = (needed - allocation.delivered_kwh).max(0.0);

        load.add_session(&allocation.hourly_kwh);
        results.push(EvResult {
            ev_id: profile.ev_id,
            arrival_hour: profile.arrival_hour,
            departure_hour: profile.departure_hour,
            energy_needed_kwh: needed,
            hourly_energy: allocation.hourly_kwh,
            delivered_kwh: allocation.delivered_kwh,
            shortfall_kwh: shortfall,
            completed: shortfall <= COMPLETION_EPS_KWH,
            feasible: is_feasible(profile, cfg.charging_power_kw),
        });
    }

    let kpi = KpiSummary::from_results(&results, &load);
    Ok(FleetRun {
        strategy,
        results,
        load,
        kpi,
    })
}

fn validate_strategy_config(cfg: &StrategyConfig) -> Result<(), SimError> {
    if !cfg.charging_power_kw.is_finite() || cfg.charging_power_kw <= 0.0 {
        return Err(SimError::InvalidConfig(format!(
            "charging_power_kw must be positive and finite, got {}",
            cfg.charging_power_kw
        )));
    }
    if let Some(&hour) = cfg.peak_hours.iter().find(|&&h| h as usize >= HOURS_PER_DAY) {
        return Err(SimError::InvalidConfig(format!(
            "peak hour {hour} is outside 0..24"
        )));
    }
    Ok(())
}
