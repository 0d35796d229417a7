//! Shared test fixtures for integration tests.

use evfleet_sim::fleet::EvProfile;
use evfleet_sim::sim::types::StrategyConfig;

/// Session whose energy need is exactly `battery_kwh / 4` (SOC 0.25 to
/// 0.50), which is exact in `f32` for the battery sizes used in tests.
pub fn profile(ev_id: u32, arrival: u8, departure: u8, needed_kwh: f32) -> EvProfile {
    EvProfile {
        ev_id,
        arrival_hour: arrival,
        departure_hour: departure,
        battery_kwh: needed_kwh * 4.0,
        initial_soc: 0.25,
        target_soc: 0.50,
    }
}

/// Default strategy configuration (7 kW chargers, evening peak 16-18).
pub fn default_strategy_config() -> StrategyConfig {
    StrategyConfig::with_peak_hours(7.0, vec![16, 17, 18])
}
