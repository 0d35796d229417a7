//! Seeded synthetic fleet generation.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::FleetConfig;

use super::profile::EvProfile;

/// Latest unplug boundary sampled; departures stay on the simulated day.
const LATEST_DEPARTURE_HOUR: u8 = 23;

/// Generates `n_evs` synthetic charging sessions for one day.
///
/// Sampling is uniform within the bounds carried by `fleet`: an arrival hour
/// in `arrival_hour_min..=arrival_hour_max`, a departure at least one hour
/// later, battery size (rounded to 0.1 kWh), and an SOC pair (rounded to
/// 0.01) where the target is lifted to sit at least `min_soc_lift` above the
/// initial SOC. EV ids count up from 1 in output order.
///
/// Deterministic for a fixed seed; the seed is passed explicitly rather than
/// read from ambient state, so callers control reproducibility.
pub fn generate_fleet(fleet: &FleetConfig, n_evs: u32, seed: u64) -> Vec<EvProfile> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=n_evs)
        .map(|ev_id| sample_profile(&mut rng, fleet, ev_id))
        .collect()
}

fn sample_profile(rng: &mut StdRng, fleet: &FleetConfig, ev_id: u32) -> EvProfile {
    let arrival_hour = rng.random_range(fleet.arrival_hour_min..=fleet.arrival_hour_max);
    let departure_hour = rng.random_range(arrival_hour + 1..=LATEST_DEPARTURE_HOUR);

    let battery_kwh =
        round_to_tenth(rng.random_range(fleet.battery_kwh_min..=fleet.battery_kwh_max));
    let initial_soc =
        round_to_hundredth(rng.random_range(fleet.initial_soc_min..=fleet.initial_soc_max));

    // Draw a target, then lift it so the session always asks for at least
    // `min_soc_lift` of SOC, staying inside the configured target band.
    let raw_target = rng.random_range(fleet.target_soc_min..=fleet.target_soc_max);
    let lifted = raw_target.max(initial_soc + fleet.min_soc_lift);
    let mut target_soc =
        round_to_hundredth(lifted.clamp(fleet.target_soc_min, fleet.target_soc_max));
    if target_soc <= initial_soc {
        // Rounding can collapse the lift for initial SOCs near the target band.
        target_soc = fleet
            .target_soc_max
            .min(round_to_hundredth(initial_soc + fleet.min_soc_lift));
    }

    EvProfile {
        ev_id,
        arrival_hour,
        departure_hour,
        battery_kwh,
        initial_soc,
        target_soc,
    }
}

fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

fn round_to_hundredth(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::profile::validate_fleet;

    fn bounds() -> FleetConfig {
        FleetConfig::default()
    }

    #[test]
    fn deterministic_for_same_seed() {
        let fleet_a = generate_fleet(&bounds(), 50, 42);
        let fleet_b = generate_fleet(&bounds(), 50, 42);
        assert_eq!(fleet_a, fleet_b);
    }

    #[test]
    fn generated_fleet_passes_validation() {
        let fleet = generate_fleet(&bounds(), 200, 7);
        assert_eq!(fleet.len(), 200);
        assert!(validate_fleet(&fleet).is_ok());
    }

    #[test]
    fn samples_stay_within_bounds() {
        let cfg = bounds();
        for p in generate_fleet(&cfg, 100, 99) {
            assert!(p.arrival_hour >= cfg.arrival_hour_min);
            assert!(p.arrival_hour <= cfg.arrival_hour_max);
            assert!(p.departure_hour > p.arrival_hour);
            assert!(p.departure_hour <= LATEST_DEPARTURE_HOUR);
            assert!(p.battery_kwh >= cfg.battery_kwh_min - 0.05);
            assert!(p.battery_kwh <= cfg.battery_kwh_max + 0.05);
            assert!(p.initial_soc >= cfg.initial_soc_min - 0.005);
            assert!(p.initial_soc <= cfg.initial_soc_max + 0.005);
            assert!(p.target_soc <= cfg.target_soc_max + 0.005);
            assert!(p.target_soc > p.initial_soc);
        }
    }

    #[test]
    fn ev_ids_count_up_from_one() {
        let fleet = generate_fleet(&bounds(), 5, 1);
        let ids: Vec<u32> = fleet.iter().map(|p| p.ev_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_fleet_is_allowed() {
        assert!(generate_fleet(&bounds(), 0, 42).is_empty());
    }
}
