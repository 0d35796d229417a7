//! Invariant tests for the two allocation strategies.

mod common;

use evfleet_sim::config::ScenarioConfig;
use evfleet_sim::fleet::generate_fleet;
use evfleet_sim::sim::engine::run_fleet;
use evfleet_sim::sim::strategy::Strategy;
use evfleet_sim::sim::types::{COMPLETION_EPS_KWH, HOURS_PER_DAY};

const STRATEGIES: [Strategy; 2] = [Strategy::Uncontrolled, Strategy::RuleBasedSmart];

#[test]
fn uncontrolled_charges_greedily_from_arrival() {
    // 15 kWh over hours 10-12 at 7 kW: two full hours, then the remainder.
    let fleet = vec![common::profile(1, 10, 13, 15.0)];
    let run = run_fleet(&fleet, &common::default_strategy_config(), Strategy::Uncontrolled)
        .expect("run should succeed");

    let r = &run.results[0];
    assert_eq!(r.hourly_energy[10], 7.0);
    assert_eq!(r.hourly_energy[11], 7.0);
    assert_eq!(r.hourly_energy[12], 1.0);
    assert_eq!(r.delivered_kwh, 15.0);
    assert!(r.completed);
}

#[test]
fn departure_truncates_an_oversized_demand() {
    // 25 kWh cannot fit into 3 hours at 7 kW; the EV leaves 4 kWh short.
    let fleet = vec![common::profile(1, 10, 13, 25.0)];
    let run = run_fleet(&fleet, &common::default_strategy_config(), Strategy::Uncontrolled)
        .expect("run should succeed");

    let r = &run.results[0];
    assert_eq!(r.hourly_energy[10..13], [7.0, 7.0, 7.0]);
    assert!((r.shortfall_kwh - 4.0).abs() < 1e-4);
    assert!(!r.completed);
    assert!(!r.feasible);
}

#[test]
fn smart_avoids_peak_hours_when_off_peak_suffices() {
    // Window 14-20 with peak 16-18: the 14 kWh fit into hours 14 and 15.
    let fleet = vec![common::profile(1, 14, 20, 14.0)];
    let run = run_fleet(&fleet, &common::default_strategy_config(), Strategy::RuleBasedSmart)
        .expect("run should succeed");

    let r = &run.results[0];
    assert_eq!(r.hourly_energy[14], 7.0);
    assert_eq!(r.hourly_energy[15], 7.0);
    for hour in 16..20 {
        assert_eq!(r.hourly_energy[hour], 0.0, "unexpected energy in hour {hour}");
    }
    assert!(r.completed);
}

#[test]
fn smart_never_charges_outside_the_session_window() {
    // Peak hours outside the window must not attract energy either way.
    let fleet = vec![common::profile(1, 8, 12, 20.0)];
    for strategy in STRATEGIES {
        let run = run_fleet(&fleet, &common::default_strategy_config(), strategy)
            .expect("run should succeed");
        let r = &run.results[0];
        for hour in 0..HOURS_PER_DAY {
            if !(8..12).contains(&hour) {
                assert_eq!(r.hourly_energy[hour], 0.0, "energy outside window at {hour}");
            }
        }
    }
}

#[test]
fn hourly_energy_never_exceeds_charger_rating() {
    let scenario = ScenarioConfig::baseline();
    let fleet = generate_fleet(&scenario.fleet, 100, 7);
    for strategy in STRATEGIES {
        let run = run_fleet(&fleet, &common::default_strategy_config(), strategy)
            .expect("run should succeed");
        for r in &run.results {
            for &kwh in &r.hourly_energy {
                assert!(kwh >= 0.0);
                assert!(kwh <= 7.0, "EV {} exceeds the rating: {kwh}", r.ev_id);
            }
        }
    }
}

#[test]
fn delivered_totals_are_identical_across_strategies() {
    // Both strategies fill the same amounts in a different placement, so the
    // per-EV delivered totals must match exactly, partial final hour included.
    let scenario = ScenarioConfig::baseline();
    let fleet = generate_fleet(&scenario.fleet, 100, 21);
    let cfg = common::default_strategy_config();

    let uncontrolled = run_fleet(&fleet, &cfg, Strategy::Uncontrolled).expect("run");
    let smart = run_fleet(&fleet, &cfg, Strategy::RuleBasedSmart).expect("run");

    for (u, s) in uncontrolled.results.iter().zip(&smart.results) {
        assert_eq!(
            u.delivered_kwh, s.delivered_kwh,
            "EV {} delivered totals diverge",
            u.ev_id
        );
        assert_eq!(u.completed, s.completed);
        assert_eq!(u.feasible, s.feasible);
    }
    assert_eq!(
        uncontrolled.kpi.total_delivered_kwh,
        smart.kpi.total_delivered_kwh
    );
}

#[test]
fn feasible_sessions_always_complete() {
    // Feasibility is strategy-independent: neither greedy order can waste a
    // window hour, so every feasible session finishes under both.
    let scenario = ScenarioConfig::baseline();
    let fleet = generate_fleet(&scenario.fleet, 200, 3);
    for strategy in STRATEGIES {
        let run = run_fleet(&fleet, &common::default_strategy_config(), strategy)
            .expect("run should succeed");
        for r in &run.results {
            if r.feasible {
                assert!(
                    r.completed,
                    "feasible EV {} left short by {} kWh",
                    r.ev_id, r.shortfall_kwh
                );
            }
        }
        assert_eq!(run.kpi.feasible_but_short_count, 0);
    }
}

#[test]
fn conservation_delivered_never_exceeds_need() {
    let scenario = ScenarioConfig::baseline();
    let fleet = generate_fleet(&scenario.fleet, 100, 11);
    for strategy in STRATEGIES {
        let run = run_fleet(&fleet, &common::default_strategy_config(), strategy)
            .expect("run should succeed");
        for r in &run.results {
            assert!(
                r.delivered_kwh <= r.energy_needed_kwh + COMPLETION_EPS_KWH,
                "EV {} overdelivered: {} > {}",
                r.ev_id,
                r.delivered_kwh,
                r.energy_needed_kwh
            );
            let hourly_sum: f32 = r.hourly_energy.iter().sum();
            assert!(
                (hourly_sum - r.delivered_kwh).abs() < 1e-3,
                "EV {} hourly placement does not add up to its total",
                r.ev_id
            );
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let scenario = ScenarioConfig::baseline();
    let fleet = generate_fleet(&scenario.fleet, 50, 5);
    for strategy in STRATEGIES {
        let cfg = common::default_strategy_config();
        let first = run_fleet(&fleet, &cfg, strategy).expect("run");
        let second = run_fleet(&fleet, &cfg, strategy).expect("run");
        assert_eq!(first.results, second.results);
    }
}
