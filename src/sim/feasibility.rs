//! Up-front feasibility classification for charging sessions.

use crate::fleet::EvProfile;

/// Decides whether a session can finish inside its plug-in window.
///
/// A session is feasible when the energy it asks for fits into its window at
/// the full charger rating, i.e. `energy_needed_kwh <= available_hours *
/// charging_power_kw`. The check is independent of any allocation strategy:
/// strategies only move energy between hours of the same window, so an
/// infeasible session stays short under every strategy.
///
/// # Arguments
///
/// * `profile` - Charging session to classify
/// * `charging_power_kw` - Per-EV charger rating in kW
///
/// # Returns
///
/// `true` when the window can hold the requested energy at full power.
pub fn is_feasible(profile: &EvProfile, charging_power_kw: f32) -> bool {
    let capacity_kwh = profile.available_hours() as f32 * charging_power_kw;
    profile.energy_needed_kwh() <= capacity_kwh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(arrival: u8, departure: u8, battery_kwh: f32) -> EvProfile {
        EvProfile {
            ev_id: 1,
            arrival_hour: arrival,
            departure_hour: departure,
            battery_kwh,
            initial_soc: 0.25,
            target_soc: 0.50,
        }
    }

    #[test]
    fn ample_window_is_feasible() {
        // Needs 15 kWh, window holds 3 * 7 = 21 kWh.
        let p = profile(10, 13, 60.0);
        assert!(is_feasible(&p, 7.0));
    }

    #[test]
    fn exact_fit_is_feasible() {
        // Needs 14 kWh, window holds exactly 2 * 7 = 14 kWh.
        let p = profile(10, 12, 56.0);
        assert!(is_feasible(&p, 7.0));
    }

    #[test]
    fn short_window_is_infeasible() {
        // Needs 25 kWh, window holds 3 * 7 = 21 kWh.
        let p = profile(10, 13, 100.0);
        assert!(!is_feasible(&p, 7.0));
    }

    #[test]
    fn zero_power_cannot_serve_demand() {
        let p = profile(0, 24, 60.0);
        assert!(!is_feasible(&p, 0.0));
    }
}
