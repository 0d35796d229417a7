//! Post-hoc KPI computation from simulation results.

use std::fmt;

use super::load::FleetLoadProfile;
use super::types::EvResult;

/// Aggregate key performance indicators for one strategy run.
///
/// Computed post-hoc from the per-EV results and the aggregated load curve
/// to ensure consistency between detail data and reported metrics.
#[derive(Debug, Clone)]
pub struct KpiSummary {
    /// Peak fleet charging load (kW).
    pub peak_load_kw: f32,
    /// Total energy delivered across the fleet (kWh).
    pub total_delivered_kwh: f32,
    /// Total energy the fleet asked for (kWh).
    pub total_needed_kwh: f32,
    /// Fraction of EVs that reached their target SOC (0..=1).
    pub completion_rate: f32,
    /// Number of EVs that left short of target.
    pub incomplete_count: usize,
    /// Mean shortfall over incomplete EVs only (kWh, 0 when none).
    pub avg_shortfall_kwh: f32,
    /// 95th-percentile shortfall over incomplete EVs (kWh, interpolated).
    pub p95_shortfall_kwh: f32,
    /// Number of EVs whose demand cannot fit their window at rated power.
    pub infeasible_count: usize,
    /// Incomplete EVs that were classified feasible; nonzero means the
    /// strategy itself wasted window hours.
    pub feasible_but_short_count: usize,
}

impl KpiSummary {
    /// Computes all KPIs for a batch of simulated sessions.
    ///
    /// # Arguments
    ///
    /// * `results` - Per-EV outcomes for one strategy run
    /// * `load` - Fleet load curve aggregated from the same results
    ///
    /// # Returns
    ///
    /// A `KpiSummary` with all fields populated.
    pub fn from_results(results: &[EvResult], load: &FleetLoadProfile) -> Self {
        if results.is_empty() {
            return Self {
                peak_load_kw: 0.0,
                total_delivered_kwh: 0.0,
                total_needed_kwh: 0.0,
                completion_rate: 0.0,
                incomplete_count: 0,
                avg_shortfall_kwh: 0.0,
                p95_shortfall_kwh: 0.0,
                infeasible_count: 0,
                feasible_but_short_count: 0,
            };
        }

        let n = results.len() as f32;
        let mut delivered_sum = 0.0_f32;
        let mut needed_sum = 0.0_f32;
        let mut completed = 0_usize;
        let mut infeasible = 0_usize;
        let mut feasible_but_short = 0_usize;
        let mut shortfalls = Vec::new();

        for r in results {
            delivered_sum += r.delivered_kwh;
            needed_sum += r.energy_needed_kwh;

            if r.completed {
                completed += 1;
            } else {
                shortfalls.push(r.shortfall_kwh);
                if r.feasible {
                    feasible_but_short += 1;
                }
            }
            if !r.feasible {
                infeasible += 1;
            }
        }

        let avg_shortfall_kwh = if shortfalls.is_empty() {
            0.0
        } else {
            shortfalls.iter().sum::<f32>() / shortfalls.len() as f32
        };

        shortfalls.sort_by(f32::total_cmp);
        let p95_shortfall_kwh = percentile(&shortfalls, 0.95);

        Self {
            peak_load_kw: load.peak_kw(),
            total_delivered_kwh: delivered_sum,
            total_needed_kwh: needed_sum,
            completion_rate: completed as f32 / n,
            incomplete_count: shortfalls.len(),
            avg_shortfall_kwh,
            p95_shortfall_kwh,
            infeasible_count: infeasible,
            feasible_but_short_count: feasible_but_short,
        }
    }
}

/// Interpolated percentile of an ascending-sorted sample.
///
/// Uses the linear rank `fraction * (n - 1)` and blends the two neighboring
/// values; a single-element sample is its own percentile, an empty sample
/// reports 0.
fn percentile(sorted: &[f32], fraction: f32) -> f32 {
    match sorted {
        [] => 0.0,
        [only] => *only,
        _ => {
            let rank = fraction * (sorted.len() - 1) as f32;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(sorted.len() - 1);
            let weight = rank - lower as f32;
            sorted[lower] + weight * (sorted[upper] - sorted[lower])
        }
    }
}

impl fmt::Display for KpiSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Fleet KPIs ---")?;
        writeln!(f, "Peak load:             {:.2} kW", self.peak_load_kw)?;
        writeln!(
            f,
            "Energy delivered:      {:.2} / {:.2} kWh",
            self.total_delivered_kwh, self.total_needed_kwh
        )?;
        writeln!(
            f,
            "Completion rate:       {:.1}% ({} incomplete)",
            100.0 * self.completion_rate,
            self.incomplete_count
        )?;
        writeln!(
            f,
            "Avg shortfall:         {:.2} kWh",
            self.avg_shortfall_kwh
        )?;
        writeln!(
            f,
            "P95 shortfall:         {:.2} kWh",
            self.p95_shortfall_kwh
        )?;
        writeln!(f, "Infeasible sessions:   {}", self.infeasible_count)?;
        write!(f, "Feasible but short:    {}", self.feasible_but_short_count)
    }
}
