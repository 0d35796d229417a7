//! API response and query types.
//!
//! Field names follow the CSV export schema for consistency across output
//! formats.

use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::sim::kpi::KpiSummary;
use crate::sim::types::EvResult;

/// Combined state response: scenario summary and both strategies' KPIs.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// Scenario the runs were produced from.
    pub scenario: ScenarioSummary,
    /// KPIs of the uncontrolled run.
    pub uncontrolled: KpiRecord,
    /// KPIs of the smart run.
    pub smart: KpiRecord,
    /// Peak reduction of smart relative to uncontrolled, in percent.
    pub peak_reduction_pct: f32,
}

/// Scenario parameters echoed back by the API.
#[derive(Debug, Serialize)]
pub struct ScenarioSummary {
    /// Number of EVs simulated.
    pub evs: u32,
    /// Random seed the fleet was generated from.
    pub seed: u64,
    /// Per-EV charger rating (kW).
    pub charging_power_kw: f32,
    /// Peak hours the smart strategy defers.
    pub peak_hours: Vec<u8>,
}

impl From<&ScenarioConfig> for ScenarioSummary {
    fn from(cfg: &ScenarioConfig) -> Self {
        Self {
            evs: cfg.simulation.evs,
            seed: cfg.simulation.seed,
            charging_power_kw: cfg.simulation.charging_power_kw,
            peak_hours: cfg.smart.peak_hours.clone(),
        }
    }
}

/// KPI block for one strategy run.
#[derive(Debug, Serialize)]
pub struct KpiRecord {
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
    /// Mean shortfall over incomplete EVs only (kWh).
    pub avg_shortfall_kwh: f32,
    /// 95th-percentile shortfall over incomplete EVs (kWh).
    pub p95_shortfall_kwh: f32,
    /// Number of EVs whose demand cannot fit their window.
    pub infeasible_count: usize,
    /// Incomplete EVs that were classified feasible.
    pub feasible_but_short_count: usize,
}

impl From<&KpiSummary> for KpiRecord {
    fn from(kpi: &KpiSummary) -> Self {
        Self {
            peak_load_kw: kpi.peak_load_kw,
            total_delivered_kwh: kpi.total_delivered_kwh,
            total_needed_kwh: kpi.total_needed_kwh,
            completion_rate: kpi.completion_rate,
            incomplete_count: kpi.incomplete_count,
            avg_shortfall_kwh: kpi.avg_shortfall_kwh,
            p95_shortfall_kwh: kpi.p95_shortfall_kwh,
            infeasible_count: kpi.infeasible_count,
            feasible_but_short_count: kpi.feasible_but_short_count,
        }
    }
}

/// One hour of both strategies' load curves.
#[derive(Debug, Serialize)]
pub struct LoadRecord {
    /// Hour of day (0-23).
    pub hour: usize,
    /// Uncontrolled fleet load in this hour (kW).
    pub uncontrolled_kw: f32,
    /// Smart fleet load in this hour (kW).
    pub smart_kw: f32,
}

/// Per-EV result row using CSV schema field names.
#[derive(Debug, Serialize)]
pub struct ResultRecord {
    /// EV identifier.
    pub ev_id: u32,
    /// Plug-in hour (0-23).
    pub arrival_hour: u8,
    /// Unplug hour (1-24, exclusive bound).
    pub departure_hour: u8,
    /// Energy the session asked for (kWh).
    pub energy_needed_kwh: f32,
    /// Energy delivered over the window (kWh).
    pub energy_delivered_kwh: f32,
    /// Unmet energy (kWh).
    pub energy_shortfall_kwh: f32,
    /// Whether the session reached its target.
    pub completed: bool,
    /// Whether the window could carry the need at all.
    pub feasible: bool,
}

impl From<&EvResult> for ResultRecord {
    fn from(r: &EvResult) -> Self {
        Self {
            ev_id: r.ev_id,
            arrival_hour: r.arrival_hour,
            departure_hour: r.departure_hour,
            energy_needed_kwh: r.energy_needed_kwh,
            energy_delivered_kwh: r.delivered_kwh,
            energy_shortfall_kwh: r.shortfall_kwh,
            completed: r.completed,
            feasible: r.feasible,
        }
    }
}

/// Query parameters for the results endpoint.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    /// Strategy to read: `"uncontrolled"` (default) or `"smart"`.
    pub strategy: Option<String>,
    /// Lowest EV id to include (inclusive).
    pub from: Option<u32>,
    /// Highest EV id to include (inclusive).
    pub to: Option<u32>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
