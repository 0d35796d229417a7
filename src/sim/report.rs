//! Side-by-side rendering of two strategy runs.

use std::fmt;

use super::engine::FleetRun;
use super::types::HOURS_PER_DAY;

/// Pairs an uncontrolled run with a smart run over the same fleet for
/// console reporting.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonReport<'a> {
    uncontrolled: &'a FleetRun,
    smart: &'a FleetRun,
}

impl<'a> ComparisonReport<'a> {
    /// Creates a report over two runs of the same fleet.
    pub fn new(uncontrolled: &'a FleetRun, smart: &'a FleetRun) -> Self {
        Self {
            uncontrolled,
            smart,
        }
    }

    /// Percentage drop in peak load achieved by the smart run.
    ///
    /// Reports 0 when the uncontrolled peak is zero.
    pub fn peak_reduction_pct(&self) -> f32 {
        let before = self.uncontrolled.kpi.peak_load_kw;
        let after = self.smart.kpi.peak_load_kw;
        if before > 0.0 {
            100.0 * (before - after) / before
        } else {
            0.0
        }
    }
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Fleet charging comparison ===")?;
        writeln!(f)?;
        writeln!(f, "Hour  Uncontrolled kW    Smart kW")?;
        for hour in 0..HOURS_PER_DAY {
            writeln!(
                f,
                "{:>4}  {:>15.2}  {:>10.2}",
                hour,
                self.uncontrolled.load.kw_at(hour),
                self.smart.load.kw_at(hour)
            )?;
        }
        writeln!(
            f,
            "Peak  {:>15.2}  {:>10.2}",
            self.uncontrolled.kpi.peak_load_kw, self.smart.kpi.peak_load_kw
        )?;

        for run in [self.uncontrolled, self.smart] {
            writeln!(f)?;
            writeln!(f, "Strategy: {}", run.strategy.label())?;
            writeln!(f, "{}", run.kpi)?;
        }

        writeln!(f)?;
        write!(
            f,
            "Peak shaving: {:.2} kW (hour {}) -> {:.2} kW (hour {}) ({:.1}% reduction)",
            self.uncontrolled.kpi.peak_load_kw,
            self.uncontrolled.load.peak_hour(),
            self.smart.kpi.peak_load_kw,
            self.smart.load.peak_hour(),
            self.peak_reduction_pct()
        )
    }
}
