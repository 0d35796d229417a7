//! EV fleet charging simulator comparing uncontrolled and rule-based smart
//! strategies over a single day.

pub mod config;
/// Charging-session profiles and synthetic fleet generation.
pub mod fleet;
pub mod io;
/// Allocation strategies, fleet aggregation, KPIs, and reporting.
pub mod sim;

#[cfg(feature = "api")]
pub mod api;
