/// Fleet simulation driver and error type.
pub mod engine;
pub mod feasibility;
pub mod kpi;
/// Hourly fleet-load aggregation.
pub mod load;
/// Console comparison of two strategy runs.
pub mod report;
pub mod strategy;
pub mod types;
