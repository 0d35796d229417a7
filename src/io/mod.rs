//! File output for simulation artifacts.

/// CSV writers for profiles, per-EV results, and load curves.
pub mod export;
