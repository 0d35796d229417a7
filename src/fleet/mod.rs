//! Fleet composition: charging-session profiles and synthetic generation.

/// Seeded synthetic fleet sampling.
pub mod generator;
/// Per-EV charging-session profile and validation.
pub mod profile;

// Re-export the main types for convenience
pub use generator::generate_fleet;
pub use profile::EvProfile;
pub use profile::ProfileError;
pub use profile::validate_fleet;
