//! CSV export for fleet profiles, per-EV results, and load curves.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::fleet::EvProfile;
use crate::sim::load::FleetLoadProfile;
use crate::sim::types::{EvResult, HOURS_PER_DAY};

/// Column header for the generated-profiles export.
const PROFILE_HEADER: &str = "ev_id,arrival_hour,departure_hour,battery_kwh,\
                              initial_soc,target_soc,energy_needed_kwh,available_hours";

/// Column header for the per-EV results export.
const RESULT_HEADER: &str = "ev_id,arrival_hour,departure_hour,energy_needed_kwh,\
                             energy_delivered_kwh,energy_shortfall_kwh,completed,feasible";

/// Column header for the strategy load-curve export.
const LOAD_HEADER: &str = "hour,uncontrolled_kw,smart_kw";

/// Exports generated charging profiles to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_profiles_csv(profiles: &[EvProfile], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_profiles_csv(profiles, buf)
}

/// Writes charging profiles as CSV to any writer.
///
/// One row per EV with the sampled session fields plus the derived energy
/// need and window length. Produces deterministic output for identical
/// inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_profiles_csv(profiles: &[EvProfile], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(PROFILE_HEADER.split(',').map(str::trim))?;
    for p in profiles {
        wtr.write_record(&[
            p.ev_id.to_string(),
            p.arrival_hour.to_string(),
            p.departure_hour.to_string(),
            format!("{:.1}", p.battery_kwh),
            format!("{:.2}", p.initial_soc),
            format!("{:.2}", p.target_soc),
            format!("{:.2}", p.energy_needed_kwh()),
            p.available_hours().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports per-EV simulation results to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_results_csv(results: &[EvResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_results_csv(results, buf)
}

/// Writes per-EV simulation results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_results_csv(results: &[EvResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(RESULT_HEADER.split(',').map(str::trim))?;
    for r in results {
        wtr.write_record(&[
            r.ev_id.to_string(),
            r.arrival_hour.to_string(),
            r.departure_hour.to_string(),
            format!("{:.3}", r.energy_needed_kwh),
            format!("{:.3}", r.delivered_kwh),
            format!("{:.3}", r.shortfall_kwh),
            r.completed.to_string(),
            r.feasible.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports both strategies' hourly load curves to a CSV file at the given
/// path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_load_csv(
    uncontrolled: &FleetLoadProfile,
    smart: &FleetLoadProfile,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_load_csv(uncontrolled, smart, buf)
}

/// Writes both strategies' load curves as CSV to any writer, one row per
/// hour of the day.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_load_csv(
    uncontrolled: &FleetLoadProfile,
    smart: &FleetLoadProfile,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(LOAD_HEADER.split(',').map(str::trim))?;
    for hour in 0..HOURS_PER_DAY {
        wtr.write_record(&[
            hour.to_string(),
            format!("{:.3}", uncontrolled.kw_at(hour)),
            format!("{:.3}", smart.kw_at(hour)),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
