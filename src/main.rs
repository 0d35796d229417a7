//! Simulator entry point: CLI wiring and config-driven fleet runs.

use std::path::Path;
use std::process;

use evfleet_sim::config::ScenarioConfig;
use evfleet_sim::fleet::generate_fleet;
use evfleet_sim::io::export::{export_load_csv, export_profiles_csv, export_results_csv};
use evfleet_sim::sim::engine::{FleetRun, run_fleet};
use evfleet_sim::sim::report::ComparisonReport;
use evfleet_sim::sim::strategy::Strategy;
use evfleet_sim::sim::types::StrategyConfig;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    evs_override: Option<u32>,
    out_dir: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("evfleet-sim — EV fleet charging simulator");
    eprintln!();
    eprintln!("Usage: evfleet-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --evs <u32>              Override fleet size");
    eprintln!("  --out-dir <path>         Export profiles, results, and load CSVs");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after simulation");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        evs_override: None,
        out_dir: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--evs" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --evs requires a u32 argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<u32>() {
                    cli.evs_override = Some(n);
                } else {
                    eprintln!("error: --evs value \"{}\" is not a valid u32", args[i]);
                    process::exit(1);
                }
            }
            "--out-dir" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --out-dir requires a path argument");
                    process::exit(1);
                }
                cli.out_dir = Some(args[i].clone());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Writes the profile, per-EV result, and load-curve CSVs into `dir`.
fn export_outputs(
    dir: &Path,
    profiles: &[evfleet_sim::fleet::EvProfile],
    uncontrolled: &FleetRun,
    smart: &FleetRun,
) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;

    let profiles_path = dir.join("ev_profiles.csv");
    export_profiles_csv(profiles, &profiles_path)?;
    eprintln!("Profiles written to {}", profiles_path.display());

    let uncontrolled_path = dir.join("ev_results_uncontrolled.csv");
    export_results_csv(&uncontrolled.results, &uncontrolled_path)?;
    eprintln!("Results written to {}", uncontrolled_path.display());

    let smart_path = dir.join("ev_results_smart.csv");
    export_results_csv(&smart.results, &smart_path)?;
    eprintln!("Results written to {}", smart_path.display());

    let load_path = dir.join("fleet_load.csv");
    export_load_csv(&uncontrolled.load, &smart.load, &load_path)?;
    eprintln!("Load curves written to {}", load_path.display());

    Ok(())
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply overrides
    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(evs) = cli.evs_override {
        scenario.simulation.evs = evs;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Generate the fleet and run both strategies over it
    let profiles = generate_fleet(
        &scenario.fleet,
        scenario.simulation.evs,
        scenario.simulation.seed,
    );
    let strategy_cfg = StrategyConfig::with_peak_hours(
        scenario.simulation.charging_power_kw,
        scenario.smart.peak_hours.clone(),
    );

    let (uncontrolled, smart) = match run_fleet(&profiles, &strategy_cfg, Strategy::Uncontrolled)
        .and_then(|u| {
            run_fleet(&profiles, &strategy_cfg, Strategy::RuleBasedSmart).map(|s| (u, s))
        }) {
        Ok(runs) => runs,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Print per-EV results
    for run in [&uncontrolled, &smart] {
        println!("--- Per-EV results ({}) ---", run.strategy.label());
        for r in &run.results {
            println!("{r}");
        }
        println!();
    }

    // Print the side-by-side comparison
    println!("{}", ComparisonReport::new(&uncontrolled, &smart));

    // Export CSVs if requested
    if let Some(ref dir) = cli.out_dir {
        if let Err(e) = export_outputs(Path::new(dir), &profiles, &uncontrolled, &smart) {
            eprintln!("error: failed to write CSV outputs: {e}");
            process::exit(1);
        }
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(evfleet_sim::api::AppState {
            scenario,
            uncontrolled,
            smart,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(evfleet_sim::api::serve(state, addr));
    }
}
