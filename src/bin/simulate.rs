//! Fishing balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze catch rates and gear wear.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # Default: 200 runs x 50 encounters
//!   cargo run --bin simulate -- -n 50 --novice   # 50 runs with a beginner angler
//!   cargo run --bin simulate -- --seed 42        # Reproducible run

use castline::simulator::{run_simulation, SimConfig};
use castline::FishingConfig;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    let default_filter = match config.verbosity {
        0 => "castline=error",
        1 => "castline=warn",
        _ => "castline=info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with_writer(std::io::stderr)
        .init();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CASTLINE BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Encounters:     {}", config.encounters_per_run);
    println!("  Reaction Time:  {:.2}s", config.reaction_time);
    println!("  Reliability:    {:.0}%", config.hook_reliability * 100.0);
    println!("  Strength:       {:.1}", config.player_strength);
    println!("  Luck:           {:.2}", config.fishing_luck);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!("sim_report_{}.json", chrono::Utc::now().format("%Y%m%d_%H%M%S"));
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "-e" | "--encounters" => {
                if i + 1 < args.len() {
                    config.encounters_per_run = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--reaction" => {
                if i + 1 < args.len() {
                    if let Ok(secs) = args[i + 1].parse::<f64>() {
                        config.reaction_time = secs.max(0.0);
                    }
                    i += 1;
                }
            }
            "--strength" => {
                if i + 1 < args.len() {
                    if let Ok(strength) = args[i + 1].parse::<f64>() {
                        config.player_strength = strength.max(0.0);
                    }
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    match FishingConfig::load(&args[i + 1]) {
                        Ok(fishing) => config.fishing = fishing,
                        Err(e) => {
                            eprintln!("Could not load {}: {}", args[i + 1], e);
                            std::process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            "--quick" => config = keep_overrides(SimConfig::quick(), &config),
            "--novice" => config = keep_overrides(SimConfig::novice(), &config),
            "--expert" => config = keep_overrides(SimConfig::expert(), &config),
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "--json" => {}
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    config
}

/// Applies a preset without losing the seed, tuning file or verbosity
/// already given on the command line.
fn keep_overrides(preset: SimConfig, current: &SimConfig) -> SimConfig {
    SimConfig {
        seed: current.seed,
        fishing: current.fishing.clone(),
        verbosity: current.verbosity,
        ..preset
    }
}

fn print_help() {
    println!("Castline Balance Simulator");
    println!();
    println!("Usage: simulate [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -n, --runs <N>        Number of simulation runs (default: 200)");
    println!("  -e, --encounters <N>  Encounters per run (default: 50)");
    println!("  -s, --seed <N>        Random seed for reproducibility");
    println!("  --reaction <SECS>     Angler reaction time to a bite");
    println!("  --strength <N>        Angler starting strength");
    println!("  --config <PATH>       Fishing tuning JSON to test");
    println!("  --quick               Small run for a fast sanity check");
    println!("  --novice              Slow, weak beginner profile");
    println!("  --expert              Fast, strong veteran profile");
    println!("  --json                Save report as JSON file");
    println!("  -v, --verbose         Log every run");
    println!("  -q, --quiet           Only log errors");
    println!("  -h, --help            Show this help");
}
