//! Game balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 500 runs to zone 25
//!   cargo run --bin simulate -- -n 100 -z 10     # 100 runs to zone 10
//!   cargo run --bin simulate -- --accuracy 0.6   # Weaker player
//!   cargo run --bin simulate -- --seed 42        # Reproducible run

use hugoland::simulator::{run_simulation, SimConfig, SkillPolicy};
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              HUGOLAND BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Target Zone:    {}", config.target_zone);
    println!("  Accuracy:       {:.0}%", config.accuracy * 100.0);
    println!("  Max Turns:      {}", config.max_turns_per_run);
    println!("  Skills:         {:?}", config.skill_policy);
    println!("  Revive:         {}", config.revive_on_defeat);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => log::error!("failed to write {}: {}", filename, e),
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "-n" | "--runs" => {
                if let Some(v) = value {
                    config.num_runs = v.parse().unwrap_or(config.num_runs);
                    i += 1;
                }
            }
            "-z" | "--zone" => {
                if let Some(v) = value {
                    config.target_zone = v.parse().unwrap_or(config.target_zone);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if let Some(v) = value {
                    config.seed = v.parse().ok();
                    i += 1;
                }
            }
            "-a" | "--accuracy" => {
                if let Some(v) = value {
                    config.accuracy = v.parse().unwrap_or(config.accuracy);
                    i += 1;
                }
            }
            "-t" | "--turns" => {
                if let Some(v) = value {
                    config.max_turns_per_run = v.parse().unwrap_or(config.max_turns_per_run);
                    i += 1;
                }
            }
            "--skip-skills" => config.skill_policy = SkillPolicy::Skip,
            "--no-revive" => config.revive_on_defeat = false,
            "--no-shop" => config.chest_cost = None,
            "-v" | "--verbose" => config.verbosity = 2,
            "--quick" => config = SimConfig::zone_balance_test(10),
            "--perfect" => config = SimConfig::perfect_player(),
            "--struggling" => config = SimConfig::struggling_player(),
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Hugoland Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulation runs (default: 500)");
    println!("    -z, --zone <Z>        Target zone to reach (default: 25)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -a, --accuracy <P>    Chance of a correct answer, 0..1 (default: 0.75)");
    println!("    -t, --turns <T>       Max answered questions per run (default: 20,000)");
    println!("    --skip-skills         Skip every adventure skill round");
    println!("    --no-revive           End a run on its first defeat");
    println!("    --no-shop             Never open chests");
    println!("    -v, --verbose         Print every run");
    println!("    --json                Save JSON report");
    println!("    --quick               100 runs to zone 10");
    println!("    --perfect             Never-miss player to zone 50");
    println!("    --struggling          50% accuracy, no skills, no shopping");
    println!("    -h, --help            Show this help");
    println!();
    println!("Set RUST_LOG=debug to see rejected actions.");
}
