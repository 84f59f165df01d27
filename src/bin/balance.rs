//! Balance analysis CLI.
//!
//! Prints per-topic balance tables, runs scenario simulations and checks the
//! config export against a saved reference.
//!
//! Usage:
//!   cargo run --bin balance -- <COMMAND> [OPTIONS]
//!
//! Examples:
//!   cargo run --bin balance -- all
//!   cargo run --bin balance -- waves --count 30
//!   cargo run --bin balance -- --seed 7 simulate active 3600
//!   cargo run --bin balance -- --json loot --difficulty hard
//!   cargo run --bin balance -- check-sync tools/balance-config-export.json

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use hashguard::analysis::sync::load_reference;
use hashguard::analysis::{
    check_sync, write_reference, Analysis, AnalysisOptions, BossAnalysis, ComponentAnalysis, FullReport,
    HashAnalysis, LootAnalysis, PowerAnalysis, ProtocolAnalysis, ThreatAnalysis, WaveAnalysis,
};
use hashguard::build_info::version_line;
use hashguard::core::{BalanceConfig, ConfigError};
use hashguard::economy::{process_offline_progression, PlayerProgress};
use hashguard::loot::Difficulty;
use hashguard::simulator::{run_scenario, ScenarioConfig, Strategy};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Balance analysis and scenario simulation for the hash-defense economy
#[derive(Parser, Debug)]
#[command(name = "balance", version, about)]
struct Cli {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// TOML file overriding the default balance values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for simulations and Monte Carlo runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Protocol damage, range, fire rate and upgrade costs
    Protocols,
    /// Hash production, CPU tiers and storage
    Hash,
    /// Power budget and towers supported per PSU level
    Power,
    /// Threat scaling and enemy unlock times
    Threat,
    /// Cyberboss phases and Zero-Day pressure
    Bosses,
    /// Wave size, HP and rewards
    Waves {
        /// Number of waves to describe
        #[arg(
            long,
            default_value_t = hashguard::analysis::waves::DEFAULT_WAVE_COUNT,
            value_parser = clap::value_parser!(u32).range(1..=hashguard::analysis::waves::MAX_WAVE_COUNT as i64)
        )]
        count: u32,
    },
    /// Component upgrade costs
    Components,
    /// Drop rates and pity
    Loot {
        /// Only analyse one difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Kills in the Monte Carlo run
        #[arg(long, default_value_t = hashguard::analysis::loot::DEFAULT_KILLS)]
        kills: u64,
    },
    /// Every analysis
    All,
    /// Run a scenario: passive, active or speedrun
    Simulate {
        scenario: Strategy,
        duration_seconds: u64,
    },
    /// Write the HTML balance reference
    Reference {
        #[arg(long, default_value = "balance-reference.html")]
        output: PathBuf,
    },
    /// Print the config export used by sync checks
    ExportConfig,
    /// Compare the config export against a reference JSON export
    CheckSync { reference: PathBuf },
    /// Apply offline progress to a saved profile
    Offline {
        profile: PathBuf,
        /// Write the updated profile back
        #[arg(long)]
        write: bool,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprint!("{}", e);
            return ExitCode::from(1);
        }
    };

    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "config override rejected");
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    match run(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "hashguard=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<BalanceConfig, ConfigError> {
    match path {
        Some(path) => BalanceConfig::load(path),
        None => Ok(BalanceConfig::default()),
    }
}

fn print_analysis<A: Analysis>(analysis: &A, json: bool) {
    if json {
        print_json(&analysis.to_json());
    } else {
        print!("{}", analysis.to_text());
    }
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn print_banner() {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              HASHGUARD BALANCE REPORT                         ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("  {}", version_line());
    println!();
}

fn run(cli: &Cli, config: &BalanceConfig) -> Result<ExitCode, ConfigError> {
    let mut options = AnalysisOptions::new(config);
    if let Some(seed) = cli.seed {
        options.seed = seed;
    }

    match &cli.command {
        Command::Protocols => print_analysis(&ProtocolAnalysis::build(config), cli.json),
        Command::Hash => print_analysis(&HashAnalysis::build(config), cli.json),
        Command::Power => print_analysis(&PowerAnalysis::build(config), cli.json),
        Command::Threat => print_analysis(&ThreatAnalysis::build(config), cli.json),
        Command::Bosses => print_analysis(&BossAnalysis::build(config), cli.json),
        Command::Waves { count } => print_analysis(&WaveAnalysis::build(*count, config), cli.json),
        Command::Components => print_analysis(&ComponentAnalysis::build(config), cli.json),
        Command::Loot { difficulty, kills } => print_analysis(
            &LootAnalysis::build(*difficulty, *kills, options.seed, config),
            cli.json,
        ),
        Command::All => {
            let report = FullReport::build(config, &options);
            if cli.json {
                print_json(&report);
            } else {
                print_banner();
                print!("{}", report.to_text());
            }
        }
        Command::Simulate {
            scenario,
            duration_seconds,
        } => {
            let mut scenario = ScenarioConfig::new(*scenario, *duration_seconds, config);
            if let Some(seed) = cli.seed {
                scenario = scenario.with_seed(seed);
            }
            let report = run_scenario(&scenario, config);
            if cli.json {
                println!("{}", report.to_json());
            } else {
                print!("{}", report.to_text());
            }
        }
        Command::Reference { output } => {
            write_reference(output, config, &options)?;
            println!("Reference written to: {}", output.display());
        }
        Command::ExportConfig => print_json(&config.export_json()),
        Command::CheckSync { reference } => {
            let reference = load_reference(reference)?;
            let report = check_sync(config, &reference);
            if cli.json {
                println!("{}", report.to_json());
            } else {
                print!("{}", report.to_text());
            }
            if report.has_mismatches() {
                return Ok(ExitCode::from(1));
            }
        }
        Command::Offline { profile, write } => {
            let mut progress = PlayerProgress::from_json(&fs::read_to_string(profile)?)?;
            let report = process_offline_progression(&mut progress, config);
            if cli.json {
                print_json(&report);
            } else {
                println!("Offline for {}s ({}s credited)", report.elapsed_seconds, report.credited_seconds);
                println!("  Rate:      {:.2} hash/s", report.hash_per_second);
                println!("  Earned:    {:.1}", report.hash_earned);
                println!("  Discarded: {:.1}", report.hash_discarded);
                println!("  Threat:    {:.2} -> {:.2}", report.threat_before, report.threat_after);
            }
            if *write {
                fs::write(profile, progress.to_json()?)?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
