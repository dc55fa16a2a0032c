//! # Thrust Allocator CLI
//!
//! Builds an actuator registry (explicit `[[actuators]]` from the config
//! file, or a random population), balances it and prints the solution as
//! JSON on stdout. Progress snapshots go to the log.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use thrust_alloc::allocator::{Allocator, Solution};
use thrust_alloc::builder::RegistryBuilder;
use thrust_alloc::config::{AllocConfig, StopRule};
use thrust_common::config::{ConfigError, ConfigLoader, LogLevel};
use thrust_common::report::{
    ActuatorSnapshot, CollectingSink, ReportSink, Snapshot, TracingSink,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Thrust Allocator: greedy torque balancing across thrusters
#[derive(Parser, Debug)]
#[command(name = "thrust_alloc")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Balance thruster torque and normalize throttles into [0, 1]")]
struct Args {
    /// Path to configuration TOML. Defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the random population (overrides generator.seed).
    #[arg(long)]
    seed: Option<u64>,

    /// Round stop rule: first_imperfect, first_balanced or exhaustive
    /// (overrides allocator.stop_rule).
    #[arg(long, value_name = "RULE")]
    stop_rule: Option<StopRule>,

    /// Print every snapshot, not only the final solution.
    #[arg(long)]
    report: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

/// Document printed on stdout.
#[derive(Debug, Serialize)]
struct Output {
    stop_rule: StopRule,
    exact: bool,
    solution: Solution,
    actuators: Vec<ActuatorSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshots: Option<Vec<Snapshot>>,
}

/// Logs every snapshot and keeps them for the output document.
#[derive(Default)]
struct CliSink {
    log: TracingSink,
    collected: CollectingSink,
}

impl ReportSink for CliSink {
    fn record(&mut self, snapshot: &Snapshot) {
        self.log.record(snapshot);
        self.collected.record(snapshot);
    }
}

fn main() {
    let args = Args::parse();
    let config = load_config(&args);
    let log_level = config
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, log_level);

    info!("Thrust Allocator v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = config
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|config| run(&args, config));

    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args, mut config: AllocConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(rule) = args.stop_rule {
        config.allocator.stop_rule = rule;
    }
    if args.seed.is_some() {
        config.generator.seed = args.seed;
    }
    config.validate()?;

    let builder = registry_builder(&config)?;
    let mut registry = builder.build()?;

    let stop_rule = config.allocator.stop_rule;
    info!(
        service = %config.shared.service_name,
        actuators = registry.len(),
        %stop_rule,
        "Config OK"
    );

    let mut sink = CliSink::default();
    let solution = Allocator::with_stop_rule(&mut registry, stop_rule).solve_with_sink(&mut sink)?;

    let snapshots = sink.collected.into_snapshots();
    let actuators = snapshots
        .last()
        .map(|s| s.actuators.clone())
        .unwrap_or_default();

    let output = Output {
        stop_rule,
        exact: solution.is_exact(),
        solution,
        actuators,
        snapshots: args.report.then_some(snapshots),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Pick the registry source: explicit `[[actuators]]` win over the generator.
fn registry_builder(config: &AllocConfig) -> Result<RegistryBuilder, ConfigError> {
    if config.actuators.is_empty() {
        let seed = config.generator.seed.unwrap_or_else(rand::random);
        info!(seed, "generating random actuator population");
        let mut rng = StdRng::seed_from_u64(seed);
        return RegistryBuilder::random(&config.generator, &mut rng);
    }

    if let Some(seed) = config.generator.seed {
        warn!(seed, "seed ignored: registry comes from [[actuators]]");
    }
    info!(
        count = config.actuators.len(),
        "building registry from configuration"
    );
    Ok(RegistryBuilder::new().with_entries(&config.actuators))
}

/// Load the config file, or defaults when no path was given.
fn load_config(args: &Args) -> Result<AllocConfig, ConfigError> {
    match args.config {
        Some(ref path) => AllocConfig::load(path),
        None => Ok(AllocConfig::default()),
    }
}

/// `--verbose` forces DEBUG over the configured level.
fn effective_level(args: &Args, log_level: LogLevel) -> LogLevel {
    if args.verbose {
        LogLevel::Debug
    } else {
        log_level
    }
}

/// Setup tracing subscriber based on CLI arguments and configured level.
///
/// Logs go to stderr so stdout carries only the JSON document.
fn setup_tracing(args: &Args, log_level: LogLevel) {
    let level = effective_level(args, log_level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thrust_alloc::config::ActuatorEntry;

    fn entry(id: &str, torque: f64) -> ActuatorEntry {
        ActuatorEntry {
            id: id.to_string(),
            torque,
            thrust: 1.0,
        }
    }

    #[test]
    fn explicit_actuators_win_over_seed() {
        let mut config = AllocConfig::default();
        config.generator.seed = Some(42);
        config.actuators = vec![entry("port", -2.0), entry("starboard", 2.0)];

        let registry = registry_builder(&config).unwrap().build().unwrap();
        let ids: Vec<_> = registry.ids().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["port", "starboard"]);
    }

    #[test]
    fn seeded_generator_is_reproducible() {
        let mut config = AllocConfig::default();
        config.generator.seed = Some(7);

        let a = registry_builder(&config).unwrap().build().unwrap();
        let b = registry_builder(&config).unwrap().build().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn inverted_generator_range_is_an_error() {
        let mut config = AllocConfig::default();
        config.generator.min_actuators = 6;
        config.generator.max_actuators = 3;
        config.generator.seed = Some(1);

        assert!(matches!(
            registry_builder(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn verbose_overrides_configured_level() {
        let quiet = Args::parse_from(["thrust_alloc"]);
        let verbose = Args::parse_from(["thrust_alloc", "--verbose"]);

        assert_eq!(effective_level(&quiet, LogLevel::Warn), LogLevel::Warn);
        assert_eq!(effective_level(&verbose, LogLevel::Warn), LogLevel::Debug);
    }

    #[test]
    fn level_directives_build_filters() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            let filter = EnvFilter::try_new(level.as_directive());
            assert!(filter.is_ok(), "{level:?}");
        }
    }

    #[test]
    fn config_path_is_loaded_without_validation() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("alloc.toml");
        std::fs::write(
            &path,
            "[generator]\nmin_actuators = 6\nmax_actuators = 3\n",
        )
        .unwrap();

        let args = Args::parse_from(["thrust_alloc", "--config", path.to_str().unwrap()]);
        let config = load_config(&args).unwrap();
        assert!(config.validate().is_err());
    }
}
