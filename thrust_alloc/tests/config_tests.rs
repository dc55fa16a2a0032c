//! Configuration file to solved registry.

use std::fs;

use tempfile::TempDir;
use thrust_alloc::allocator::Allocator;
use thrust_alloc::builder::RegistryBuilder;
use thrust_alloc::config::{AllocConfig, StopRule};
use thrust_common::config::{ConfigError, LogLevel};

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("thrust_alloc.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn explicit_actuators_are_solved_in_file_order() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[shared]
log_level = "warn"
service_name = "scenario-b"

[allocator]
stop_rule = "first_balanced"

[[actuators]]
id = "port-fwd"
torque = -4.0
thrust = 1.0

[[actuators]]
id = "keel"
torque = -1.0
thrust = 1.0

[[actuators]]
id = "starboard-aft"
torque = 10.0
thrust = 1.0
"#,
    );

    let config = AllocConfig::load_validated(&path).unwrap();
    assert_eq!(config.shared.log_level, LogLevel::Warn);

    let mut registry = RegistryBuilder::new()
        .with_entries(&config.actuators)
        .build()
        .unwrap();
    let ids: Vec<_> = registry.ids().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["port-fwd", "keel", "starboard-aft"]);

    let solution = Allocator::with_stop_rule(&mut registry, config.allocator.stop_rule)
        .solve()
        .unwrap();
    assert_eq!(solution.rounds, 1);
    assert_eq!(registry.get("starboard-aft").unwrap().throttle(), 0.1);
}

#[test]
fn generator_only_file_uses_defaults_elsewhere() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[generator]\nseed = 3\nmax_actuators = 4\n");

    let config = AllocConfig::load_validated(&path).unwrap();
    assert_eq!(config.allocator.stop_rule, StopRule::FirstImperfect);
    assert_eq!(config.generator.seed, Some(3));
    assert_eq!(config.shared.service_name, "thrust-alloc");
    assert!(config.actuators.is_empty());
}

#[test]
fn invalid_generator_bounds_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[generator]\nmin_actuators = 1\n");

    let result = AllocConfig::load_validated(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn unknown_stop_rule_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[allocator]\nstop_rule = \"sometimes\"\n");

    let result = AllocConfig::load_validated(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn empty_service_name_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[shared]\nservice_name = \"\"\n");

    let result = AllocConfig::load_validated(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn sample_config_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/thrust_alloc.toml");
    let config = AllocConfig::load_validated(&path).unwrap();
    assert_eq!(config.actuators.len(), 3);
    assert_eq!(config.generator.seed, Some(42));
}
