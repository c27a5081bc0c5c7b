#![allow(dead_code)]

pub mod db;

use std::time::Duration;

use dbrunner::{MigrationSet, Runner, RunnerConfig};
use sqlx::migrate::Migrator;

pub static MIGRATIONS: Migrator = sqlx::migrate!("tests/migrations");

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_config() -> RunnerConfig {
    RunnerConfig {
        retry_min_delay: Duration::from_millis(250),
        retry_max_delay: Duration::from_secs(2),
        retry_max_times: 60,
        ..RunnerConfig::default()
    }
}

pub fn docker_runner() -> Runner<dbrunner::DockerPool> {
    init_logger();

    Runner::docker(test_config())
}

pub fn embedded_migrations() -> MigrationSet {
    MigrationSet::Embedded(&MIGRATIONS)
}

pub fn directory_migrations() -> MigrationSet {
    MigrationSet::directory(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/migrations"))
}
