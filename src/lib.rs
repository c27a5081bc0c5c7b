pub mod config;
pub mod consts;
pub mod driver;
pub mod migrate;
pub mod pool;
pub mod presets;
pub mod probe;
pub mod runner;
pub mod types;

pub use config::RunnerConfig;
pub use driver::{Dialect, EngineDescriptor, HostPolicy, RestartPolicy, RunOptions};
pub use migrate::{MigrationReport, MigrationSet};
pub use pool::{ContainerPool, DockerPool};
pub use runner::{DbHandle, Runner};
pub use types::{Result, RunnerError};
