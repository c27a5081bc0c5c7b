use std::fmt;

use quick_error::quick_error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Phase of the migration applier that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStage {
    Source,
    Connect,
    Up,
}

impl fmt::Display for MigrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            MigrationStage::Source => "failed to create migration source",
            MigrationStage::Connect => "failed to create migration engine",
            MigrationStage::Up => "failed migration up",
        };

        f.write_str(message)
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum RunnerError {
        Provision(err: BoxError) {
            display("failed to start container: {}", err)
            source(&**err)
        }
        UnsupportedPolicy(message: String) {
            display("unsupported host policy: {}", message)
        }
        PortNotFound(port: u16) {
            display("unable to get port {}/tcp", port)
        }
        ReadinessExhausted(attempts: usize, err: sqlx::Error) {
            display("database not ready after {} attempts: {}", attempts, err)
            source(err)
        }
        Migration(stage: MigrationStage, err: sqlx::migrate::MigrateError) {
            display("{}: {}", stage, err)
            source(err)
        }
        Close(err: BoxError) {
            display("failed to close container: {}", err)
            source(&**err)
        }
        Config(message: String) {
            display("invalid configuration: {}", message)
        }
    }
}

pub type Result<T> = std::result::Result<T, RunnerError>;
