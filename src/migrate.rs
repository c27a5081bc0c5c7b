use std::collections::HashSet;
use std::ops::Deref;
use std::path::PathBuf;

use sqlx::migrate::{Migrate, MigrateError, Migrator};
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::types::{MigrationStage, Result, RunnerError};

/// Ordered, read-only migrations handed to [apply] by the caller.
#[derive(Debug)]
pub enum MigrationSet {
    /// Migrations compiled into the binary, usually with `sqlx::migrate!()`.
    Embedded(&'static Migrator),
    /// A directory of migration files read when the set is applied.
    Directory(PathBuf),
}

impl MigrationSet {
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        MigrationSet::Directory(path.into())
    }

    async fn source(&self) -> std::result::Result<Source, MigrateError> {
        match self {
            MigrationSet::Embedded(migrator) => Ok(Source::Embedded(*migrator)),
            MigrationSet::Directory(path) => Ok(Source::Loaded(Migrator::new(path.clone()).await?)),
        }
    }
}

impl From<&'static Migrator> for MigrationSet {
    fn from(migrator: &'static Migrator) -> Self {
        MigrationSet::Embedded(migrator)
    }
}

enum Source {
    Embedded(&'static Migrator),
    Loaded(Migrator),
}

impl Deref for Source {
    type Target = Migrator;

    fn deref(&self) -> &Migrator {
        match self {
            Source::Embedded(migrator) => migrator,
            Source::Loaded(migrator) => migrator,
        }
    }
}

/// Versions applied by a single [apply] call, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub applied: Vec<i64>,
}

impl MigrationReport {
    /// Nothing was pending.
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

#[async_trait::async_trait]
pub trait MigrationEngine: Send + Sync {
    async fn up(&self, connection_string: &str, migrations: &MigrationSet)
        -> Result<MigrationReport>;
}

/// [MigrationEngine] running sqlx migrations over a single-connection `Any` pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlxMigrationEngine;

#[async_trait::async_trait]
impl MigrationEngine for SqlxMigrationEngine {
    async fn up(
        &self,
        connection_string: &str,
        migrations: &MigrationSet,
    ) -> Result<MigrationReport> {
        apply(connection_string, migrations).await
    }
}

fn at_stage(stage: MigrationStage) -> impl FnOnce(MigrateError) -> RunnerError {
    move |err| RunnerError::Migration(stage, err)
}

/// 1. Loads the migration source
/// 2. Connects a single-connection pool to `connection_string` and prepares the migrations table
/// 3. Runs every pending up migration
pub async fn apply(connection_string: &str, migrations: &MigrationSet) -> Result<MigrationReport> {
    let migrator = migrations
        .source()
        .await
        .map_err(at_stage(MigrationStage::Source))?;

    sqlx::any::install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .connect(connection_string)
        .await
        .map_err(MigrateError::Execute)
        .map_err(at_stage(MigrationStage::Connect))?;

    let report = run_pending(&pool, &migrator).await;

    pool.close().await;

    report
}

async fn applied_versions(pool: &AnyPool) -> std::result::Result<HashSet<i64>, MigrateError> {
    let mut conn = pool.acquire().await?;

    conn.ensure_migrations_table().await?;

    Ok(conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|migration| migration.version)
        .collect())
}

async fn run_pending(pool: &AnyPool, migrator: &Migrator) -> Result<MigrationReport> {
    // the connection goes back to the pool before the migrator acquires it
    let applied = applied_versions(pool)
        .await
        .map_err(at_stage(MigrationStage::Connect))?;

    let pending: Vec<i64> = migrator
        .iter()
        .filter(|migration| !migration.migration_type.is_down_migration())
        .map(|migration| migration.version)
        .filter(|version| !applied.contains(version))
        .collect();

    if pending.is_empty() {
        log::debug!("No pending migrations");
        return Ok(MigrationReport::default());
    }

    log::debug!("Running {} migration(s)", pending.len());

    migrator
        .run(pool)
        .await
        .map_err(at_stage(MigrationStage::Up))?;

    Ok(MigrationReport { applied: pending })
}
