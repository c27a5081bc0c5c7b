use std::time::Duration;

use backon::Retryable;
use sqlx::{AnyConnection, Connection};

use crate::driver::EngineDescriptor;
use crate::pool::ContainerPool;
use crate::types::{Result, RunnerError};

/// Opens a short-lived connection and checks the database answers.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    async fn ping(&self, connection_string: &str) -> std::result::Result<(), sqlx::Error>;
}

/// [Connector] using the sqlx `Any` driver, picked by the url scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlxConnector;

#[async_trait::async_trait]
impl Connector for SqlxConnector {
    async fn ping(&self, connection_string: &str) -> std::result::Result<(), sqlx::Error> {
        sqlx::any::install_default_drivers();

        let mut conn = AnyConnection::connect(connection_string).await?;
        let result = conn.ping().await;

        if let Err(e) = conn.close().await {
            log::debug!("Error closing probe connection: {}", e);
        }

        result
    }
}

/// 1. Looks up the host port mapped to [EngineDescriptor::port]
/// 2. Looks up the host, falling back to `fallback_host` when empty
/// 3. Renders the connection string
pub async fn resolve_conn_str<P>(
    pool: &P,
    container: &P::Container,
    descriptor: &EngineDescriptor,
    fallback_host: &str,
) -> Result<String>
where
    P: ContainerPool + ?Sized,
{
    let port = pool
        .get_port(container, descriptor.port)
        .await
        .ok_or(RunnerError::PortNotFound(descriptor.port))?;

    let host = match pool.get_host(container).await {
        Some(host) if !host.is_empty() => host,
        _ => fallback_host.to_owned(),
    };

    Ok(descriptor.conn_str(&host, port))
}

/// Resolves the connection string and pings it with the pool's backoff until the
/// database answers. Returns the connection string once a ping succeeded.
pub async fn wait_until_ready<P, C>(
    pool: &P,
    connector: &C,
    container: &P::Container,
    descriptor: &EngineDescriptor,
    fallback_host: &str,
) -> Result<String>
where
    P: ContainerPool + ?Sized,
    C: Connector + ?Sized,
{
    let conn_str = resolve_conn_str(pool, container, descriptor, fallback_host).await?;
    let mut attempts = 1;

    log::debug!("Waiting for {} to accept connections", descriptor.dialect);

    let result = (|| async { connector.ping(&conn_str).await })
        .retry(pool.backoff())
        .notify(|err: &sqlx::Error, dur: Duration| {
            attempts += 1;
            log::debug!(
                "{} not ready ({}), retrying in {:?}",
                descriptor.dialect,
                err,
                dur
            );
        })
        .await;

    match result {
        Ok(()) => {
            log::debug!("{} ready after {} attempt(s)", descriptor.dialect, attempts);
            Ok(conn_str)
        }
        Err(e) => Err(RunnerError::ReadinessExhausted(attempts, e)),
    }
}
