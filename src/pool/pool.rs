use backon::ExponentialBuilder;

use crate::driver::RunOptions;
use crate::types::Result;

/// The container operations the runner depends on.
#[async_trait::async_trait]
pub trait ContainerPool: Send + Sync {
    type Container: Send + Sync;

    async fn run_with_options(&self, options: &RunOptions) -> Result<Self::Container>;
    // host port mapped to `internal_port`/tcp, if any
    async fn get_port(&self, container: &Self::Container, internal_port: u16) -> Option<u16>;
    async fn get_host(&self, container: &Self::Container) -> Option<String>;
    /// Retry policy applied while waiting for a container to accept connections.
    fn backoff(&self) -> ExponentialBuilder;
    async fn close(&self, container: Self::Container) -> Result<()>;
}
