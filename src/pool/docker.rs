use backon::ExponentialBuilder;
use testcontainers::core::IntoContainerPort;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ContainerRequest, GenericImage, ImageExt};

use crate::config::RunnerConfig;
use crate::driver::{HostPolicy, RestartPolicy, RunOptions};
use crate::pool::ContainerPool;
use crate::types::{Result, RunnerError};

/// Container pool backed by the local docker daemon through testcontainers.
#[derive(Debug, Clone, Default)]
pub struct DockerPool {
    config: RunnerConfig,
}

pub struct DockerContainer {
    inner: ContainerAsync<GenericImage>,
}

impl DockerContainer {
    pub fn id(&self) -> &str {
        self.inner.id()
    }
}

impl DockerPool {
    pub fn new(config: RunnerConfig) -> Self {
        DockerPool { config }
    }

    fn validate(policy: &HostPolicy) -> Result<()> {
        // testcontainers removes every container it drops
        if !policy.auto_remove {
            return Err(RunnerError::UnsupportedPolicy(
                "containers are always removed by the docker pool".to_owned(),
            ));
        }

        // testcontainers never asks docker to restart a container
        match policy.restart_policy {
            RestartPolicy::No => Ok(()),
            other => Err(RunnerError::UnsupportedPolicy(format!(
                "restart policy {:?} is not supported by the docker pool",
                other
            ))),
        }
    }
}

#[async_trait::async_trait]
impl ContainerPool for DockerPool {
    type Container = DockerContainer;

    async fn run_with_options(&self, options: &RunOptions) -> Result<DockerContainer> {
        Self::validate(&options.host_policy)?;

        let image = options
            .exposed_ports
            .iter()
            .fold(
                GenericImage::new(options.repository.clone(), options.tag.clone()),
                |image, port| image.with_exposed_port((*port).tcp()),
            );
        let request = options
            .env
            .iter()
            .fold(ContainerRequest::from(image), |request, (key, value)| {
                request.with_env_var(key.as_str(), value.as_str())
            });

        log::debug!("Starting container from {}", options.image());

        let inner = request
            .start()
            .await
            .map_err(|e| RunnerError::Provision(Box::new(e)))?;

        log::info!("Started container {} from {}", inner.id(), options.image());

        Ok(DockerContainer { inner })
    }

    async fn get_port(&self, container: &DockerContainer, internal_port: u16) -> Option<u16> {
        match container.inner.get_host_port_ipv4(internal_port.tcp()).await {
            Ok(port) => Some(port),
            Err(e) => {
                log::debug!("No mapping for {}/tcp on {}: {}", internal_port, container.id(), e);
                None
            }
        }
    }

    async fn get_host(&self, container: &DockerContainer) -> Option<String> {
        container.inner.get_host().await.ok().map(|host| host.to_string())
    }

    fn backoff(&self) -> ExponentialBuilder {
        self.config.backoff()
    }

    async fn close(&self, container: DockerContainer) -> Result<()> {
        let id = container.id().to_owned();

        container
            .inner
            .rm()
            .await
            .map_err(|e| RunnerError::Close(Box::new(e)))?;

        log::info!("Closed container {}", id);

        Ok(())
    }
}
