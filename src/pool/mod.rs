mod docker;
mod pool;

// forwarding declarations
pub use docker::{DockerContainer, DockerPool};
pub use pool::ContainerPool;
