use std::fmt;
use std::sync::Arc;

/// Renders the full connection string given the resolved host and port.
pub type ConnStrProvider = Arc<dyn Fn(&str, u16) -> String + Send + Sync>;

/// Engine family, used to label log lines. The sql driver is picked by the url scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
}

impl Dialect {
    pub fn driver_name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.driver_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    No,
    OnFailure,
    UnlessStopped,
    Always,
}

/// Host-level container settings applied when the container is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPolicy {
    pub auto_remove: bool,
    pub restart_policy: RestartPolicy,
}

impl Default for HostPolicy {
    fn default() -> Self {
        Self {
            auto_remove: true,
            restart_policy: RestartPolicy::No,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub repository: String,
    pub tag: String,
    pub env: Vec<(String, String)>,
    pub exposed_ports: Vec<u16>,
    pub host_policy: HostPolicy,
}

impl RunOptions {
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            tag: tag.into(),
            env: Vec::new(),
            exposed_ports: Vec::new(),
            host_policy: HostPolicy::default(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_exposed_port(mut self, port: u16) -> Self {
        if !self.exposed_ports.contains(&port) {
            self.exposed_ports.push(port);
        }
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn image(&self) -> String {
        format!("{}:{}", self.repository, self.tag)
    }
}

/// Everything needed to start a database container and connect to it.
#[derive(Clone)]
pub struct EngineDescriptor {
    pub dialect: Dialect,
    pub port: u16,
    pub run_options: RunOptions,
    conn_str: ConnStrProvider,
}

impl EngineDescriptor {
    /// `port` is the tcp port the engine listens on inside the container; it is always exposed.
    pub fn new<F>(dialect: Dialect, port: u16, run_options: RunOptions, conn_str: F) -> Self
    where
        F: Fn(&str, u16) -> String + Send + Sync + 'static,
    {
        Self {
            dialect,
            port,
            run_options: run_options.with_exposed_port(port),
            conn_str: Arc::new(conn_str),
        }
    }

    pub fn conn_str(&self, host: &str, port: u16) -> String {
        (self.conn_str)(host, port)
    }

    /// Same descriptor with a different image tag.
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        let mut descriptor = self.clone();
        descriptor.run_options = descriptor.run_options.with_tag(tag);
        descriptor
    }
}

impl fmt::Debug for EngineDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineDescriptor")
            .field("dialect", &self.dialect)
            .field("port", &self.port)
            .field("run_options", &self.run_options)
            .finish_non_exhaustive()
    }
}
