//! Ready-made descriptors for the engines the runner knows how to start.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::consts::{
    MYSQL_DATABASE, MYSQL_DEFAULT_PASSWORD, MYSQL_DEFAULT_USER, MYSQL_PORT, MYSQL_REPOSITORY,
    MYSQL_TAG, POSTGRES_DEFAULT_PASSWORD, POSTGRES_DEFAULT_USER, POSTGRES_PORT,
    POSTGRES_REPOSITORY, POSTGRES_TAG,
};
use crate::driver::{Dialect, EngineDescriptor, RunOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn postgres_default() -> Self {
        Self::new(POSTGRES_DEFAULT_USER, POSTGRES_DEFAULT_PASSWORD)
    }

    pub fn mysql_default() -> Self {
        Self::new(MYSQL_DEFAULT_USER, MYSQL_DEFAULT_PASSWORD)
    }

    fn encoded(&self) -> (String, String) {
        (
            utf8_percent_encode(&self.username, NON_ALPHANUMERIC).to_string(),
            utf8_percent_encode(&self.password, NON_ALPHANUMERIC).to_string(),
        )
    }
}

pub fn postgres(credentials: &Credentials) -> EngineDescriptor {
    let run_options = RunOptions::new(POSTGRES_REPOSITORY, POSTGRES_TAG)
        .with_env("POSTGRES_USER", credentials.username.as_str())
        .with_env("POSTGRES_PASSWORD", credentials.password.as_str())
        .with_env("listen_addresses", "'*'");
    let (user, password) = credentials.encoded();

    EngineDescriptor::new(Dialect::Postgres, POSTGRES_PORT, run_options, move |host, port| {
        format!(
            "postgres://{}:{}@{}:{}?sslmode=disable",
            user, password, host, port
        )
    })
}

pub fn mysql(credentials: &Credentials) -> EngineDescriptor {
    let run_options = RunOptions::new(MYSQL_REPOSITORY, MYSQL_TAG)
        .with_env("MYSQL_USER", credentials.username.as_str())
        .with_env("MYSQL_PASSWORD", credentials.password.as_str())
        .with_env("MYSQL_DATABASE", MYSQL_DATABASE);
    let (user, password) = credentials.encoded();

    // tls without certificate verification
    EngineDescriptor::new(Dialect::MySql, MYSQL_PORT, run_options, move |host, port| {
        format!(
            "mysql://{}:{}@{}:{}/{}?ssl-mode=preferred",
            user, password, host, port, MYSQL_DATABASE
        )
    })
}

pub fn default_postgres() -> EngineDescriptor {
    postgres(&Credentials::postgres_default())
}

pub fn default_mysql() -> EngineDescriptor {
    mysql(&Credentials::mysql_default())
}
