use std::env;
use std::str::FromStr;
use std::time::Duration;

use backon::ExponentialBuilder;

use crate::consts::{
    FALLBACK_HOST_VAR, LOOPBACK_HOST, RETRY_MAX_DELAY_MS_VAR, RETRY_MAX_TIMES_VAR,
    RETRY_MIN_DELAY_MS_VAR,
};
use crate::types::{Result, RunnerError};

/// Readiness retry budget and host resolution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub retry_min_delay: Duration,
    pub retry_max_delay: Duration,
    pub retry_max_times: usize,
    pub fallback_host: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            retry_min_delay: Duration::from_millis(500),
            retry_max_delay: Duration::from_secs(10),
            retry_max_times: 20,
            fallback_host: LOOPBACK_HOST.to_owned(),
        }
    }
}

impl RunnerConfig {
    /// Defaults, overridden by any `DBRUNNER_*` variable present in the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let retry_min_delay = parse_var::<u64, _>(&lookup, RETRY_MIN_DELAY_MS_VAR)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_min_delay);
        let retry_max_delay = parse_var::<u64, _>(&lookup, RETRY_MAX_DELAY_MS_VAR)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_max_delay);
        let retry_max_times = parse_var::<usize, _>(&lookup, RETRY_MAX_TIMES_VAR)?
            .unwrap_or(defaults.retry_max_times);
        let fallback_host = lookup(FALLBACK_HOST_VAR)
            .filter(|host| !host.is_empty())
            .unwrap_or(defaults.fallback_host);

        if retry_min_delay > retry_max_delay {
            return Err(RunnerError::Config(format!(
                "{} ({:?}) is greater than {} ({:?})",
                RETRY_MIN_DELAY_MS_VAR, retry_min_delay, RETRY_MAX_DELAY_MS_VAR, retry_max_delay,
            )));
        }

        Ok(Self {
            retry_min_delay,
            retry_max_delay,
            retry_max_times,
            fallback_host,
        })
    }

    pub fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.retry_min_delay)
            .with_max_delay(self.retry_max_delay)
            .with_max_times(self.retry_max_times)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| RunnerError::Config(format!("{} could not be parsed: {}", key, e))),
        None => Ok(None),
    }
}
