// default credentials
pub const POSTGRES_DEFAULT_USER: &str = "postgres";
pub const POSTGRES_DEFAULT_PASSWORD: &str = "postgres";
pub const MYSQL_DEFAULT_USER: &str = "mysql";
pub const MYSQL_DEFAULT_PASSWORD: &str = "mysql";

// images
pub const POSTGRES_REPOSITORY: &str = "postgres";
pub const POSTGRES_TAG: &str = "13-alpine";
pub const POSTGRES_PORT: u16 = 5432;
pub const MYSQL_REPOSITORY: &str = "mysql/mysql-server";
pub const MYSQL_TAG: &str = "latest";
pub const MYSQL_PORT: u16 = 3306;
pub const MYSQL_DATABASE: &str = "bananas";

pub const LOOPBACK_HOST: &str = "127.0.0.1";

// environment overrides read by RunnerConfig::from_env
pub const RETRY_MIN_DELAY_MS_VAR: &str = "DBRUNNER_RETRY_MIN_DELAY_MS";
pub const RETRY_MAX_DELAY_MS_VAR: &str = "DBRUNNER_RETRY_MAX_DELAY_MS";
pub const RETRY_MAX_TIMES_VAR: &str = "DBRUNNER_RETRY_MAX_TIMES";
pub const FALLBACK_HOST_VAR: &str = "DBRUNNER_FALLBACK_HOST";
