use std::time::Duration;

/// Connection settings for a [`Db`](super::Db).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Database the collections live in. Must not be empty.
    pub database_name: String,

    /// Deadline applied to every persistence call that does not take an
    /// explicit context.
    pub operation_timeout: Duration,
}

impl Config {
    pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new(database_name: impl Into<String>) -> Config {
        Config {
            database_name: database_name.into(),
            operation_timeout: Self::DEFAULT_OPERATION_TIMEOUT,
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new("")
    }
}
