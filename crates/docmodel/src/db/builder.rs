use super::{Config, Db, Shared};
use crate::{driver::Driver, Error, Result};

use std::{sync::Arc, time::Duration};

#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
    driver: Option<Box<dyn Driver>>,
}

impl Builder {
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    pub fn database_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.config.database_name = name.into();
        self
    }

    pub fn operation_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.config.operation_timeout = timeout;
        self
    }

    pub fn driver(&mut self, driver: impl Driver) -> &mut Self {
        self.driver = Some(Box::new(driver));
        self
    }

    pub fn build(&mut self) -> Result<Db> {
        if self.config.database_name.is_empty() {
            return Err(Error::invalid_configuration("database name is empty"));
        }

        if self.config.operation_timeout.is_zero() {
            return Err(Error::invalid_configuration(
                "operation timeout must be greater than zero",
            ));
        }

        let Some(driver) = self.driver.take() else {
            return Err(Error::invalid_configuration("no driver configured"));
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        tracing::debug!(
            database = %self.config.database_name,
            timeout = ?self.config.operation_timeout,
            "database handle built"
        );

        Ok(Db {
            shared: Arc::new(Shared {
                config: self.config.clone(),
                driver,
                runtime,
            }),
        })
    }
}
