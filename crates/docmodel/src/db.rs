mod builder;
pub use builder::Builder;

mod config;
pub use config::Config;

use crate::{
    driver::{Driver, Namespace},
    Context, Error, Result,
};

use std::{future::Future, sync::Arc, time::Duration};

/// Shared state between all `Db` clones.
struct Shared {
    config: Config,
    driver: Box<dyn Driver>,
    runtime: tokio::runtime::Runtime,
}

/// A database handle.
///
/// Persistence calls are synchronous: each one drives the driver future on a
/// runtime owned by the handle. Calling them from inside another async
/// runtime panics.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    /// Context used by the persistence functions without a `_with_ctx`
    /// suffix.
    pub fn default_context(&self) -> Context {
        Context::with_timeout(self.shared.config.operation_timeout)
    }

    pub(crate) fn namespace<'a>(&'a self, collection: &'a str) -> Result<Namespace<'a>> {
        if collection.is_empty() {
            return Err(Error::invalid_model("collection name is empty"));
        }

        Ok(Namespace {
            database: &self.shared.config.database_name,
            collection,
        })
    }

    /// Runs a driver future to completion, bounded by the context deadline.
    pub(crate) fn run<T>(
        &self,
        ctx: &Context,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match ctx.remaining() {
            Some(remaining) if remaining.is_zero() => {
                Err(Error::operation_timed_out(Duration::ZERO))
            }
            Some(remaining) => self.shared.runtime.block_on(async {
                match tokio::time::timeout(remaining, fut).await {
                    Ok(res) => res,
                    Err(_) => Err(Error::operation_timed_out(remaining)),
                }
            }),
            None => self.shared.runtime.block_on(fut),
        }
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("config", &self.shared.config)
            .field("driver", &self.shared.driver)
            .finish()
    }
}
