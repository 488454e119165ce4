use crate::{BatchOrder, ExecLog, RecordingDriver};

use docmodel::{Db, Id};

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, Once},
};

/// A database over an in-memory driver, with a log of what the driver saw.
pub struct Setup {
    pub db: Db,
    pub log: ExecLog,
    failing: Arc<Mutex<HashSet<Id>>>,
}

impl Setup {
    pub fn new() -> Setup {
        Setup::with_driver(RecordingDriver::memory())
    }

    /// Batch lookups return documents in a random order.
    pub fn shuffled() -> Setup {
        Setup::with_driver(RecordingDriver::memory().batch_order(BatchOrder::Shuffled))
    }

    /// Batch lookups return documents in the reverse of the in-memory order.
    pub fn reversed() -> Setup {
        Setup::with_driver(RecordingDriver::memory().batch_order(BatchOrder::Reversed))
    }

    fn with_driver(driver: RecordingDriver) -> Setup {
        init_tracing();

        let log = ExecLog::new(driver.ops_log_handle());
        let failing = driver.failing_handle();
        let db = Db::builder()
            .database_name("docmodel_test")
            .driver(driver)
            .build()
            .unwrap();

        Setup { db, log, failing }
    }

    /// Every later driver operation touching `id` fails.
    pub fn fail_on(&self, id: Id) {
        self.failing.lock().unwrap().insert(id);
    }
}

impl Default for Setup {
    fn default() -> Self {
        Setup::new()
    }
}

fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
