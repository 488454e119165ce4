use docmodel::driver::{Document, Driver, Memory, Namespace};
use docmodel::{async_trait, Filter, Id, Result};

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

/// Wraps another driver, recording every operation it receives.
///
/// Batch results can be shuffled to catch callers relying on driver order,
/// and lookups touching a chosen identifier can be made to fail.
#[derive(Debug)]
pub struct RecordingDriver {
    inner: Box<dyn Driver>,

    /// Shared with [`ExecLog`](crate::ExecLog) so tests can inspect it after
    /// the driver moved into the `Db`.
    ops_log: Arc<Mutex<Vec<DriverOp>>>,

    failing: Arc<Mutex<HashSet<Id>>>,

    order: BatchOrder,
}

/// Order in which batch lookups hand back documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOrder {
    /// As the wrapped driver returns them
    Inner,
    Shuffled,

    /// Reverse of what the wrapped driver returns
    Reversed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DriverOp {
    FindOne { collection: String, filter: String },
    FindManyByIds { collection: String, ids: Vec<Id> },
    InsertOne { collection: String },
    ReplaceOne { collection: String, id: Id },
    DeleteOne { collection: String, id: Id },
}

impl RecordingDriver {
    pub fn new(inner: impl Driver) -> RecordingDriver {
        RecordingDriver {
            inner: Box::new(inner),
            ops_log: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
            order: BatchOrder::Inner,
        }
    }

    pub fn memory() -> RecordingDriver {
        RecordingDriver::new(Memory::new())
    }

    pub fn batch_order(mut self, order: BatchOrder) -> RecordingDriver {
        self.order = order;
        self
    }

    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }

    pub fn failing_handle(&self) -> Arc<Mutex<HashSet<Id>>> {
        self.failing.clone()
    }

    fn record(&self, op: DriverOp) {
        self.ops_log
            .lock()
            .expect("failed to acquire ops log lock")
            .push(op);
    }

    fn check(&self, ids: impl IntoIterator<Item = Id>) -> Result<()> {
        let failing = self.failing.lock().expect("failed to acquire fault lock");
        for id in ids {
            if failing.contains(&id) {
                docmodel::bail!("injected failure for {id}");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Driver for RecordingDriver {
    async fn find_one(&self, ns: Namespace<'_>, filter: &Filter) -> Result<Option<Document>> {
        self.record(DriverOp::FindOne {
            collection: ns.collection.to_string(),
            filter: filter.to_string(),
        });

        let ids: Vec<Id> = filter
            .terms()
            .filter(|(field, _)| *field == "_id")
            .filter_map(|(_, value)| value.as_str()?.parse().ok())
            .collect();
        self.check(ids)?;

        self.inner.find_one(ns, filter).await
    }

    async fn find_many_by_ids(&self, ns: Namespace<'_>, ids: &[Id]) -> Result<Vec<Document>> {
        self.record(DriverOp::FindManyByIds {
            collection: ns.collection.to_string(),
            ids: ids.to_vec(),
        });
        self.check(ids.iter().copied())?;

        let mut documents = self.inner.find_many_by_ids(ns, ids).await?;
        match self.order {
            BatchOrder::Inner => {}
            BatchOrder::Shuffled => std_util::slice::shuffle(&mut documents),
            BatchOrder::Reversed => documents.reverse(),
        }
        Ok(documents)
    }

    async fn insert_one(&self, ns: Namespace<'_>, document: Document) -> Result<Id> {
        self.record(DriverOp::InsertOne {
            collection: ns.collection.to_string(),
        });
        self.inner.insert_one(ns, document).await
    }

    async fn replace_one(&self, ns: Namespace<'_>, id: Id, document: Document) -> Result<()> {
        self.record(DriverOp::ReplaceOne {
            collection: ns.collection.to_string(),
            id,
        });
        self.check([id])?;
        self.inner.replace_one(ns, id, document).await
    }

    async fn delete_one(&self, ns: Namespace<'_>, id: Id) -> Result<()> {
        self.record(DriverOp::DeleteOne {
            collection: ns.collection.to_string(),
            id,
        });
        self.check([id])?;
        self.inner.delete_one(ns, id).await
    }
}
