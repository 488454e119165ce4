use crate::DriverOp;

use std::sync::{Arc, Mutex, MutexGuard};

/// A handle on the operations a [`RecordingDriver`](crate::RecordingDriver)
/// received, for assertions.
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    fn ops(&self) -> MutexGuard<'_, Vec<DriverOp>> {
        self.ops.lock().unwrap()
    }

    pub fn len(&self) -> usize {
        self.ops().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops().is_empty()
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&DriverOp) -> bool,
    {
        self.ops().iter().filter(|op| predicate(op)).count()
    }

    /// Number of single-document lookups
    pub fn finds(&self) -> usize {
        self.count(|op| matches!(op, DriverOp::FindOne { .. }))
    }

    /// Number of batch lookups
    pub fn batches(&self) -> usize {
        self.count(|op| matches!(op, DriverOp::FindManyByIds { .. }))
    }

    pub fn clear(&mut self) {
        self.ops().clear();
    }

    /// Remove and return the oldest operation
    pub fn pop(&mut self) -> Option<DriverOp> {
        let mut ops = self.ops();
        if ops.is_empty() {
            None
        } else {
            Some(ops.remove(0))
        }
    }
}
