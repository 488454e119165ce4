use std::time::Duration;

use super::{Error, ErrorKind};

#[derive(Debug)]
pub(super) struct OperationTimedOut {
    duration: Duration,
}

impl Error {
    pub fn operation_timed_out(duration: Duration) -> Error {
        ErrorKind::OperationTimedOut(OperationTimedOut { duration }).into()
    }

    pub fn is_operation_timed_out(&self) -> bool {
        matches!(self.kind(), ErrorKind::OperationTimedOut(_))
    }
}

impl std::error::Error for OperationTimedOut {}

impl core::fmt::Display for OperationTimedOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation timed out after {:?}", self.duration)
    }
}
