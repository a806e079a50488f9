use std::collections::TryReserveError;

use thiserror::Error;

/// Failure to construct a table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to allocate a bucket array of {slots} slots")]
    AllocationFailed {
        slots: usize,
        #[source]
        source: TryReserveError,
    },
}
