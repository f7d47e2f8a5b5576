use core::fmt;

use crate::collections::TryReserveError;

/// Kind of failure reported by a [`DArray`](crate::collections::DArray) operation.
///
/// A failed operation never leaves the container in a partially modified state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DArrayError {
    /// The backing storage could not be obtained, or the requested capacity overflowed.
    AllocationFailure,
    /// A mandatory argument was absent.
    InvalidArgument,
    /// An index or range was out of bounds.
    InvalidIndex,
    /// A search did not find a matching item.
    NotFound,
}

impl DArrayError {
    /// Get a human readable description of the error.
    pub const fn description(&self) -> &'static str {
        match self {
            DArrayError::AllocationFailure => "memory allocation failed",
            DArrayError::InvalidArgument   => "invalid argument",
            DArrayError::InvalidIndex      => "index out of range",
            DArrayError::NotFound          => "item not found",
        }
    }
}

impl fmt::Display for DArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl std::error::Error for DArrayError {}

impl From<TryReserveError> for DArrayError {
    fn from(_: TryReserveError) -> Self {
        DArrayError::AllocationFailure
    }
}

/// Result of a fallible [`DArray`](crate::collections::DArray) operation.
pub type DArrayResult<T> = Result<T, DArrayError>;
