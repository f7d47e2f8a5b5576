//! Per-thread latest-error slot, for callers that check for failure in two steps.
//!
//! Every container operation already returns a [`DArrayResult`], this module only exists for code
//! that wants to work with `Option`s and inspect the failure afterwards:
//!
//! ```
//! use darray_common::{collections::DArray, error::DArrayError, last_error::{self, RecordError}};
//!
//! let arr = DArray::<i32>::new(None).unwrap();
//! assert!(arr.get(3).record().is_none());
//! assert_eq!(last_error::errno(), Some(DArrayError::InvalidIndex));
//! assert_eq!(last_error::errno(), None);
//! ```

use core::cell::Cell;

use crate::error::{DArrayError, DArrayResult};

thread_local! {
    static LAST_ERROR: Cell<Option<DArrayError>> = const { Cell::new(None) };
}

/// Store `err` as the latest error of the current thread.
pub fn set_last_error(err: DArrayError) {
    LAST_ERROR.with(|last| last.set(Some(err)));
}

/// Get the latest error of the current thread, and reset it.
pub fn errno() -> Option<DArrayError> {
    LAST_ERROR.with(Cell::take)
}

/// Get the description of the latest error of the current thread, and reset it.
///
/// Returns "no error" when no error was stored since the last read.
pub fn strerr() -> &'static str {
    match errno() {
        Some(err) => err.description(),
        None => "no error",
    }
}

/// Turn a mandatory argument that may be absent into a result.
pub fn require<T>(arg: Option<T>) -> DArrayResult<T> {
    arg.ok_or(DArrayError::InvalidArgument)
}

/// Extension to record the error of a result in the latest-error slot.
pub trait RecordError<T> {
    /// Convert the result into an option, storing the error (if any) as the latest error of the current thread.
    fn record(self) -> Option<T>;
}

impl<T> RecordError<T> for DArrayResult<T> {
    fn record(self) -> Option<T> {
        match self {
            Ok(val) => Some(val),
            Err(err) => {
                set_last_error(err);
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errno_resets_on_read() {
        set_last_error(DArrayError::NotFound);
        assert_eq!(errno(), Some(DArrayError::NotFound));
        assert_eq!(errno(), None);
    }

    #[test]
    fn strerr_describes_and_resets() {
        errno();
        assert_eq!(strerr(), "no error");
        set_last_error(DArrayError::AllocationFailure);
        assert_eq!(strerr(), "memory allocation failed");
        assert_eq!(strerr(), "no error");
    }

    #[test]
    fn record_keeps_latest() {
        errno();
        let ok: DArrayResult<u8> = Ok(3);
        assert_eq!(ok.record(), Some(3));
        assert_eq!(errno(), None);

        let first: DArrayResult<u8> = Err(DArrayError::InvalidIndex);
        let second: DArrayResult<u8> = Err(DArrayError::NotFound);
        assert_eq!(first.record(), None);
        assert_eq!(second.record(), None);
        assert_eq!(errno(), Some(DArrayError::NotFound));
    }

    #[test]
    fn require_rejects_absent() {
        assert_eq!(require(Some(1)), Ok(1));
        assert_eq!(require::<u8>(None), Err(DArrayError::InvalidArgument));
    }

    #[test]
    fn slot_is_per_thread() {
        set_last_error(DArrayError::InvalidArgument);
        let other = std::thread::spawn(errno).join().unwrap();
        assert_eq!(other, None);
        assert_eq!(errno(), Some(DArrayError::InvalidArgument));
    }
}
