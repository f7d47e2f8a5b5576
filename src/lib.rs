//! Resizable, ordered array of item handles, with an optional destroyer managing the lifetime of the items.
//!
//! ```
//! use darray::prelude::*;
//!
//! let mut arr = DArray::new(None)?;
//! for i in 0..5 {
//!     arr.append(i)?;
//! }
//! arr.pop(0)?;
//! arr.pop(2)?;
//! arr.insert(0, -1)?;
//! arr.reverse();
//! arr.sort(i32::cmp);
//! assert_eq!(arr, [-1, 1, 2, 4]);
//! # Ok::<(), DArrayError>(())
//! ```

pub use darray_common::{collections, error, last_error, mem};

/// Logger used for the diagnostics of the containers.
pub use darray_logging as logging;

pub use darray_common::collections::{DArray, Destroyer, IntoIter};
pub use darray_common::error::{DArrayError, DArrayResult};

pub mod prelude {
    pub use darray_common::prelude::*;
}
