pub use crate::collections::{DArray, Destroyer, ReserveStrategy, Pow2ReserveStrategy, GrowOnlyReserveStrategy};
pub use crate::error::{DArrayError, DArrayResult};
pub use crate::last_error::RecordError;
pub use crate::mem::{Storage, GlobalStorage, TrackingStorage};
