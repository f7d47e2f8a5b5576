mod storage;
pub use storage::*;

mod alloc_storage;
pub use alloc_storage::*;

mod tracking_storage;
pub use tracking_storage::*;
