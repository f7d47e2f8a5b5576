//! Diagnostics emitted by the containers.

use cfg_if::cfg_if;

use crate::collections::TryReserveError;

cfg_if! {
    if #[cfg(feature = "logging")] {
        use darray_logging::{LogCategory, log_verbose, log_warning};

        pub(crate) const LOG_CAT: LogCategory = LogCategory::new("darray");

        pub(crate) fn resized(from: usize, to: usize) {
            log_verbose!(LOG_CAT, "resized backing storage from {} to {} items", from, to);
        }

        pub(crate) fn alloc_failed(target_cap: usize, err: &TryReserveError) {
            log_warning!(LOG_CAT, "failed to resize backing storage to {} items: {}", target_cap, err);
        }
    } else {
        #[inline(always)]
        pub(crate) fn resized(_from: usize, _to: usize) {}

        #[inline(always)]
        pub(crate) fn alloc_failed(_target_cap: usize, _err: &TryReserveError) {}
    }
}
