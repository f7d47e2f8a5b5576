//! Container engine of the `darray` workspace.
//!
//! [`collections::DArray`] is a resizable, ordered array of item handles with an optional destroyer.
//! It gets its memory from a [`mem::Storage`], and resizes it according to a [`collections::ReserveStrategy`].

mod log;

pub mod mem;
pub mod collections;
pub mod error;
pub mod last_error;

pub mod prelude;
