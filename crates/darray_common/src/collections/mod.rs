mod imp;

mod darray;

use core::{alloc::Layout, fmt};

pub use darray::*;

//--------------------------------------------------------------

macro_rules! impl_slice_partial_eq_generic {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty $(where $ty:ty: $bound:ident)?) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs  where
            T : PartialEq<U>,
            $($ty: $bound)?
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
            #[inline]
            #[allow(clippy::partialeq_ne_impl)]
            fn ne(&self, other: &$rhs) -> bool { self[..] != other[..] }
        }
    };
}
use impl_slice_partial_eq_generic;

//--------------------------------------------------------------

/// Error returned when a container could not reserve the memory it needs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TryReserveError {
    /// The requested capacity does not fit in `isize::MAX` bytes.
    CapacityOverflow,
    /// The storage failed to provide memory for the given layout.
    AllocError(Layout),
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryReserveError::CapacityOverflow => f.write_str("capacity overflow"),
            TryReserveError::AllocError(layout) => write!(f, "storage failed to allocate {} bytes (align {})", layout.size(), layout.align()),
        }
    }
}

impl std::error::Error for TryReserveError {}

//--------------------------------------------------------------

/// A trait used to define a strategy to resize the backing memory of containers.
///
/// The strategy is consulted on every operation that changes the length of a container,
/// a container only reallocates when the returned capacity differs from its current one.
pub trait ReserveStrategy {
    /// Calculate the new capacity for a container.
    ///
    /// `cur_capacity` represents the current capacity of the container.
    ///
    /// `len` represents the length the container will have once the operation completes.
    ///
    /// The returned capacity is never smaller than `len` and never 0.
    ///
    /// Returns `Err(TryReserveError::CapacityOverflow)` if the capacity were to overflow.
    fn calculate(cur_capacity: usize, len: usize) -> Result<usize, TryReserveError>;
}

/// A reserve strategy keeping the capacity at the smallest power of 2 that can hold the length.
///
/// The capacity doubles while the length does not fit, and halves while the length fits in half of it.
/// The capacity never drops below 1.
pub struct Pow2ReserveStrategy;

impl ReserveStrategy for Pow2ReserveStrategy {
    fn calculate(cur_capacity: usize, len: usize) -> Result<usize, TryReserveError> {
        let mut cap = cur_capacity.max(1);
        if len > cap {
            while len > cap {
                cap = cap.checked_mul(2).ok_or(TryReserveError::CapacityOverflow)?;
            }
        } else {
            while len <= cap / 2 && cap > 1 {
                cap /= 2;
            }
        }
        Ok(cap)
    }
}

/// A reserve strategy that doubles the capacity when needed, but never gives memory back.
///
/// Useful for containers that are repeatedly emptied and refilled to a similar length.
pub struct GrowOnlyReserveStrategy;

impl ReserveStrategy for GrowOnlyReserveStrategy {
    fn calculate(cur_capacity: usize, len: usize) -> Result<usize, TryReserveError> {
        let mut cap = cur_capacity.max(1);
        while len > cap {
            cap = cap.checked_mul(2).ok_or(TryReserveError::CapacityOverflow)?;
        }
        Ok(cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow2_grows_by_doubling() {
        assert_eq!(Pow2ReserveStrategy::calculate(1, 1), Ok(1));
        assert_eq!(Pow2ReserveStrategy::calculate(1, 2), Ok(2));
        assert_eq!(Pow2ReserveStrategy::calculate(2, 3), Ok(4));
        assert_eq!(Pow2ReserveStrategy::calculate(4, 17), Ok(32));
    }

    #[test]
    fn pow2_shrinks_with_hysteresis() {
        assert_eq!(Pow2ReserveStrategy::calculate(8, 5), Ok(8));
        assert_eq!(Pow2ReserveStrategy::calculate(8, 4), Ok(4));
        assert_eq!(Pow2ReserveStrategy::calculate(32, 3), Ok(4));
        assert_eq!(Pow2ReserveStrategy::calculate(32, 0), Ok(1));
        assert_eq!(Pow2ReserveStrategy::calculate(1, 0), Ok(1));
    }

    #[test]
    fn pow2_overflow() {
        let top = 1usize << (usize::BITS - 1);
        assert_eq!(Pow2ReserveStrategy::calculate(top, top + 1), Err(TryReserveError::CapacityOverflow));
    }

    #[test]
    fn grow_only_never_shrinks() {
        assert_eq!(GrowOnlyReserveStrategy::calculate(1, 3), Ok(4));
        assert_eq!(GrowOnlyReserveStrategy::calculate(64, 0), Ok(64));
        assert_eq!(GrowOnlyReserveStrategy::calculate(0, 0), Ok(1));
    }
}
