//! # Random Arrays
//!
//! Fixed-size, stack-allocated arrays of unsigned integers filled from the
//! faux random stream. These are the values passed across the timed call
//! boundary.

use crate::error::{Error, Result};
use crate::random::FauxRand;
use num_traits::{AsPrimitive, PrimInt, Unsigned};

/// Upper bound (exclusive) on how many elements `compute_value` sums.
/// Keep small: the work must never dominate the passing cost.
pub const VALUES_TO_SUM_MAX: u64 = 4;

/// Unsigned integer element stored in a [`RandArray`].
pub trait Element: Copy + Default + Unsigned + 'static {
    /// Truncate a random draw to this width.
    fn from_draw(value: u64) -> Self;

    /// Widen to the accumulator width.
    fn widen(self) -> u64;
}

impl<T> Element for T
where
    T: PrimInt + Unsigned + Default + AsPrimitive<u64>,
    u64: AsPrimitive<T>,
{
    #[inline(always)]
    fn from_draw(value: u64) -> Self {
        value.as_()
    }

    #[inline(always)]
    fn widen(self) -> u64 {
        self.as_()
    }
}

/// Element widths covered by the sweep, ordered by size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementWidth {
    U8,
    U16,
    U32,
    U64,
}

impl ElementWidth {
    pub const ALL: [ElementWidth; 4] = [Self::U8, Self::U16, Self::U32, Self::U64];

    /// `sizeof(T)` in bytes
    pub const fn size_bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    pub fn from_size_bytes(bytes: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|w| w.size_bytes() == bytes)
            .ok_or(Error::UnknownElementWidth(bytes))
    }
}

/// `N` elements of `T` and nothing else.
///
/// `repr(transparent)` pins the layout to `[T; N]`, so passing one by value
/// moves exactly `N * size_of::<T>()` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct RandArray<T, const N: usize> {
    arr: [T; N],
}

impl<T: Element, const N: usize> RandArray<T, N> {
    const NON_EMPTY: () = assert!(N > 0, "RandArray must hold at least one element");

    /// Fill with random values, one draw per element.
    pub fn new(rng: &mut FauxRand) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;

        let mut arr = [T::default(); N];
        for slot in arr.iter_mut() {
            *slot = T::from_draw(rng.next());
        }
        Self { arr }
    }

    /// Sum up a few random values from the array.
    ///
    /// Draws a count in `[0, VALUES_TO_SUM_MAX)`, then one index per summed
    /// element. Cost does not depend on `N`.
    #[inline(always)]
    pub fn compute_value(&self, rng: &mut FauxRand) -> u64 {
        let count = rng.next_below(VALUES_TO_SUM_MAX);
        let mut sum = 0u64;
        for _ in 0..count {
            let slot = rng.next_below(N as u64) as usize;
            sum = sum.wrapping_add(self.arr[slot].widen());
        }
        sum
    }

    pub fn as_slice(&self) -> &[T] {
        &self.arr
    }
}
