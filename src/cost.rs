//! Integer cost types usable as matrix cells.
//!
//! A cell holds either a transit cost or, in row/column 0 of an augmented
//! matrix, a city label. `Cost` bundles the arithmetic and the label
//! conversions the solver needs.

use std::fmt::{Debug, Display};
use std::ops::{Add, Sub};

/// Numeric type of a cost matrix cell.
pub trait Cost:
    Copy + Ord + Debug + Display + Add<Output = Self> + Sub<Output = Self> + Send + Sync + 'static
{
    /// Additive identity.
    const ZERO: Self;

    /// Largest representable value; used as the "no tour yet" bound.
    const MAX: Self;

    /// Convert a city label into a cell value.
    fn from_label(label: usize) -> Option<Self>;

    /// Read a city label back from a bookkeeping cell.
    fn to_label(self) -> Option<usize>;

    /// Addition clamped at [`Cost::MAX`].
    #[must_use]
    fn add_saturating(self, rhs: Self) -> Self;
}

macro_rules! impl_cost {
    ($($t:ty),* $(,)?) => {
        $(
            impl Cost for $t {
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn from_label(label: usize) -> Option<Self> {
                    <$t>::try_from(label).ok()
                }

                #[inline]
                fn to_label(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }

                #[inline]
                fn add_saturating(self, rhs: Self) -> Self {
                    self.saturating_add(rhs)
                }
            }
        )*
    };
}

impl_cost!(i32, i64, u32, u64, usize);
