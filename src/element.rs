/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use core::fmt::Debug;
use core::ops::{Add, Mul};

use num_traits::{Bounded, FromPrimitive, Zero};

/// A value that can be stored in a [`Treap`](crate::Treap).
///
/// Subtree sums are accumulated in `Sum`, which is usually wider than the
/// element itself so that summing a long range does not overflow.
/// `Bounded::min_value()` is the identity of the max aggregate.
pub trait Element: Copy + Ord + Bounded + Add<Output = Self> {
    type Sum: Copy
        + PartialEq
        + Debug
        + Zero
        + Add<Output = Self::Sum>
        + Mul<Output = Self::Sum>
        + FromPrimitive;

    fn widen(self) -> Self::Sum;
}

macro_rules! impl_element {
    ($($t:ty => $sum:ty),* $(,)?) => {
        $(
            impl Element for $t {
                type Sum = $sum;
                #[inline]
                fn widen(self) -> $sum {
                    self as $sum
                }
            }
        )*
    };
}

impl_element!(
    i8 => i64,
    i16 => i64,
    i32 => i64,
    i64 => i128,
    isize => i128,
    u8 => u64,
    u16 => u64,
    u32 => u64,
    u64 => u128,
    usize => u128,
);
