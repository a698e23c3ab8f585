//! The scalar type a CSP is built over.

use num_traits::Zero;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Sub};

/// A totally ordered, hashable scalar that can sit in a variable's domain.
///
/// Integers are the only values used by the reference problems (N-queens,
/// magic squares, sum constraints), but nothing in the solver assumes `i32`
/// specifically: any type satisfying this bound works, which is why
/// `SumEqual`/`DifferenceNotEqual` fold with `Zero`/`Add`/`Sub` instead of
/// converting through a fixed integer width.
pub trait Value:
    Ord + Copy + Eq + Hash + Debug + Display + Add<Output = Self> + Sub<Output = Self> + Zero
{
}

impl<T> Value for T where
    T: Ord + Copy + Eq + Hash + Debug + Display + Add<Output = T> + Sub<Output = T> + Zero
{
}

/// `|a - b|`, without requiring a `Signed` bound (works for unsigned domains too).
pub fn abs_diff<V: Value>(a: V, b: V) -> V {
    if a >= b { a - b } else { b - a }
}
