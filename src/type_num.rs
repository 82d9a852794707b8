//! Traits and types for compile-time arithmetic.
//!
//! These types track the rank of a [`Dims`](crate::Dims) list and the number
//! of its slots which are dynamic, so that index arrays and arrays of dynamic
//! values have a length that is checked by the compiler.

use std::fmt::Debug;

/// Type representing the integer value 0.
pub struct U0 {}

/// Type representing the integer value 1.
pub struct U1 {}

/// Type representing the integer value 2.
pub struct U2 {}

/// Type representing the integer value 3.
pub struct U3 {}

/// Type representing the integer value 4.
pub struct U4 {}

/// Type representing the integer value 5.
pub struct U5 {}

/// Trait providing the integer value of a `U<N>` type (eg. [`U2`]) and the
/// array type with that many elements.
pub trait TypeNum {
    const VALUE: usize;

    /// `[usize; VALUE]`.
    type Array: AsRef<[usize]>
        + AsMut<[usize]>
        + IntoIterator<Item = usize>
        + Copy
        + Debug
        + Default
        + PartialEq
        + Eq;
}

macro_rules! impl_type_num {
    ($type:ty, $val:literal) => {
        impl TypeNum for $type {
            const VALUE: usize = $val;
            type Array = [usize; $val];
        }
    };
}

impl_type_num!(U0, 0);
impl_type_num!(U1, 1);
impl_type_num!(U2, 2);
impl_type_num!(U3, 3);
impl_type_num!(U4, 4);
impl_type_num!(U5, 5);

/// Array of `N::VALUE` elements.
pub type Array<N> = <N as TypeNum>::Array;

/// Trait that computes the sum of a 2-tuple of [`TypeNum`] types.
///
/// The left operand is the count contributed by a single slot, so it is
/// either [`U0`] or [`U1`]. Sums are defined up to a value of 5.
pub trait Add {
    type Result: TypeNum;
}

macro_rules! impl_add {
    ($lhs:ty, $rhs:ty, $result:ty) => {
        impl Add for ($lhs, $rhs) {
            type Result = $result;
        }
    };
}

impl_add!(U0, U0, U0);
impl_add!(U0, U1, U1);
impl_add!(U0, U2, U2);
impl_add!(U0, U3, U3);
impl_add!(U0, U4, U4);
impl_add!(U1, U0, U1);
impl_add!(U1, U1, U2);
impl_add!(U1, U2, U3);
impl_add!(U1, U3, U4);
impl_add!(U1, U4, U5);
