//! Compact storage for per-dimension values which are either fixed at compile
//! time or supplied at runtime.
//!
//! A list of values is described by a tuple of slot types, one per dimension.
//! Each slot is either [`Static<N>`], a zero-sized type whose value is `N`, or
//! [`Dynamic`], which stores a `usize`. Only the dynamic slots occupy space:
//!
//! ```
//! use mdlayout::{Dims, Dynamic, Static};
//!
//! type Strides = (Dynamic, Static<4>, Static<1>);
//!
//! assert_eq!(std::mem::size_of::<Strides>(), std::mem::size_of::<usize>());
//! assert_eq!(Strides::RANK, 3);
//! assert_eq!(Strides::DYNAMIC_COUNT, 1);
//!
//! let strides = Strides::from_dynamic([20]);
//! assert_eq!(strides.values(), [20, 4, 1]);
//! assert_eq!(strides.get_at::<1>(), 4);
//! assert_eq!(Strides::static_at::<0>(), None);
//! ```
//!
//! Tuples of up to 5 slots implement [`Dims`].

use std::fmt::Debug;

use crate::type_num::{Add, Array, TypeNum, U0, U1, U2, U3, U4, U5};

/// A single slot in a [`Dims`] list.
pub trait Dim: Copy + Debug + Default + PartialEq {
    /// The value of this slot if it is fixed at compile time.
    const STATIC: Option<usize>;

    /// Number of dynamic values stored by this slot. Either [`U0`] or [`U1`].
    type DynCount: TypeNum;

    /// Return the effective value of this slot.
    fn value(&self) -> usize;

    /// Create a slot, taking its value from `values[*next]` and advancing
    /// `next` if the slot is dynamic.
    fn from_values(values: &[usize], next: &mut usize) -> Self;

    /// Write this slot's value to `values[*next]` and advance `next` if the
    /// slot is dynamic.
    fn write_dynamic(&self, values: &mut [usize], next: &mut usize);
}

/// A slot whose value `N` is fixed at compile time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Static<const N: usize>;

impl<const N: usize> Dim for Static<N> {
    const STATIC: Option<usize> = Some(N);
    type DynCount = U0;

    #[inline]
    fn value(&self) -> usize {
        N
    }

    #[inline]
    fn from_values(_values: &[usize], _next: &mut usize) -> Self {
        Static
    }

    #[inline]
    fn write_dynamic(&self, _values: &mut [usize], _next: &mut usize) {}
}

/// A slot whose value is supplied at runtime.
///
/// The default value is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dynamic(usize);

impl Dynamic {
    pub fn new(value: usize) -> Self {
        Dynamic(value)
    }
}

impl Dim for Dynamic {
    const STATIC: Option<usize> = None;
    type DynCount = U1;

    #[inline]
    fn value(&self) -> usize {
        self.0
    }

    #[inline]
    fn from_values(values: &[usize], next: &mut usize) -> Self {
        let value = values[*next];
        *next += 1;
        Dynamic(value)
    }

    #[inline]
    fn write_dynamic(&self, values: &mut [usize], next: &mut usize) {
        values[*next] = self.0;
        *next += 1;
    }
}

/// Array with one entry per dynamic slot of `D`.
pub type DynamicValues<D> = Array<<D as Dims>::DynCount>;

/// Array with one entry per slot of `D`.
pub type Values<D> = Array<<D as Dims>::Rank>;

/// A fixed-length list of per-dimension values, each of which is either
/// [`Static`] or [`Dynamic`].
///
/// This is implemented for tuples of [`Dim`] types.
pub trait Dims: Copy + Debug + Default + PartialEq {
    /// Number of slots.
    type Rank: TypeNum;

    /// Number of slots which are [`Dynamic`].
    type DynCount: TypeNum;

    const RANK: usize = <Self::Rank as TypeNum>::VALUE;
    const DYNAMIC_COUNT: usize = <Self::DynCount as TypeNum>::VALUE;

    /// Create a list from the values of the dynamic slots, in order.
    fn from_dynamic(values: DynamicValues<Self>) -> Self;

    /// Return the values of the dynamic slots, in order.
    fn dynamic_values(&self) -> DynamicValues<Self>;

    /// Return the value of slot `index`.
    ///
    /// Panics if `index >= Self::RANK`.
    fn get(&self, index: usize) -> usize;

    /// Return the compile-time value of slot `index`, or `None` if the slot
    /// is dynamic.
    ///
    /// Panics if `index >= Self::RANK`.
    fn static_value(index: usize) -> Option<usize>;

    /// Return the values of all slots.
    fn values(&self) -> Values<Self> {
        let mut values = Values::<Self>::default();
        for (i, value) in values.as_mut().iter_mut().enumerate() {
            *value = self.get(i);
        }
        values
    }

    /// Return the value of slot `I`, where the index is checked at compile
    /// time.
    #[inline]
    fn get_at<const I: usize>(&self) -> usize
    where
        Self: DimAt<I>,
    {
        <Self as DimAt<I>>::slot(self).value()
    }

    /// Return the compile-time value of slot `I`, or `None` if it is dynamic.
    #[inline]
    fn static_at<const I: usize>() -> Option<usize>
    where
        Self: DimAt<I>,
    {
        <<Self as DimAt<I>>::Slot as Dim>::STATIC
    }

    /// Return the compile-time value of slot `I`, or `DEFAULT` if it is
    /// dynamic.
    #[inline]
    fn get_static<const I: usize, const DEFAULT: usize>() -> usize
    where
        Self: DimAt<I>,
    {
        Self::static_at::<I>().unwrap_or(DEFAULT)
    }

    /// Return true if every slot is [`Static`].
    fn is_all_static() -> bool {
        Self::DYNAMIC_COUNT == 0
    }
}

/// Access to the slot at compile-time index `I` of a [`Dims`] list.
///
/// This is only implemented when `I` is less than the rank, so methods that
/// require it reject out-of-range indices at compile time.
pub trait DimAt<const I: usize>: Dims {
    type Slot: Dim;

    fn slot(&self) -> Self::Slot;
}

#[cold]
#[inline(never)]
fn index_out_of_range(index: usize, rank: usize) -> ! {
    panic!("dim {} is out of range for rank {}", index, rank);
}

impl Dims for () {
    type Rank = U0;
    type DynCount = U0;

    fn from_dynamic(_values: [usize; 0]) -> Self {}

    fn dynamic_values(&self) -> [usize; 0] {
        []
    }

    fn get(&self, index: usize) -> usize {
        index_out_of_range(index, 0)
    }

    fn static_value(index: usize) -> Option<usize> {
        index_out_of_range(index, 0)
    }
}

/// Implement [`Dims`] for a tuple. The dynamic count of the tuple is the
/// dynamic count of the head slot plus that of the tuple of remaining slots.
macro_rules! impl_dims {
    ($rank:ty; ($head_idx:tt, $head:ident) $(, ($idx:tt, $tail:ident))*) => {
        impl<$head: Dim, $($tail: Dim),*> Dims for ($head, $($tail,)*)
        where
            ($($tail,)*): Dims,
            (<$head as Dim>::DynCount, <($($tail,)*) as Dims>::DynCount): Add,
        {
            type Rank = $rank;
            type DynCount =
                <(<$head as Dim>::DynCount, <($($tail,)*) as Dims>::DynCount) as Add>::Result;

            fn from_dynamic(values: DynamicValues<Self>) -> Self {
                let values = values.as_ref();
                let mut next = 0;
                (
                    $head::from_values(values, &mut next),
                    $($tail::from_values(values, &mut next),)*
                )
            }

            fn dynamic_values(&self) -> DynamicValues<Self> {
                let mut values = DynamicValues::<Self>::default();
                let mut next = 0;
                self.$head_idx.write_dynamic(values.as_mut(), &mut next);
                $(self.$idx.write_dynamic(values.as_mut(), &mut next);)*
                values
            }

            #[inline]
            fn get(&self, index: usize) -> usize {
                match index {
                    $head_idx => self.$head_idx.value(),
                    $($idx => self.$idx.value(),)*
                    _ => index_out_of_range(index, Self::RANK),
                }
            }

            #[inline]
            fn static_value(index: usize) -> Option<usize> {
                match index {
                    $head_idx => $head::STATIC,
                    $($idx => $tail::STATIC,)*
                    _ => index_out_of_range(index, Self::RANK),
                }
            }
        }
    };
}

impl_dims!(U1; (0, D0));
impl_dims!(U2; (0, D0), (1, D1));
impl_dims!(U3; (0, D0), (1, D1), (2, D2));
impl_dims!(U4; (0, D0), (1, D1), (2, D2), (3, D3));
impl_dims!(U5; (0, D0), (1, D1), (2, D2), (3, D3), (4, D4));

macro_rules! impl_dim_at {
    ([$($dim:ident),+], $index:tt, $slot:ident) => {
        impl<$($dim: Dim),+> DimAt<$index> for ($($dim,)+)
        where
            ($($dim,)+): Dims,
        {
            type Slot = $slot;

            #[inline]
            fn slot(&self) -> $slot {
                self.$index
            }
        }
    };
}

impl_dim_at!([D0], 0, D0);

impl_dim_at!([D0, D1], 0, D0);
impl_dim_at!([D0, D1], 1, D1);

impl_dim_at!([D0, D1, D2], 0, D0);
impl_dim_at!([D0, D1, D2], 1, D1);
impl_dim_at!([D0, D1, D2], 2, D2);

impl_dim_at!([D0, D1, D2, D3], 0, D0);
impl_dim_at!([D0, D1, D2, D3], 1, D1);
impl_dim_at!([D0, D1, D2, D3], 2, D2);
impl_dim_at!([D0, D1, D2, D3], 3, D3);

impl_dim_at!([D0, D1, D2, D3, D4], 0, D0);
impl_dim_at!([D0, D1, D2, D3, D4], 1, D1);
impl_dim_at!([D0, D1, D2, D3, D4], 2, D2);
impl_dim_at!([D0, D1, D2, D3, D4], 3, D3);
impl_dim_at!([D0, D1, D2, D3, D4], 4, D4);
