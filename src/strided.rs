use std::fmt;

use smallvec::SmallVec;

use crate::dims::{DimAt, Dims, DynamicValues};
use crate::errors::LayoutError;
use crate::extents::{dynamic_array, Extents};
use crate::layout::LayoutMapping;

/// Layout mapping with arbitrary per-dimension strides.
///
/// `E` describes the extents and `S` the strides. Each entry of either is
/// [`Static`](crate::Static), fixed as part of the type, or
/// [`Dynamic`](crate::Dynamic), supplied at construction. Only dynamic values
/// are stored. The ranks of `E` and `S` must match.
///
/// The offset of an index is `Σ index[i] * stride(i)`. Strides are unsigned,
/// so layouts with negative strides are not representable.
///
/// ```
/// use mdlayout::prelude::*;
/// use mdlayout::{Dynamic, Extents, Static, StridedLayout};
///
/// // A 3x4 column-major layout with a dynamic outer stride.
/// let layout = StridedLayout::<(Dynamic, Dynamic), (Static<1>, Dynamic)>::new(
///     Extents::new([3, 4]),
///     [3],
/// );
/// assert_eq!(layout.offset([2, 3]), 11);
/// assert_eq!(layout.required_span_size(), 12);
/// assert!(layout.is_contiguous());
/// ```
#[derive(Clone, Copy, Default)]
pub struct StridedLayout<E: Dims, S: Dims<Rank = E::Rank>> {
    extents: Extents<E>,
    strides: S,
}

impl<E: Dims, S: Dims<Rank = E::Rank>> StridedLayout<E, S> {
    /// Create a layout from extents and the values of the dynamic strides, in
    /// order of increasing dimension.
    pub fn new(extents: Extents<E>, dynamic_strides: DynamicValues<S>) -> Self {
        StridedLayout {
            extents,
            strides: S::from_dynamic(dynamic_strides),
        }
    }

    /// Create a layout from extents and a slice of dynamic strides.
    ///
    /// Fails if the slice length does not match the number of dynamic
    /// strides.
    pub fn try_new(extents: Extents<E>, dynamic_strides: &[usize]) -> Result<Self, LayoutError> {
        Ok(Self::new(extents, dynamic_array::<S>(dynamic_strides)?))
    }

    /// Create a layout from slices containing the extent and stride of every
    /// dimension.
    ///
    /// Fails if either slice has the wrong length, or if a value for a
    /// static extent or stride differs from the value fixed by the type.
    pub fn try_from_shape_and_strides(
        shape: &[usize],
        strides: &[usize],
    ) -> Result<Self, LayoutError> {
        let extents = Extents::try_from_shape(shape)?;

        if strides.len() != S::RANK {
            return Err(LayoutError::RankMismatch {
                expected: S::RANK,
                actual: strides.len(),
            });
        }

        let mut dynamic = SmallVec::<[usize; 5]>::new();
        for (dim, &stride) in strides.iter().enumerate() {
            match S::static_value(dim) {
                Some(expected) if expected != stride => {
                    return Err(LayoutError::StaticStrideMismatch {
                        dim,
                        expected,
                        actual: stride,
                    });
                }
                Some(_) => {}
                None => dynamic.push(stride),
            }
        }

        Self::try_new(extents, &dynamic)
    }

    /// Convert another layout mapping with the same rank into a strided
    /// layout with the same extents and strides.
    ///
    /// Fails if the static extents or strides of this type do not match the
    /// values of `layout`.
    pub fn from_layout<L>(layout: &L) -> Result<Self, LayoutError>
    where
        L: LayoutMapping,
        L::Shape: Dims<Rank = E::Rank>,
    {
        Self::try_from_shape_and_strides(
            layout.extents().shape().as_ref(),
            layout.strides().as_ref(),
        )
    }

    /// Return the stride of dimension `I`, where the index is checked at
    /// compile time.
    #[inline]
    pub fn stride_at<const I: usize>(&self) -> usize
    where
        S: DimAt<I>,
    {
        self.strides.get_at::<I>()
    }

    /// Return the compile-time stride of dimension `dim`, or `None` if the
    /// stride is dynamic.
    pub fn static_stride(dim: usize) -> Option<usize> {
        S::static_value(dim)
    }

    /// Return the values of the dynamic strides, in order.
    pub fn dynamic_strides(&self) -> DynamicValues<S> {
        self.strides.dynamic_values()
    }

    /// Return the storage of the strides.
    pub fn stride_dims(&self) -> &S {
        &self.strides
    }
}

impl<E: Dims, S: Dims<Rank = E::Rank>> LayoutMapping for StridedLayout<E, S> {
    type Shape = E;

    fn extents(&self) -> &Extents<E> {
        &self.extents
    }

    #[inline]
    fn stride(&self, dim: usize) -> usize {
        self.strides.get(dim)
    }

    /// Returns true.
    ///
    /// Overlap is not detected. Use [`may_overlap`](LayoutMapping::may_overlap)
    /// for a conservative check.
    fn is_unique(&self) -> bool {
        true
    }

    fn is_strided(&self) -> bool {
        true
    }

    fn is_always_unique() -> bool {
        true
    }

    /// Returns false, since contiguity depends on the extents and dynamic
    /// strides of an instance.
    fn is_always_contiguous() -> bool {
        false
    }

    fn is_always_strided() -> bool {
        true
    }
}

/// Two strided layouts of the same rank are equal if their strides are
/// equal. Extents are not compared.
impl<E, S, E2, S2> PartialEq<StridedLayout<E2, S2>> for StridedLayout<E, S>
where
    E: Dims,
    S: Dims<Rank = E::Rank>,
    E2: Dims<Rank = E::Rank>,
    S2: Dims<Rank = E2::Rank>,
{
    fn eq(&self, other: &StridedLayout<E2, S2>) -> bool {
        (0..S::RANK).all(|dim| self.strides.get(dim) == other.strides.get(dim))
    }
}

impl<E: Dims, S: Dims<Rank = E::Rank>> Eq for StridedLayout<E, S> {}

impl<E: Dims, S: Dims<Rank = E::Rank>> fmt::Debug for StridedLayout<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedLayout")
            .field("shape", &self.extents.shape())
            .field("strides", &self.strides())
            .finish()
    }
}
