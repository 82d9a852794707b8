use smallvec::SmallVec;

use crate::dims::{Dims, DynamicValues, Values};
use crate::errors::LayoutError;

/// The size of each dimension of an array, where each size is either fixed
/// at compile time ([`Static`](crate::Static)) or supplied at construction
/// ([`Dynamic`](crate::Dynamic)).
///
/// Only dynamic sizes are stored, so extents whose sizes are all static are
/// zero-sized.
#[derive(Clone, Copy, Debug, Default)]
pub struct Extents<D: Dims> {
    dims: D,
}

impl<D: Dims> Extents<D> {
    /// Create extents from the sizes of the dynamic dimensions, in order.
    pub fn new(dynamic: DynamicValues<D>) -> Self {
        Extents {
            dims: D::from_dynamic(dynamic),
        }
    }

    /// Create extents from a slice containing the sizes of the dynamic
    /// dimensions.
    pub fn try_from_dynamic(dynamic: &[usize]) -> Result<Self, LayoutError> {
        Ok(Self::new(dynamic_array::<D>(dynamic)?))
    }

    /// Create extents from a slice containing the size of every dimension.
    ///
    /// Fails if the slice length does not match the rank, or if any entry
    /// for a static dimension differs from the static size.
    pub fn try_from_shape(shape: &[usize]) -> Result<Self, LayoutError> {
        if shape.len() != D::RANK {
            return Err(LayoutError::RankMismatch {
                expected: D::RANK,
                actual: shape.len(),
            });
        }

        let mut dynamic = SmallVec::<[usize; 5]>::new();
        for (dim, &size) in shape.iter().enumerate() {
            match D::static_value(dim) {
                Some(expected) if expected != size => {
                    return Err(LayoutError::StaticExtentMismatch {
                        dim,
                        expected,
                        actual: size,
                    });
                }
                Some(_) => {}
                None => dynamic.push(size),
            }
        }

        Self::try_from_dynamic(&dynamic)
    }

    /// Return the number of dimensions.
    pub fn rank(&self) -> usize {
        D::RANK
    }

    /// Return the number of dimensions whose size is dynamic.
    pub fn rank_dynamic(&self) -> usize {
        D::DYNAMIC_COUNT
    }

    /// Return the size of dimension `dim`.
    ///
    /// Panics if `dim >= self.rank()`.
    #[inline]
    pub fn extent(&self, dim: usize) -> usize {
        self.dims.get(dim)
    }

    /// Return the static size of dimension `dim`, or `None` if it is dynamic.
    pub fn static_extent(dim: usize) -> Option<usize> {
        D::static_value(dim)
    }

    /// Return the size of every dimension.
    pub fn shape(&self) -> Values<D> {
        self.dims.values()
    }

    /// Return the number of elements, ie. the product of the sizes.
    pub fn len(&self) -> usize {
        (0..D::RANK).map(|dim| self.extent(dim)).product()
    }

    /// Return true if any dimension has size zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the underlying storage of the sizes.
    pub fn dims(&self) -> &D {
        &self.dims
    }
}

impl<D: Dims> From<D> for Extents<D> {
    fn from(dims: D) -> Self {
        Extents { dims }
    }
}

/// Extents compare equal if their ranks and sizes are equal, regardless of
/// which sizes are static.
impl<D: Dims, D2: Dims<Rank = D::Rank>> PartialEq<Extents<D2>> for Extents<D> {
    fn eq(&self, other: &Extents<D2>) -> bool {
        (0..D::RANK).all(|dim| self.extent(dim) == other.extent(dim))
    }
}

impl<D: Dims> Eq for Extents<D> {}

/// Convert a slice of dynamic values into the array type expected by
/// [`Dims::from_dynamic`].
pub(crate) fn dynamic_array<D: Dims>(values: &[usize]) -> Result<DynamicValues<D>, LayoutError> {
    if values.len() != D::DYNAMIC_COUNT {
        return Err(LayoutError::DynamicCountMismatch {
            expected: D::DYNAMIC_COUNT,
            actual: values.len(),
        });
    }
    let mut array = DynamicValues::<D>::default();
    array.as_mut().copy_from_slice(values);
    Ok(array)
}
