use crate::dims::{Dims, Values};
use crate::extents::Extents;
use crate::overlap::{is_contiguous_in_any_order, may_have_internal_overlap, required_span_size};
use crate::type_num::{TypeNum, U2};

/// Index type for a layout, with one entry per dimension.
pub type Index<L> = Values<<L as LayoutMapping>::Shape>;

/// Layout mappings describe the shape of an array view and how indices map
/// to offsets in its storage.
///
/// The main implementation is [`StridedLayout`](crate::StridedLayout), which
/// supports arbitrary strides. [`RowMajorLayout`] and [`ColMajorLayout`]
/// derive their strides from the extents.
///
/// Index arrays have one entry per dimension, so passing the wrong number of
/// indices does not compile.
pub trait LayoutMapping {
    /// Type describing which extents are static.
    type Shape: Dims;

    /// Return the extents of this layout.
    fn extents(&self) -> &Extents<Self::Shape>;

    /// Return the stride of dimension `dim`.
    ///
    /// Panics if `dim >= self.rank()`.
    fn stride(&self, dim: usize) -> usize;

    /// Return true if every index maps to a distinct offset.
    fn is_unique(&self) -> bool;

    /// Return true if the offsets of this layout fill `[0, required_span_size())`
    /// without gaps.
    fn is_contiguous(&self) -> bool {
        is_contiguous_in_any_order(
            self.extents().shape().as_ref(),
            self.strides().as_ref(),
        )
    }

    /// Return true if offsets are a linear combination of indices and strides.
    fn is_strided(&self) -> bool;

    /// Return true if [`is_unique`](LayoutMapping::is_unique) is true for
    /// every instance of this type.
    fn is_always_unique() -> bool;

    /// Return true if [`is_contiguous`](LayoutMapping::is_contiguous) is true
    /// for every instance of this type.
    fn is_always_contiguous() -> bool;

    /// Return true if [`is_strided`](LayoutMapping::is_strided) is true for
    /// every instance of this type.
    fn is_always_strided() -> bool;

    /// Return the number of dimensions.
    fn rank(&self) -> usize {
        <<Self::Shape as Dims>::Rank as TypeNum>::VALUE
    }

    /// Return the size of dimension `dim`.
    fn extent(&self, dim: usize) -> usize {
        self.extents().extent(dim)
    }

    /// Return the strides of every dimension.
    fn strides(&self) -> Index<Self> {
        let mut strides = Index::<Self>::default();
        for (dim, stride) in strides.as_mut().iter_mut().enumerate() {
            *stride = self.stride(dim);
        }
        strides
    }

    /// Map an index to a storage offset.
    ///
    /// The index is not checked against the extents. Out-of-range indices
    /// produce offsets which may lie outside the span.
    #[inline]
    fn offset(&self, index: Index<Self>) -> usize {
        let mut offset = 0;
        for (dim, &idx) in index.as_ref().iter().enumerate() {
            offset += idx * self.stride(dim);
        }
        offset
    }

    /// Map an index to a storage offset, or return `None` if the index is out
    /// of bounds along any dimension.
    fn try_offset(&self, index: Index<Self>) -> Option<usize> {
        let in_bounds = index
            .as_ref()
            .iter()
            .enumerate()
            .all(|(dim, &idx)| idx < self.extent(dim));
        in_bounds.then(|| self.offset(index))
    }

    /// Return the minimum storage length needed for every index in this
    /// layout to map to a valid offset.
    fn required_span_size(&self) -> usize {
        required_span_size(self.extents().shape().as_ref(), self.strides().as_ref())
    }

    /// Return true if multiple indices may map to the same offset.
    ///
    /// This is a conservative check which can return true for some layouts
    /// that do not overlap. See also [`is_unique`](LayoutMapping::is_unique).
    fn may_overlap(&self) -> bool {
        may_have_internal_overlap(self.extents().shape().as_ref(), self.strides().as_ref())
    }
}

/// Provides convenience methods for querying the shape and strides of a matrix.
pub trait MatrixLayout {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn row_stride(&self) -> usize;
    fn col_stride(&self) -> usize;
}

impl<L: LayoutMapping> MatrixLayout for L
where
    L::Shape: Dims<Rank = U2>,
{
    #[inline]
    fn rows(&self) -> usize {
        self.extent(0)
    }

    #[inline]
    fn cols(&self) -> usize {
        self.extent(1)
    }

    #[inline]
    fn row_stride(&self) -> usize {
        self.stride(0)
    }

    #[inline]
    fn col_stride(&self) -> usize {
        self.stride(1)
    }
}

/// Layout where the last dimension has unit stride and each other stride is
/// the product of the extents to its right ("C" order).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowMajorLayout<E: Dims> {
    extents: Extents<E>,
}

impl<E: Dims> RowMajorLayout<E> {
    pub fn new(extents: Extents<E>) -> Self {
        RowMajorLayout { extents }
    }
}

impl<E: Dims> LayoutMapping for RowMajorLayout<E> {
    type Shape = E;

    fn extents(&self) -> &Extents<E> {
        &self.extents
    }

    #[inline]
    fn stride(&self, dim: usize) -> usize {
        assert!(dim < E::RANK, "dim {} is out of range for rank {}", dim, E::RANK);
        (dim + 1..E::RANK).map(|d| self.extents.extent(d)).product()
    }

    fn is_unique(&self) -> bool {
        true
    }

    fn is_contiguous(&self) -> bool {
        true
    }

    fn is_strided(&self) -> bool {
        true
    }

    fn is_always_unique() -> bool {
        true
    }

    fn is_always_contiguous() -> bool {
        true
    }

    fn is_always_strided() -> bool {
        true
    }
}

/// Layout where the first dimension has unit stride and each other stride is
/// the product of the extents to its left ("Fortran" order).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColMajorLayout<E: Dims> {
    extents: Extents<E>,
}

impl<E: Dims> ColMajorLayout<E> {
    pub fn new(extents: Extents<E>) -> Self {
        ColMajorLayout { extents }
    }
}

impl<E: Dims> LayoutMapping for ColMajorLayout<E> {
    type Shape = E;

    fn extents(&self) -> &Extents<E> {
        &self.extents
    }

    #[inline]
    fn stride(&self, dim: usize) -> usize {
        assert!(dim < E::RANK, "dim {} is out of range for rank {}", dim, E::RANK);
        (0..dim).map(|d| self.extents.extent(d)).product()
    }

    fn is_unique(&self) -> bool {
        true
    }

    fn is_contiguous(&self) -> bool {
        true
    }

    fn is_strided(&self) -> bool {
        true
    }

    fn is_always_unique() -> bool {
        true
    }

    fn is_always_contiguous() -> bool {
        true
    }

    fn is_always_strided() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{ColMajorLayout, LayoutMapping, MatrixLayout, RowMajorLayout};
    use crate::{Dynamic, Extents, Static};

    #[test]
    fn test_row_major() {
        let layout = RowMajorLayout::new(Extents::<(Dynamic, Static<3>, Dynamic)>::new([2, 4]));

        assert_eq!(layout.rank(), 3);
        assert_eq!(layout.strides(), [12, 4, 1]);
        assert_eq!(layout.offset([1, 2, 3]), 12 + 8 + 3);
        assert_eq!(layout.required_span_size(), 24);
        assert!(layout.is_contiguous());
        assert!(!layout.may_overlap());
        assert!(RowMajorLayout::<(Dynamic, Dynamic)>::is_always_contiguous());
    }

    #[test]
    fn test_col_major() {
        let layout = ColMajorLayout::new(Extents::<(Dynamic, Dynamic)>::new([3, 4]));

        assert_eq!(layout.strides(), [1, 3]);
        assert_eq!(layout.offset([2, 3]), 11);
        assert_eq!(layout.required_span_size(), 12);
        assert_eq!(layout.rows(), 3);
        assert_eq!(layout.cols(), 4);
        assert_eq!(layout.row_stride(), 1);
        assert_eq!(layout.col_stride(), 3);
    }

    #[test]
    fn test_try_offset() {
        let layout = RowMajorLayout::new(Extents::<(Static<3>, Static<4>)>::new([]));

        assert_eq!(layout.try_offset([2, 3]), Some(11));
        assert_eq!(layout.try_offset([3, 0]), None);
        assert_eq!(layout.try_offset([0, 4]), None);

        // `offset` does not check bounds.
        assert_eq!(layout.offset([3, 0]), 12);
    }

    #[test]
    fn test_rank_zero() {
        let layout = RowMajorLayout::new(Extents::<()>::new([]));
        assert_eq!(layout.offset([]), 0);
        assert_eq!(layout.required_span_size(), 1);
        assert!(layout.is_contiguous());
    }

    #[test]
    #[should_panic(expected = "dim 2 is out of range for rank 2")]
    fn test_stride_out_of_range() {
        let layout = RowMajorLayout::new(Extents::<(Dynamic, Dynamic)>::new([3, 4]));
        layout.stride(2);
    }
}
