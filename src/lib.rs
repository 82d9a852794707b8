//! mdlayout provides layout mappings for multi-dimensional array views. A
//! layout mapping converts a multi-index, with one entry per dimension, into
//! an offset in linear storage.
//!
//! # Static and dynamic values
//!
//! The size of each dimension (the _extents_) and the distance between
//! adjacent elements along each dimension (the _strides_) can each be fixed
//! at compile time or supplied at runtime, independently for every
//! dimension. They are described by tuples of [`Static`] and [`Dynamic`]
//! slots. Static values take no space and fold to constants, so a layout
//! whose values are all static is zero-sized.
//!
//! # Layout types
//!
//! | Type | Strides |
//! | ---- | ------- |
//! | [StridedLayout] | Arbitrary, per dimension |
//! | [RowMajorLayout] | Derived from the extents, last dimension has unit stride |
//! | [ColMajorLayout] | Derived from the extents, first dimension has unit stride |
//!
//! All layouts implement the [LayoutMapping] trait, which provides offset
//! computation, the required storage length and structural queries. The
//! preferred way to import it is via the prelude:
//!
//! ```
//! use mdlayout::prelude::*;
//! use mdlayout::{Dynamic, Extents, Static, StridedLayout};
//!
//! // A 3x4 row-major layout with rows padded to 6 elements.
//! let layout = StridedLayout::<(Dynamic, Static<4>), (Dynamic, Static<1>)>::new(
//!     Extents::new([3]),
//!     [6],
//! );
//!
//! assert_eq!(layout.offset([2, 3]), 15);
//! assert_eq!(layout.required_span_size(), 16);
//! assert!(!layout.is_contiguous());
//! ```
//!
//! Passing the wrong number of indices, or the wrong number of dynamic
//! values, is a compile error. Constructors which accept slices, such as
//! [`StridedLayout::try_from_shape_and_strides`], check the same conditions
//! at runtime and report a [`LayoutError`](errors::LayoutError).
//!
//! # Serialization
//!
//! Extents and layouts can be serialized using [serde](https://serde.rs) if
//! the `serde` feature is enabled. A layout is represented by its shape and
//! strides:
//!
//! ```json
//! {
//!   "shape": [3, 4],
//!   "strides": [6, 1]
//! }
//! ```

mod dims;
pub mod errors;
mod extents;
pub mod layout;
pub mod overlap;
mod strided;
pub mod type_num;

#[cfg(feature = "serde")]
mod impl_serialize;

// Re-exports for convenience.
pub use dims::{Dim, DimAt, Dims, Dynamic, DynamicValues, Static, Values};
pub use extents::Extents;
pub use layout::{ColMajorLayout, Index, LayoutMapping, MatrixLayout, RowMajorLayout};
pub use strided::StridedLayout;

/// This module provides a convenient way to import the most common traits
/// from this library via a glob import.
pub mod prelude {
    pub use super::{Dims, LayoutMapping, MatrixLayout};
}
