//! Error types that are reported when constructing layouts from runtime
//! values.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors that can occur when creating extents or a layout mapping from
/// slices of values whose lengths are only known at runtime.
///
/// The typed constructors (eg. [`StridedLayout::new`](crate::StridedLayout::new))
/// check the same conditions at compile time and cannot fail.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutError {
    /// The number of values did not match the rank.
    RankMismatch { expected: usize, actual: usize },

    /// The number of values did not match the number of dynamic slots.
    DynamicCountMismatch { expected: usize, actual: usize },

    /// An extent did not match the value fixed by the extents type.
    StaticExtentMismatch {
        dim: usize,
        expected: usize,
        actual: usize,
    },

    /// A stride did not match the value fixed by the strides type.
    StaticStrideMismatch {
        dim: usize,
        expected: usize,
        actual: usize,
    },
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::RankMismatch { expected, actual } => {
                write!(f, "expected {} dims but got {}", expected, actual)
            }
            LayoutError::DynamicCountMismatch { expected, actual } => {
                write!(f, "expected {} dynamic values but got {}", expected, actual)
            }
            LayoutError::StaticExtentMismatch {
                dim,
                expected,
                actual,
            } => write!(
                f,
                "extent {} of dim {} does not match static extent {}",
                actual, dim, expected
            ),
            LayoutError::StaticStrideMismatch {
                dim,
                expected,
                actual,
            } => write!(
                f,
                "stride {} of dim {} does not match static stride {}",
                actual, dim, expected
            ),
        }
    }
}

impl Error for LayoutError {}
