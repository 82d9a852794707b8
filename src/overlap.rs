use std::iter::zip;

use smallvec::SmallVec;

/// Return the minimum length of storage such that every offset produced by a
/// layout with the given shape and strides lies in `[0, len)`.
///
/// This is the offset of the element with the maximum index in every
/// dimension, plus one, or zero if the layout has no elements.
pub fn required_span_size(shape: &[usize], strides: &[usize]) -> usize {
    if shape.iter().any(|&size| size == 0) {
        return 0;
    }
    let max_offset: usize = zip(shape, strides)
        .map(|(&size, &stride)| (size - 1) * stride)
        .sum();
    max_offset + 1
}

/// Return true if the dimensions of a layout can be ordered so that each
/// dimension's address range exactly abuts the next, covering the whole span
/// without gaps.
///
/// Unlike a row-major contiguity check this accepts any permutation of the
/// dimensions, so column-major and other transposed layouts of packed data
/// are contiguous.
///
/// Dimensions are matched from a pool: starting from a frontier of 1, find a
/// dimension whose stride equals the frontier, remove it and advance the
/// frontier to `stride * size`. The layout is contiguous if every dimension
/// is consumed. Dimensions of size 1 only address offset zero and are
/// skipped.
pub fn is_contiguous_in_any_order(shape: &[usize], strides: &[usize]) -> bool {
    if shape.iter().any(|&size| size == 0) {
        return true;
    }

    let mut pool: SmallVec<[(usize, usize); 8]> = zip(shape, strides)
        .filter(|(&size, _)| size != 1)
        .map(|(&size, &stride)| (size, stride))
        .collect();

    let mut frontier = 1;
    while !pool.is_empty() {
        let Some(pos) = pool.iter().position(|&(_, stride)| stride == frontier) else {
            return false;
        };
        let (size, stride) = pool.swap_remove(pos);
        frontier = size * stride;
    }
    true
}

/// Return true if multiple indices may map to the same offset.
///
/// The test is conservative. After sorting dimensions by increasing stride,
/// each stride must exceed the maximum offset reachable through the
/// dimensions before it. Layouts that are contiguous in any order, or that
/// are slices of such layouts, pass. Some layouts without overlap are
/// reported as possibly overlapping, eg. `shape == [4, 4]` with
/// `strides == [3, 4]`.
pub fn may_have_internal_overlap(shape: &[usize], strides: &[usize]) -> bool {
    if shape.iter().any(|&size| size == 0) {
        return false;
    }

    if is_contiguous_in_any_order(shape, strides) {
        return false;
    }

    let mut stride_shape: SmallVec<[(usize, usize); 8]> = zip(strides, shape)
        .filter(|(_, &size)| size != 1)
        .map(|(&stride, &size)| (stride, size))
        .collect();
    stride_shape.sort_unstable();

    let mut max_offset = 0;
    for (stride, size) in stride_shape {
        if stride <= max_offset {
            return true;
        }
        max_offset += (size - 1) * stride;
    }
    false
}

#[cfg(test)]
mod tests {
    use mdlayout_testing::TestCases;

    use super::{is_contiguous_in_any_order, may_have_internal_overlap, required_span_size};

    #[derive(Debug)]
    struct Case<'a> {
        shape: &'a [usize],
        strides: &'a [usize],
        expected: bool,
    }

    #[test]
    fn test_required_span_size() {
        assert_eq!(required_span_size(&[3, 4], &[4, 1]), 12);
        assert_eq!(required_span_size(&[3, 4], &[1, 3]), 12);
        assert_eq!(required_span_size(&[2, 2], &[1, 3]), 5);
        assert_eq!(required_span_size(&[2, 3], &[4, 1]), 7);
        assert_eq!(required_span_size(&[5, 0], &[1, 5]), 0);
        assert_eq!(required_span_size(&[], &[]), 1);
    }

    #[test]
    fn test_is_contiguous_in_any_order() {
        let cases = [
            // Row-major
            Case {
                shape: &[2, 3],
                strides: &[3, 1],
                expected: true,
            },
            // Column-major
            Case {
                shape: &[2, 3],
                strides: &[1, 2],
                expected: true,
            },
            // Padding at the end of each row
            Case {
                shape: &[2, 3],
                strides: &[4, 1],
                expected: false,
            },
            // No unit stride
            Case {
                shape: &[4],
                strides: &[2],
                expected: false,
            },
            // Permuted 3D
            Case {
                shape: &[2, 3, 4],
                strides: &[4, 8, 1],
                expected: true,
            },
            // Size-1 dimension with an arbitrary stride
            Case {
                shape: &[1, 3],
                strides: &[7, 1],
                expected: true,
            },
            // Broadcast
            Case {
                shape: &[3, 3],
                strides: &[0, 1],
                expected: false,
            },
            // Two dimensions with unit stride overlap
            Case {
                shape: &[2, 2],
                strides: &[1, 1],
                expected: false,
            },
            // Empty
            Case {
                shape: &[0, 3],
                strides: &[5, 2],
                expected: true,
            },
            // Rank 0
            Case {
                shape: &[],
                strides: &[],
                expected: true,
            },
        ];

        cases.test_each(|case| {
            assert_eq!(
                is_contiguous_in_any_order(case.shape, case.strides),
                case.expected
            );
        });
    }

    #[test]
    fn test_may_have_internal_overlap() {
        let cases = [
            Case {
                shape: &[3, 4],
                strides: &[4, 1],
                expected: false,
            },
            Case {
                shape: &[3, 4],
                strides: &[1, 3],
                expected: false,
            },
            // Padded rows
            Case {
                shape: &[3, 4],
                strides: &[6, 1],
                expected: false,
            },
            // Broadcast along the first dimension
            Case {
                shape: &[3, 4],
                strides: &[0, 1],
                expected: true,
            },
            // Rows overlap
            Case {
                shape: &[3, 4],
                strides: &[2, 1],
                expected: true,
            },
            // No overlap, but the conservative check reports one.
            Case {
                shape: &[4, 4],
                strides: &[3, 4],
                expected: true,
            },
            // Broadcast dimension of size 1
            Case {
                shape: &[1, 4],
                strides: &[0, 2],
                expected: false,
            },
            Case {
                shape: &[0, 4],
                strides: &[0, 0],
                expected: false,
            },
        ];

        cases.test_each(|case| {
            assert_eq!(
                may_have_internal_overlap(case.shape, case.strides),
                case.expected
            );
        });
    }
}
