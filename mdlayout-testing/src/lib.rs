//! Internal testing utilities for the mdlayout crate.

use std::fmt::Debug;
use std::panic::{catch_unwind, RefUnwindSafe, UnwindSafe};

/// Runs a test function over a table of cases.
///
/// Each case is run even if an earlier one fails. Once every case has been
/// evaluated the test panics if any of them did, listing the debug
/// representation of each failing case. This keeps layout tests compact: a
/// `Case` struct describes the extents, strides and expected results, and a
/// single closure checks them.
///
/// ```
/// use mdlayout_testing::TestCases;
///
/// #[derive(Debug)]
/// struct Case {
///     shape: [usize; 2],
///     len: usize,
/// }
///
/// let cases = [
///     Case { shape: [2, 3], len: 6 },
///     Case { shape: [4, 0], len: 0 },
/// ];
///
/// cases.test_each(|case| {
///     assert_eq!(case.shape.iter().product::<usize>(), case.len);
/// });
/// ```
///
/// Cases and any values captured by the test closure must be unwind safe.
/// Cases that are not can be passed by value using
/// [`test_each_value`](TestCases::test_each_value).
pub trait TestCases {
    /// The data for a single test case.
    type Case;

    /// Call `test` with a reference to each case, catching panics.
    fn test_each(self, test: impl Fn(&Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe;

    /// Call `test` with each case by value, catching panics.
    ///
    /// The debug representation of each case is captured before it is
    /// moved into the test function.
    fn test_each_value(self, test: impl Fn(Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe;
}

fn report_failures(failures: &[String]) {
    assert!(
        failures.is_empty(),
        "{} test cases failed: [{}]",
        failures.len(),
        failures.join(", ")
    );
}

impl<I: IntoIterator> TestCases for I {
    type Case = I::Item;

    fn test_each(self, test: impl Fn(&I::Item) + RefUnwindSafe)
    where
        I::Item: Debug + RefUnwindSafe,
    {
        let failures: Vec<String> = self
            .into_iter()
            .filter(|case| catch_unwind(|| test(case)).is_err())
            .map(|case| format!("{:?}", case))
            .collect();
        report_failures(&failures);
    }

    fn test_each_value(self, test: impl Fn(I::Item) + RefUnwindSafe)
    where
        I::Item: Debug + UnwindSafe,
    {
        let mut failures = Vec::new();
        for case in self {
            let case_str = format!("{:?}", case);
            if catch_unwind(|| test(case)).is_err() {
                failures.push(case_str);
            }
        }
        report_failures(&failures);
    }
}
