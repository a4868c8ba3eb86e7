//! Custom assertions for testing

use std::fmt::Debug;

use crate::helpers::LogCapture;

/// Assert that a value is within a range
pub fn assert_in_range<T: PartialOrd + Debug>(value: T, min: T, max: T) {
    assert!(
        value >= min && value <= max,
        "Value {:?} not in range [{:?}, {:?}]",
        value,
        min,
        max
    );
}

/// Assert that a collection is sorted
pub fn assert_sorted<T: PartialOrd + Debug>(collection: &[T]) {
    for window in collection.windows(2) {
        assert!(
            window[0] <= window[1],
            "Collection not sorted at elements: {:?} > {:?}",
            window[0],
            window[1]
        );
    }
}

/// Assert that some line logged at `level` contains every needle
pub fn assert_logged(capture: &LogCapture, level: &str, needles: &[&str]) {
    let lines = capture.lines_at(level);
    assert!(
        lines
            .iter()
            .any(|line| needles.iter().all(|needle| line.contains(needle))),
        "No {} line containing {:?}. Captured:\n{}",
        level,
        needles,
        capture.contents()
    );
}

/// Assert that nothing was logged at `level`
pub fn assert_nothing_logged_at(capture: &LogCapture, level: &str) {
    let lines = capture.lines_at(level);
    assert!(
        lines.is_empty(),
        "Expected no {} lines, found:\n{}",
        level,
        lines.join("\n")
    );
}

/// Assert that an async operation completes within a duration
#[macro_export]
macro_rules! assert_completes_within {
    ($duration:expr, $future:expr) => {
        tokio::time::timeout($duration, $future)
            .await
            .expect("Operation did not complete within timeout")
    };
}
