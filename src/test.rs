/// Check for equality between two components allowing for 16-bit rounding
/// errors.
#[macro_export]
macro_rules! assert_component_eq {
    ($actual:expr,$expected:expr) => {{
        approx::assert_abs_diff_eq!(
            $actual,
            $expected,
            epsilon = 1.0 / i16::MAX as $crate::Component
        );
    }};
}

/// Check that two sets of coordinates are equal allowing for 16-bit rounding
/// errors. Missing coordinates must match exactly.
#[macro_export]
macro_rules! assert_coords_eq {
    ($actual:expr,$expected:expr) => {{
        let actual: $crate::Coords = $actual;
        let expected: $crate::Coords = $expected;
        for (a, e) in actual.iter().zip(expected.iter()) {
            match (a, e) {
                (Some(a), Some(e)) => $crate::assert_component_eq!(*a, *e),
                (None, None) => {}
                _ => panic!("coordinates differ: {:?} != {:?}", actual, expected),
            }
        }
    }};
}
