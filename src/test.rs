/// Check for equality between two ΔE2000 values within the absolute
/// tolerance used to validate peer implementations against each other.
#[macro_export]
macro_rules! assert_delta_eq {
    ($actual:expr,$expected:expr) => {{
        approx::assert_abs_diff_eq!($actual, $expected, epsilon = 1.0e-10);
    }};
}
