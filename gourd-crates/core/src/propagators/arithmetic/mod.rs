mod binary_less_or_equal;
mod binary_not_equals;
mod linear_equal;
mod linear_less_or_equal;

pub use binary_less_or_equal::*;
pub use binary_not_equals::*;
pub use linear_equal::*;
pub use linear_less_or_equal::*;

/// Saturate a bound computed in 64 bits to the range of domain values.
fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
