use super::SequenceGenerator;

/// Given constants `a` and `m`, the i-th element of the sequence is `f(i) = f(i - 1) * m` with
/// `f(0) = a`.
///
/// Intermediate values are rounded down, so for non-integer `m` this differs from `a * m^i`.
/// The sequence saturates at [`i64::MAX`].
#[derive(Debug, Copy, Clone)]
pub struct GeometricSequence {
    current_value: i64,
    multiplication_factor: f64,
}

impl GeometricSequence {
    pub fn new(starting_value: i64, multiplication_factor: f64) -> GeometricSequence {
        GeometricSequence {
            current_value: starting_value,
            multiplication_factor,
        }
    }
}

impl SequenceGenerator for GeometricSequence {
    fn next(&mut self) -> i64 {
        let next_value = self.current_value;
        // `as` saturates for floats which do not fit
        self.current_value = (self.current_value as f64 * self.multiplication_factor) as i64;
        next_value
    }
}
