use super::SequenceGenerator;

/// The Luby sequence `1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, ...` multiplied by a base
/// value.
///
/// Each element is computed in constant time using Knuth's "reluctant doubling" formula.
#[derive(Debug, Copy, Clone)]
pub struct LubySequence {
    u: i64,
    v: i64,
    base_value: i64,
}

impl LubySequence {
    pub fn new(base_value: i64) -> LubySequence {
        LubySequence {
            u: 1,
            v: 1,
            base_value,
        }
    }
}

impl SequenceGenerator for LubySequence {
    fn next(&mut self) -> i64 {
        let next_value = self.v;
        if (self.u & (-self.u)) == self.v {
            self.u += 1;
            self.v = 1;
        } else {
            self.v *= 2;
        }
        next_value.saturating_mul(self.base_value)
    }
}

#[cfg(test)]
mod tests {
    use super::LubySequence;
    use crate::basic_types::sequence_generators::SequenceGenerator;

    fn luby_compute_recursively(i: usize) -> usize {
        let k = (i + 1).ilog2();
        if (i + 1).is_power_of_two() {
            1 << (k - 1)
        } else {
            luby_compute_recursively(i + 1 - (1 << k))
        }
    }

    #[test]
    fn first_elements_with_base_one() {
        let mut luby_sequence = LubySequence::new(1);
        let expected = [1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2];
        for value in expected {
            assert_eq!(luby_sequence.next(), value);
        }
    }

    #[test]
    fn matches_recursive_definition_with_base_50() {
        let mut luby_sequence = LubySequence::new(50);
        for i in 1..10000 {
            assert_eq!(luby_sequence.next(), (luby_compute_recursively(i) * 50) as i64);
        }
    }
}
