use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;

/// Abstraction for randomness, in order to swap out different sources of randomness.
///
/// Heuristics which need randomness own a value implementing this trait; there is no global
/// generator. This keeps the search of a seeded brancher reproducible across clones and threads,
/// since cloning a space clones the generator state with it.
pub trait Random: Debug {
    /// Generates a random usize in the range `[range.start, range.end)` with equal probability.
    ///
    /// # Example
    /// ```rust
    /// # use rand::rngs::SmallRng;
    /// # use rand::SeedableRng;
    /// # use gourd_core::Random;
    /// let mut rng = SmallRng::seed_from_u64(42);
    /// let elements = vec!["This", "is", "a", "test"];
    /// let selected_index = rng.generate_usize_in_range(0..elements.len());
    /// assert!(selected_index < elements.len());
    /// ```
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;

    /// Generates a random i32 in `[lb, ub]` with equal probability.
    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32;

    /// Generate a random float in the range 0..1.
    fn generate_f64(&mut self) -> f64;
}

impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }

    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32 {
        self.gen_range(lb..=ub)
    }

    fn generate_f64(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}
