use std::fmt::Debug;

use rand::Rng;
use rand::SeedableRng;

use crate::roster_assert_moderate;

/// Abstraction for randomness, in order to swap out different source of randomness.
///
/// This is especially useful when testing, to control which values are chosen when random
/// decisions are required.
pub(crate) trait Random: Debug {
    /// Generates a bool with probability `probability` of being true. It should hold that
    /// `probability ∈ [0, 1]`.
    fn generate_bool(&mut self, probability: f64) -> bool;
}

// We provide a blanket implementation of the trait for any type which implements `SeedableRng`,
// `Rng` and `Debug` to ensure that we can use any "regular" random generator where we expect an
// implementation of Random.
impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_bool(&mut self, probability: f64) -> bool {
        roster_assert_moderate!(
            (0.0..=1.0).contains(&probability),
            "It should hold that 0.0 <= {probability} <= 1.0"
        );

        self.gen_bool(probability)
    }
}
