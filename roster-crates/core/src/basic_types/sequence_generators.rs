use std::fmt::Debug;

pub(crate) trait SequenceGenerator: Debug {
    fn next(&mut self) -> u64;
}

/// Given constants 'a' and 'm', the i-th element f(i) in a geometric sequence is computed as:
///  f(i) = f(i-1) * m
///  f(0) = a
/// When 'm' is not an integer, the above formula is _not_ the same as f(i) = a * m^i since
/// intermediate values will be rounded down.
///
/// The sequence saturates at [`u64::MAX`].
#[derive(Debug, Copy, Clone)]
pub(crate) struct GeometricSequence {
    current_value: u64,
    multiplication_factor: f64,
}

impl GeometricSequence {
    pub(crate) fn new(starting_value: u64, multiplication_factor: f64) -> GeometricSequence {
        GeometricSequence {
            current_value: starting_value,
            multiplication_factor,
        }
    }
}

impl SequenceGenerator for GeometricSequence {
    fn next(&mut self) -> u64 {
        let next_value = self.current_value;
        // `as` saturates for floats which exceed the target range.
        self.current_value = (self.current_value as f64 * self.multiplication_factor) as u64;
        next_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_2_pow_n() {
        let mut geometric_sequence = GeometricSequence::new(1, 2.0);
        for i in 0..63 {
            assert_eq!(geometric_sequence.next(), 1_u64 << i);
        }
    }

    #[test]
    fn test_multiply_50_procent() {
        let mut geometric_sequence = GeometricSequence::new(100, 1.50);
        let expected = [100, 150, 225, 337, 505, 757, 1135];

        for value in expected {
            assert_eq!(geometric_sequence.next(), value);
        }
    }

    #[test]
    fn sequence_saturates_instead_of_overflowing() {
        let mut geometric_sequence = GeometricSequence::new(u64::MAX / 2, 4.0);
        let _ = geometric_sequence.next();

        assert_eq!(geometric_sequence.next(), u64::MAX);
    }
}
