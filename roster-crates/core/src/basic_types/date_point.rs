use std::fmt::Debug;
use std::hash::Hash;

use crate::roster_assert_simple;

/// A point on a one-dimensional time axis on which meetings take place.
///
/// The only arithmetic the scheduler needs is the absolute distance between two points. For
/// calendar dates the distance is measured in days, for integer ordinals in raw units.
pub trait DatePoint: Clone + Eq + Hash + Debug {
    /// The absolute distance between `self` and `other`; zero if and only if they are equal.
    fn distance(&self, other: &Self) -> f64;
}

#[cfg(feature = "chrono")]
impl DatePoint for chrono::NaiveDate {
    fn distance(&self, other: &Self) -> f64 {
        self.signed_duration_since(*other).num_days().unsigned_abs() as f64
    }
}

impl DatePoint for i64 {
    fn distance(&self, other: &Self) -> f64 {
        self.abs_diff(*other) as f64
    }
}

impl DatePoint for i32 {
    fn distance(&self, other: &Self) -> f64 {
        f64::from(self.abs_diff(*other))
    }
}

/// The closeness penalty of holding two presentations on `a` and `b`: the reciprocal of their
/// distance.
///
/// The metric is symmetric and strictly decreasing in the distance. It is undefined for equal
/// points; callers only evaluate it for distinct dates.
pub fn badness<D: DatePoint>(a: &D, b: &D) -> f64 {
    let distance = a.distance(b);
    roster_assert_simple!(
        distance > 0.0,
        "badness is undefined for identical date points {a:?} and {b:?}"
    );

    1.0 / distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badness_is_reciprocal_of_distance() {
        assert_eq!(badness(&3_i64, &7_i64), 0.25);
        assert_eq!(badness(&-2_i32, &2_i32), 0.25);
    }

    #[test]
    fn badness_is_symmetric() {
        for (a, b) in [(0_i64, 1_i64), (5, 19), (-40, 13)] {
            assert_eq!(badness(&a, &b), badness(&b, &a));
        }
    }

    #[test]
    fn badness_strictly_decreases_with_distance() {
        let origin = 0_i64;
        let penalties = (1..20).map(|day| badness(&origin, &day)).collect::<Vec<_>>();

        assert!(penalties.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn calendar_dates_are_measured_in_days() {
        use chrono::NaiveDate;

        let first = NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");
        let second = NaiveDate::from_ymd_opt(2024, 1, 22).expect("valid date");

        assert_eq!(first.distance(&second), 14.0);
        assert_eq!(badness(&second, &first), 1.0 / 14.0);
    }

    #[test]
    #[should_panic]
    fn badness_of_identical_points_is_rejected() {
        let _ = badness(&4_i64, &4_i64);
    }
}
