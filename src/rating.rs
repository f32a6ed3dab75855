//! Review aggregation: average rating and the star breakdown clients render.

use serde::Serialize;
use utoipa::ToSchema;

/// Arithmetic mean of the ratings, rounded to one decimal place. An empty
/// list averages to 0, not an error.
pub fn average(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i32 = ratings.iter().sum();
    let mean = f64::from(sum) / ratings.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Star breakdown for a (possibly fractional) rating out of 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StarDisplay {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

/// Full stars are the integer part, a half star appears for a fractional
/// remainder of at least 0.5, and the rest of the five slots are empty.
pub fn stars(rating: f64) -> StarDisplay {
    let clamped = rating.clamp(0.0, 5.0);
    StarDisplay {
        full: clamped.floor() as u8,
        half: clamped.fract() >= 0.5,
        empty: (5.0 - clamped.ceil()) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_review_list_averages_to_zero() {
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn average_is_mean_rounded_to_one_decimal() {
        assert_eq!(average(&[4, 5, 3]), 4.0);
        assert_eq!(average(&[5]), 5.0);
        assert_eq!(average(&[4, 5]), 4.5);
        // 11 / 3 = 3.666... rounds to 3.7
        assert_eq!(average(&[3, 4, 4]), 3.7);
        assert_eq!(average(&[1, 2]), 1.5);
    }

    #[test]
    fn three_and_a_half_stars() {
        assert_eq!(
            stars(3.5),
            StarDisplay {
                full: 3,
                half: true,
                empty: 1
            }
        );
    }

    #[test]
    fn zero_rating_is_all_empty() {
        assert_eq!(
            stars(0.0),
            StarDisplay {
                full: 0,
                half: false,
                empty: 5
            }
        );
    }

    #[test]
    fn perfect_rating_is_all_full() {
        assert_eq!(
            stars(5.0),
            StarDisplay {
                full: 5,
                half: false,
                empty: 0
            }
        );
    }

    #[test]
    fn small_fraction_gets_no_half_star() {
        let s = stars(4.2);
        assert_eq!(s.full, 4);
        assert!(!s.half);
        assert_eq!(s.empty, 0);
    }

    #[test]
    fn out_of_range_ratings_are_clamped() {
        assert_eq!(stars(6.0).full, 5);
        assert_eq!(stars(-1.0).empty, 5);
    }
}
