//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts travel as `f64` (that is what the backend stores), but every
//! calculation is done in `Decimal` and converted back at the edge.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round to whole currency units for display (half away from zero)
pub fn round_whole(value: f64) -> Decimal {
    to_decimal(value).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole-unit amount with a `$` prefix, e.g. `$338`
pub fn format_whole(value: f64) -> String {
    format!("${}", round_whole(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_non_finite_defaults_to_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_format_whole() {
        assert_eq!(format_whole(600.0), "$600");
        assert_eq!(format_whole(37.5), "$38");
        assert_eq!(format_whole(337.49), "$337");
        assert_eq!(format_whole(0.0), "$0");
    }
}
