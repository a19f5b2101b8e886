//! Fixed-point decimal helpers for quantities that are not clock minutes.
//!
//! Spec §3 requires decimal quantities (vacation days, part-time factors,
//! absence durations) to keep at least two fractional digits, and §6.3
//! requires banker's rounding to half-day increments for some of them.
//! [`rust_decimal::Decimal`] already gives us exact base-10 fixed point
//! arithmetic; this module only adds the domain-specific rounding rule.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Rounds `value` to the nearest half (0.5) using banker's rounding
/// (round-half-to-even), as required for absence-duration quantities in
/// spec §6.3.
pub fn round_half_day(value: Decimal) -> Decimal {
    (value * Decimal::TWO).round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven) / Decimal::TWO
}

/// Rounds `value` up to the next whole unit using banker's rounding applied
/// at zero fractional digits, used for sick-day counts in the monthly
/// absence summary (spec §4.3 step 8: "sick_days ceils durations").
pub fn ceil_to_whole(value: Decimal) -> Decimal {
    value.ceil()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_to_nearest_half_with_banker_rounding_on_ties() {
        assert_eq!(round_half_day(dec!(0.74)), dec!(0.5));
        assert_eq!(round_half_day(dec!(0.76)), dec!(1.0));
        // 0.25 is equidistant between 0.0 and 0.5 at the half-day grid;
        // round-half-to-even picks 0.0 (the even multiple of 0.5).
        assert_eq!(round_half_day(dec!(0.25)), dec!(0.0));
        assert_eq!(round_half_day(dec!(0.75)), dec!(1.0));
    }

    #[test]
    fn ceil_rounds_partial_days_up() {
        assert_eq!(ceil_to_whole(dec!(1.25)), dec!(2));
        assert_eq!(ceil_to_whole(dec!(2.0)), dec!(2));
    }
}
