//! Shared helpers for the derivation pipeline.

use rust_decimal::Decimal;

/// Rounds a decimal value to a whole rupee using half-up rounding.
///
/// Values at exactly 0.5 round away from zero, matching what the payroll
/// back-end does with submitted totals.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payrun_core::derivation::common::round_rupee;
///
/// assert_eq!(round_rupee(dec!(19200.4)), dec!(19200));
/// assert_eq!(round_rupee(dec!(19200.5)), dec!(19201));
/// ```
pub fn round_rupee(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
