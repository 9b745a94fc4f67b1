use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Statutory drawback rate: 99% of the duty originally paid.
pub const REFUND_RATE: Decimal = dec!(0.99);

/// Single-dataset refund rule: eligibility alone grants the refund. Used
/// when no export data was supplied and matching cannot run.
pub(crate) fn refund_for_eligible(duty_paid: Decimal, is_eligible: bool) -> Decimal {
    if is_eligible {
        rounded_refund(duty_paid)
    } else {
        Decimal::ZERO
    }
}

/// Two-dataset refund rule: the import must be eligible and paired with
/// at least one qualifying export.
pub(crate) fn refund_for_matched(
    duty_paid: Decimal,
    is_eligible: bool,
    has_export_match: bool,
) -> Decimal {
    if is_eligible && has_export_match {
        rounded_refund(duty_paid)
    } else {
        Decimal::ZERO
    }
}

fn rounded_refund(duty_paid: Decimal) -> Decimal {
    (duty_paid * REFUND_RATE).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligible_and_matched_refund_is_99_percent_rounded_to_cents() {
        assert_eq!(refund_for_matched(dec!(1000.00), true, true), dec!(990.00));
        assert_eq!(refund_for_matched(dec!(100.00), true, true), dec!(99.00));
        assert_eq!(refund_for_matched(dec!(33.33), true, true), dec!(33.00));
    }

    #[test]
    fn unmatched_or_ineligible_imports_get_nothing() {
        assert_eq!(refund_for_matched(dec!(1000.00), true, false), Decimal::ZERO);
        assert_eq!(refund_for_matched(dec!(1000.00), false, true), Decimal::ZERO);
        assert_eq!(refund_for_matched(dec!(1000.00), false, false), Decimal::ZERO);
    }

    #[test]
    fn eligibility_alone_is_enough_in_single_dataset_mode() {
        assert_eq!(refund_for_eligible(dec!(1000.00), true), dec!(990.00));
        assert_eq!(refund_for_eligible(dec!(1000.00), false), Decimal::ZERO);
    }

    #[test]
    fn midpoint_cents_round_away_from_zero() {
        // 12.45 * 0.99 = 12.3255
        assert_eq!(refund_for_matched(dec!(12.45), true, true), dec!(12.33));
        // 2.50 * 0.99 = 2.475
        assert_eq!(refund_for_matched(dec!(2.50), true, true), dec!(2.48));
    }
}
