//! The FBP reduction: cap each line item against its own ceiling, then sum.

use rust_decimal::Decimal;

use super::common::round_rupee;
use crate::models::{AdjustedFbpItem, FbpItem};

/// Effective contribution of one item: `min(amount, max_limit)`, with no
/// cap for unbounded pay heads. Computed lazily, never stored back.
pub fn effective_amount(item: &FbpItem) -> Decimal {
    match item.max_limit {
        Some(cap) => item.amount.min(cap),
        None => item.amount,
    }
}

/// Total FBP figure: `round(Σ min(amount, max_limit))`, in whole rupees.
pub fn total_fbp(items: &[FbpItem]) -> Decimal {
    round_rupee(items.iter().map(effective_amount).sum())
}

/// The list as submitted: every item annotated with its effective amount.
pub fn adjusted_details(items: &[FbpItem]) -> Vec<AdjustedFbpItem> {
    items
        .iter()
        .map(|item| AdjustedFbpItem {
            item: item.clone(),
            adjusted_amount: effective_amount(item),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::RegimeEligibility;

    use super::*;

    fn item(name: &str, amount: Decimal, max_limit: Option<Decimal>) -> FbpItem {
        FbpItem {
            pay_head_id: 1,
            pay_head_name: name.to_string(),
            amount,
            max_limit,
            allowed_tax_regime: RegimeEligibility(3),
            criteria_option: None,
        }
    }

    #[test]
    fn effective_amount_caps_at_the_item_limit() {
        let capped = item("LTA", dec!(60000), Some(dec!(50000)));
        assert_eq!(effective_amount(&capped), dec!(50000));
    }

    #[test]
    fn effective_amount_passes_unbounded_items_through() {
        let unbounded = item("Meal", dec!(10000), None);
        assert_eq!(effective_amount(&unbounded), dec!(10000));
    }

    #[test]
    fn total_caps_then_sums() {
        let items = vec![
            item("LTA", dec!(60000), Some(dec!(50000))),
            item("Meal", dec!(10000), None),
        ];

        assert_eq!(total_fbp(&items), dec!(60000));
    }

    #[test]
    fn total_of_empty_list_is_zero() {
        assert_eq!(total_fbp(&[]), dec!(0));
    }

    #[test]
    fn total_rounds_to_whole_rupees() {
        let items = vec![item("Fuel", dec!(1000.5), None)];
        assert_eq!(total_fbp(&items), dec!(1001));
    }

    #[test]
    fn adjusted_details_annotate_without_mutating_amounts() {
        let items = vec![item("LTA", dec!(60000), Some(dec!(50000)))];

        let adjusted = adjusted_details(&items);

        assert_eq!(adjusted.len(), 1);
        assert_eq!(adjusted[0].item.amount, dec!(60000));
        assert_eq!(adjusted[0].adjusted_amount, dec!(50000));
    }
}
