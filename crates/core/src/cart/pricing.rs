use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::item::Item;

/// Delivery constants of a cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPolicy {
    pub threshold: Decimal,
    pub fee: Decimal,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self { threshold: Decimal::from(30), fee: Decimal::from(5) }
    }
}

/// Every aggregate of a cart, taken at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub total_price: Decimal,
    pub total_selected_count: u64,
    pub has_items_in_cart: bool,
    pub meets_delivery_threshold: bool,
    pub remaining_for_free_delivery: Decimal,
    pub delivery: DeliveryPolicy,
}

pub fn price_items(items: &[Item]) -> Decimal {
    items.iter().map(Item::line_total).sum()
}

pub fn count_selected(items: &[Item]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity())).sum()
}

/// `max(0, round(threshold - total))`, halves rounded away from zero.
pub fn remaining_for_free_delivery(threshold: Decimal, total: Decimal) -> Decimal {
    (threshold - total)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO)
}

/// Fixed-point display with exactly two decimals.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::catalog::CatalogEntry;
    use crate::domain::item::Item;

    use super::{count_selected, format_amount, price_items, remaining_for_free_delivery};

    #[test]
    fn remaining_rounds_half_up_and_clamps_at_zero() {
        let threshold = Decimal::from(30);

        assert_eq!(remaining_for_free_delivery(threshold, Decimal::from(10)), Decimal::from(20));
        assert_eq!(
            remaining_for_free_delivery(threshold, Decimal::new(2750, 2)),
            Decimal::from(3)
        );
        assert_eq!(
            remaining_for_free_delivery(threshold, Decimal::new(2760, 2)),
            Decimal::from(2)
        );
        assert_eq!(remaining_for_free_delivery(threshold, Decimal::from(35)), Decimal::ZERO);
        assert_eq!(
            remaining_for_free_delivery(threshold, Decimal::new(3020, 2)),
            Decimal::ZERO
        );
    }

    #[test]
    fn format_amount_always_shows_two_decimals() {
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(Decimal::from(35)), "35.00");
        assert_eq!(format_amount(Decimal::new(125, 1)), "12.50");
        assert_eq!(format_amount(Decimal::new(19_995, 3)), "20.00");
    }

    #[test]
    fn sums_line_totals_and_quantities() {
        let mut first = Item::new(CatalogEntry::new("A", Decimal::from(10)));
        let mut second = Item::new(CatalogEntry::new("B", Decimal::new(250, 1)));
        first.increase();
        first.increase();
        second.increase();

        let items = vec![first, second];

        assert_eq!(price_items(&items), Decimal::from(45));
        assert_eq!(count_selected(&items), 3);
    }
}
