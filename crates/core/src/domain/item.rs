use rust_decimal::Decimal;

use crate::domain::catalog::CatalogEntry;

/// A catalog entry paired with the quantity the user has selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    entry: CatalogEntry,
    quantity: u32,
}

impl Item {
    pub fn new(entry: CatalogEntry) -> Self {
        Self { entry, quantity: 0 }
    }

    #[cfg(test)]
    pub(crate) fn with_quantity(entry: CatalogEntry, quantity: u32) -> Self {
        Self { entry, quantity }
    }

    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns whether the quantity changed; it stays put at `u32::MAX`.
    pub fn increase(&mut self) -> bool {
        let before = self.quantity;
        self.quantity = self.quantity.saturating_add(1);
        self.quantity != before
    }

    /// No-op at zero.
    pub fn decrease(&mut self) -> bool {
        let before = self.quantity;
        self.quantity = self.quantity.saturating_sub(1);
        self.quantity != before
    }

    pub fn line_total(&self) -> Decimal {
        self.entry.price * Decimal::from(self.quantity)
    }

    pub fn is_selected(&self) -> bool {
        self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::catalog::CatalogEntry;

    use super::Item;

    fn item(price: Decimal) -> Item {
        Item::new(CatalogEntry::new("Milk tea", price))
    }

    #[test]
    fn starts_unselected_with_zero_quantity() {
        let item = item(Decimal::new(1250, 2));

        assert_eq!(item.quantity(), 0);
        assert!(!item.is_selected());
        assert_eq!(item.line_total(), Decimal::ZERO);
    }

    #[test]
    fn decrease_at_zero_stays_at_zero() {
        let mut item = item(Decimal::ONE);
        assert!(!item.decrease());
        assert!(!item.decrease());

        assert_eq!(item.quantity(), 0);
        assert!(!item.is_selected());
    }

    #[test]
    fn line_total_is_unrounded_price_times_quantity() {
        let mut item = item(Decimal::new(333, 3));
        item.increase();
        item.increase();
        item.increase();

        assert_eq!(item.quantity(), 3);
        assert!(item.is_selected());
        assert_eq!(item.line_total(), Decimal::new(999, 3));
    }

    #[test]
    fn increase_then_decrease_returns_to_unselected() {
        let mut item = item(Decimal::TEN);
        item.increase();
        item.decrease();

        assert_eq!(item.quantity(), 0);
        assert_eq!(item.line_total(), Decimal::ZERO);
    }

    #[test]
    fn increase_reports_no_change_at_quantity_cap() {
        let entry = CatalogEntry::new("Milk tea", Decimal::ONE);
        let mut item = Item::with_quantity(entry, u32::MAX - 1);

        assert!(item.increase());
        assert!(!item.increase());
        assert_eq!(item.quantity(), u32::MAX);
        assert!(item.decrease());
    }
}
