pub mod pricing;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::catalog::Catalog;
use crate::domain::item::Item;
use crate::errors::DomainError;

use self::pricing::{
    count_selected, price_items, remaining_for_free_delivery, CartSummary, DeliveryPolicy,
};

/// The whole cart: one [`Item`] per catalog entry, in catalog order.
///
/// Aggregates are never cached; every query walks the items so the answer always
/// reflects the latest mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartState {
    items: Vec<Item>,
    delivery: DeliveryPolicy,
}

impl CartState {
    pub fn new(catalog: Catalog, delivery: DeliveryPolicy) -> Self {
        let items = catalog.into_entries().into_iter().map(Item::new).collect();
        Self { items, delivery }
    }

    #[cfg(test)]
    pub(crate) fn with_quantity(mut self, index: usize, quantity: u32) -> Self {
        self.items[index] = Item::with_quantity(self.items[index].entry().clone(), quantity);
        self
    }

    pub fn delivery(&self) -> DeliveryPolicy {
        self.delivery
    }

    pub fn delivery_threshold(&self) -> Decimal {
        self.delivery.threshold
    }

    pub fn delivery_fee(&self) -> Decimal {
        self.delivery.fee
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Result<&Item, DomainError> {
        let len = self.items.len();
        self.items.get(index).ok_or(DomainError::IndexOutOfRange { index, len })
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut Item, DomainError> {
        let len = self.items.len();
        self.items.get_mut(index).ok_or(DomainError::IndexOutOfRange { index, len })
    }

    /// Adds one to item `index`. Returns `Ok(false)` when the quantity is already
    /// at `u32::MAX` and nothing changed.
    pub fn increase(&mut self, index: usize) -> Result<bool, DomainError> {
        let item = self.item_mut(index)?;
        let changed = item.increase();
        debug!(event_name = "cart.item.increased", index, quantity = item.quantity(), changed);
        Ok(changed)
    }

    /// Removes one from item `index`. Returns `Ok(false)` at zero.
    pub fn decrease(&mut self, index: usize) -> Result<bool, DomainError> {
        let item = self.item_mut(index)?;
        let changed = item.decrease();
        debug!(event_name = "cart.item.decreased", index, quantity = item.quantity(), changed);
        Ok(changed)
    }

    pub fn quantity(&self, index: usize) -> Result<u32, DomainError> {
        self.item(index).map(Item::quantity)
    }

    pub fn is_selected(&self, index: usize) -> Result<bool, DomainError> {
        self.item(index).map(Item::is_selected)
    }

    pub fn total_price(&self) -> Decimal {
        price_items(&self.items)
    }

    pub fn total_selected_count(&self) -> u64 {
        count_selected(&self.items)
    }

    pub fn has_items_in_cart(&self) -> bool {
        self.total_selected_count() > 0
    }

    pub fn meets_delivery_threshold(&self) -> bool {
        self.total_price() >= self.delivery.threshold
    }

    pub fn remaining_for_free_delivery(&self) -> Decimal {
        remaining_for_free_delivery(self.delivery.threshold, self.total_price())
    }

    pub fn summary(&self) -> CartSummary {
        let total_price = self.total_price();
        let total_selected_count = self.total_selected_count();

        CartSummary {
            total_price,
            total_selected_count,
            has_items_in_cart: total_selected_count > 0,
            meets_delivery_threshold: total_price >= self.delivery.threshold,
            remaining_for_free_delivery: remaining_for_free_delivery(
                self.delivery.threshold,
                total_price,
            ),
            delivery: self.delivery,
        }
    }
}
