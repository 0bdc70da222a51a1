pub mod text;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::pricing::{format_amount, CartSummary};
use crate::domain::item::Item;

pub use self::text::TextView;

/// Rendering capability the cart is projected through.
///
/// Implementations own no cart state; they receive fresh snapshots after every
/// mutation, one row at a time plus the shared footer.
pub trait CartView {
    fn render_item(&mut self, index: usize, item: &ItemView);
    fn render_footer(&mut self, footer: &FooterView);

    /// Cart icon bounce toggled by fly-to-cart completions.
    fn render_cart_bounce(&mut self, _bouncing: bool) {}
}

/// Everything a row needs to draw one catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub title: String,
    pub description: String,
    pub picture: String,
    pub price: String,
    pub sell_count: u64,
    pub favor_rate: String,
    pub quantity: u32,
    pub selected: bool,
}

impl ItemView {
    pub fn from_item(item: &Item) -> Self {
        let entry = item.entry();
        Self {
            title: entry.title.clone(),
            description: entry.description.clone(),
            picture: entry.picture.clone(),
            price: display_decimal(entry.price),
            sell_count: entry.sell_count,
            favor_rate: display_decimal(entry.favor_rate),
            quantity: item.quantity(),
            selected: item.is_selected(),
        }
    }
}

/// Footer projection. Both delivery texts are rebuilt on every update, so the
/// remaining-amount text is current even while the pay button is active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FooterView {
    pub total_price: String,
    pub delivery_fee_text: String,
    pub pay_active: bool,
    pub remaining_text: String,
    pub badge_count: u64,
    pub cart_active: bool,
}

impl FooterView {
    pub fn from_summary(summary: &CartSummary) -> Self {
        Self {
            total_price: format_amount(summary.total_price),
            delivery_fee_text: format!(
                "Delivery fee: ${}",
                display_decimal(summary.delivery.fee)
            ),
            pay_active: summary.meets_delivery_threshold,
            remaining_text: format!(
                "Still need ${} to deliver",
                display_decimal(summary.remaining_for_free_delivery)
            ),
            badge_count: summary.total_selected_count,
            cart_active: summary.has_items_in_cart,
        }
    }
}

fn display_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderCall {
    Item { index: usize, view: ItemView },
    Footer(FooterView),
    CartBounce(bool),
}

/// Keeps every render call in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingView {
    calls: Vec<RenderCall>,
}

impl RecordingView {
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn last_footer(&self) -> Option<&FooterView> {
        self.calls.iter().rev().find_map(|call| match call {
            RenderCall::Footer(footer) => Some(footer),
            _ => None,
        })
    }
}

impl CartView for RecordingView {
    fn render_item(&mut self, index: usize, item: &ItemView) {
        self.calls.push(RenderCall::Item { index, view: item.clone() });
    }

    fn render_footer(&mut self, footer: &FooterView) {
        self.calls.push(RenderCall::Footer(footer.clone()));
    }

    fn render_cart_bounce(&mut self, bouncing: bool) {
        self.calls.push(RenderCall::CartBounce(bouncing));
    }
}
