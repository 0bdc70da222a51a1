use super::{CartView, FooterView, ItemView};

/// Terminal projection of the cart. Keeps the last rendered line of every row
/// and the footer so the whole screen can be printed at any time.
#[derive(Clone, Debug, Default)]
pub struct TextView {
    rows: Vec<Option<String>>,
    footer: Vec<String>,
    bouncing: bool,
    repaints: usize,
}

impl TextView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, index: usize) -> Option<&str> {
        self.rows.get(index).and_then(|row| row.as_deref())
    }

    pub fn footer_lines(&self) -> &[String] {
        &self.footer
    }

    /// Number of row/footer renders received so far.
    pub fn repaints(&self) -> usize {
        self.repaints
    }

    pub fn screen(&self) -> String {
        let mut lines: Vec<String> =
            self.rows.iter().filter_map(|row| row.as_ref().cloned()).collect();
        if !self.footer.is_empty() {
            lines.push("-".repeat(48));
            lines.extend(self.footer.iter().cloned());
        }
        lines.join("\n")
    }
}

impl CartView for TextView {
    fn render_item(&mut self, index: usize, item: &ItemView) {
        if self.rows.len() <= index {
            self.rows.resize(index + 1, None);
        }

        let marker = if item.selected { "*" } else { " " };
        self.rows[index] = Some(format!(
            "[{marker}] #{index} {title} ${price} (Selling {sold}, Rate {rate}%) [-] {quantity} [+]",
            title = item.title,
            price = item.price,
            sold = item.sell_count,
            rate = item.favor_rate,
            quantity = item.quantity,
        ));
        self.repaints += 1;
    }

    fn render_footer(&mut self, footer: &FooterView) {
        let cart = if footer.cart_active {
            format!("Cart ({})", footer.badge_count)
        } else {
            "Cart (empty)".to_string()
        };
        let cart = if self.bouncing { format!("{cart} ~bounce~") } else { cart };
        let pay = if footer.pay_active {
            "Ready to pay".to_string()
        } else {
            footer.remaining_text.clone()
        };

        self.footer = vec![
            format!("{cart}  Total ${}", footer.total_price),
            format!("{}  |  {pay}", footer.delivery_fee_text),
        ];
        self.repaints += 1;
    }

    fn render_cart_bounce(&mut self, bouncing: bool) {
        self.bouncing = bouncing;
        if let Some(first) = self.footer.first_mut() {
            let stripped = first.replace(" ~bounce~", "");
            *first = if bouncing {
                match stripped.split_once("  Total") {
                    Some((cart, total)) => format!("{cart} ~bounce~  Total{total}"),
                    None => stripped,
                }
            } else {
                stripped
            };
        }
    }
}
