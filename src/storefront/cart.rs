use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::MenuItem;

use super::notice::Notice;

/// Copy of a menu item taken when it is put in the cart.
///
/// Fields are read-only so a line keeps the name and price the customer
/// saw, whatever happens to the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemSnapshot {
    id: Uuid,
    name: String,
    description: Option<String>,
    #[schema(value_type = String, example = "12.99")]
    price: Decimal,
    image_url: Option<String>,
    category: Option<String>,
    is_available: bool,
}

impl MenuItemSnapshot {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }
}

impl From<&MenuItem> for MenuItemSnapshot {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            image_url: item.image_url.clone(),
            category: item.category.clone(),
            is_available: item.is_available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub item: MenuItemSnapshot,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.item.price() * Decimal::from(self.quantity)
    }
}

/// Largest quantity a line can hold; order item quantities are stored as
/// 32-bit signed integers.
pub const MAX_LINE_QUANTITY: u32 = i32::MAX as u32;

/// Sums line totals without rounding.
pub fn subtotal_of(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

/// Customer-side cart: one line per menu item, kept in the order items were first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, item_id: Uuid) -> Option<u32> {
        self.lines
            .iter()
            .find(|l| l.item.id() == item_id)
            .map(|l| l.quantity)
    }

    /// Adds one unit of `item`. Unavailable items are ignored and produce no notice.
    pub fn add_item(&mut self, item: &MenuItem) -> Option<Notice> {
        if !item.is_available {
            tracing::debug!(item_id = %item.id, "ignoring add of unavailable item");
            return None;
        }

        match self.lines.iter_mut().find(|l| l.item.id() == item.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
            }
            None => self.lines.push(CartLine {
                item: MenuItemSnapshot::from(item),
                quantity: 1,
            }),
        }

        Some(Notice::info(
            "Item added to cart!",
            format!("{} has been added.", item.name),
        ))
    }

    pub fn remove_item(&mut self, item_id: Uuid) {
        self.lines.retain(|l| l.item.id() != item_id);
    }

    /// Sets the quantity of an existing line. Zero or below removes the line,
    /// anything above [`MAX_LINE_QUANTITY`] is capped; unknown ids are ignored.
    pub fn set_quantity(&mut self, item_id: Uuid, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(item_id);
            return;
        }
        let quantity = u32::try_from(quantity)
            .unwrap_or(MAX_LINE_QUANTITY)
            .min(MAX_LINE_QUANTITY);
        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id() == item_id) {
            line.quantity = quantity;
        }
    }

    pub fn increment(&mut self, item_id: Uuid) {
        if let Some(current) = self.quantity_of(item_id) {
            self.set_quantity(item_id, i64::from(current) + 1);
        }
    }

    /// Decrementing a line at quantity 1 removes it.
    pub fn decrement(&mut self, item_id: Uuid) {
        if let Some(current) = self.quantity_of(item_id) {
            self.set_quantity(item_id, i64::from(current) - 1);
        }
    }

    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        subtotal_of(&self.lines)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Renders an amount for display, e.g. `$34.73`.
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}
