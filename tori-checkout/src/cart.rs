use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cart line item. `base_price` is the platform's own price for the
/// product; `unit_price` is what totals use. Overrides write
/// `unit_price` only, and every recalculation pass starts from
/// `base_price` again, so an override never outlives its validity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i64,
    pub quantity: u32,
    pub base_price: f64,
    pub unit_price: f64,
}

impl CartItem {
    pub fn new(product_id: i64, quantity: u32, base_price: f64) -> Self {
        Self {
            product_id,
            quantity,
            base_price,
            unit_price: base_price,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// The customer's in-memory cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Remove the first line item for `product_id`, returning it.
    pub fn remove_item(&mut self, product_id: i64) -> Option<CartItem> {
        let pos = self.items.iter().position(|i| i.product_id == product_id)?;
        Some(self.items.remove(pos))
    }

    pub fn empty(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: i64) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|i| i.line_total()).sum()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
