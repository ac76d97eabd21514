use serde::{Deserialize, Serialize};

/// One line of an order, as submitted by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct FoodItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// unsigned, a negative quantity fails deserialization
    pub quantity: u32,
}

impl FoodItem {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
