use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use crate::server::model::item::FoodItem;

/// Body of `POST /create_order/`. There is no total field, the server computes it.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateOrderRequest {
    pub foods: Vec<FoodItem>,
}

/// An order ready to be inserted, total already derived from its foods
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewOrder {
    foods: Vec<FoodItem>,
    total_price: f64,
}

#[derive(Debug, Display, Error, PartialEq)]
#[display("total price is not a finite number")]
pub(crate) struct NonFiniteTotal;

impl NewOrder {
    /// fails when the summed subtotals overflow, a total must stay a finite float
    pub fn new(foods: Vec<FoodItem>) -> Result<Self, NonFiniteTotal> {
        let total_price: f64 = foods.iter().map(FoodItem::subtotal).sum();
        if !total_price.is_finite() {
            return Err(NonFiniteTotal);
        }
        Ok(Self { foods, total_price })
    }

    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }
}

/// An order as read back from the store
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StoredOrder {
    pub id: String,
    pub foods: Vec<FoodItem>,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CreateOrderResponse {
    pub order_id: String,
    pub foods: Vec<FoodItem>,
    pub total_price: f64,
}

impl CreateOrderResponse {
    pub fn new(order_id: String, order: NewOrder) -> Self {
        Self {
            order_id,
            total_price: order.total_price,
            foods: order.foods,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GetOrderResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub foods: Vec<FoodItem>,
    pub total_price: f64,
    pub created_at: String,
}

impl From<StoredOrder> for GetOrderResponse {
    fn from(order: StoredOrder) -> Self {
        Self {
            id: order.id,
            foods: order.foods,
            total_price: order.total_price,
            created_at: order.created_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}
