use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /restaurant-menu/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RestaurantQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub restaurant_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RestaurantMenuResponse {
    pub restaurant_menu: Vec<Vec<Value>>,
    pub restaurant_info: Option<Value>,
    pub offers: Vec<Value>,
}
