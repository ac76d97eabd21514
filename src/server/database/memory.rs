use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::Mutex;
use crate::server::database::store::{parse_order_id, OrderStore, StoreError};
use crate::server::model::item::FoodItem;
use crate::server::model::order::{NewOrder, StoredOrder};
use crate::server::util::time;

struct Document {
    foods: Vec<FoodItem>,
    total_price: f64,
    created_at: DateTime<Utc>,
}

/// In-process order store, for development and tests
#[derive(Default)]
pub(crate) struct MemoryOrderStore {
    last_id: AtomicI64,
    documents: Mutex<HashMap<i64, Document>>,
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: &NewOrder) -> Result<String, StoreError> {
        let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.documents.lock().await.insert(id, Document {
            foods: order.foods().to_vec(),
            total_price: order.total_price(),
            created_at: time::helper::get_utc_now(),
        });
        Ok(id.to_string())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredOrder>, StoreError> {
        let id = parse_order_id(id)?;
        Ok(self.documents.lock().await.get(&id).map(|doc| StoredOrder {
            id: id.to_string(),
            foods: doc.foods.clone(),
            total_price: doc.total_price,
            created_at: doc.created_at,
        }))
    }
}
