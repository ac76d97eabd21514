use anyhow::{Context, Error};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_postgres::types::{Json, ToSql};
use tokio_postgres::Client;
use tokio_util::task::TaskTracker;
use crate::server::database::connection::Connection;
use crate::server::database::pool::{Liveness, Pool};
use crate::server::database::store::{parse_order_id, OrderStore, StoreError};
use crate::server::model::config::StoreConfig;
use crate::server::model::item::FoodItem;
use crate::server::model::order::{NewOrder, StoredOrder};
use crate::server::util::time;

/// Orders kept in the `placed_orders` table, `foods` as a JSONB document
pub(crate) struct PgOrderStore {
    pool: Pool<Client>,
    conn_str: String,
    acquire_timeout: Duration,
    /// connection driver tasks, awaited on close
    tracker: TaskTracker,
}

pub(crate) mod connect_util {
    use anyhow::{Context, Error};
    use log::error;
    use tokio_postgres::{Client, NoTls};
    use tokio_util::task::TaskTracker;

    pub async fn connect(conn_str: &str, tracker: &TaskTracker) -> Result<Client, Error> {
        let (client, conn) = tokio_postgres::connect(conn_str, NoTls)
            .await
            .context("failed to create connection")?;
        tracker.spawn(async move {
            if let Err(e) = conn.await {
                error!("connection returned error and aborted, {}", e);
            }
        });
        Ok(client)
    }
}

impl Liveness for Client {
    fn is_closed(&self) -> bool {
        Client::is_closed(self)
    }
}

/// Acquire a pooled client, swapping a closed one for a fresh client from `reconnect`.
/// When reconnecting fails the closed client goes back to the pool and the next checkout retries.
async fn checkout<C, F, Fut>(
    pool: &Pool<C>,
    timeout: Duration,
    reconnect: F,
) -> Result<Connection<C>, StoreError>
where
    C: Liveness + Send + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<C, Error>>,
{
    let mut conn = pool.acquire(timeout).await.ok_or(StoreError::Busy)?;
    if !conn.is_closed() {
        return Ok(conn);
    }
    warn!("pooled connection is closed, reconnecting");
    match reconnect().await {
        Ok(client) => {
            *conn = client;
            Ok(conn)
        }
        Err(e) => {
            error!("reconnect failed, {:#}", e);
            Err(StoreError::Backend(format!("{e:#}")))
        }
    }
}

impl PgOrderStore {
    /// open `pool_size` connections up front, fails if any of them can't be opened
    pub async fn connect(config: &StoreConfig) -> Result<Self, Error> {
        let pool = Pool::new("orders");
        let tracker = TaskTracker::new();
        let mut set = JoinSet::new();
        for _ in 0..config.pool_size.get() {
            let conn_str = config.conn_str.clone();
            let tracker = tracker.clone();
            set.spawn(async move { connect_util::connect(&conn_str, &tracker).await });
        }
        while let Some(res) = set.join_next().await {
            let client = res.context("join_next failed when joining")??;
            info!("connection created");
            pool.add(client);
        }
        info!("order store ready with {} connections", pool.idle());
        Ok(Self {
            pool,
            conn_str: config.conn_str.clone(),
            acquire_timeout: config.acquire_timeout,
            tracker,
        })
    }

    async fn connection(&self) -> Result<Connection<Client>, StoreError> {
        checkout(&self.pool, self.acquire_timeout, || {
            connect_util::connect(&self.conn_str, &self.tracker)
        })
        .await
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert(&self, order: &NewOrder) -> Result<String, StoreError> {
        let conn = self.connection().await?;
        let foods = Json(order.foods());
        let total_price = order.total_price();
        let created_at = time::helper::get_utc_now();
        let params: &[&(dyn ToSql + Sync); 3] = &[&foods, &total_price, &created_at];
        let row = conn
            .query_one(
                r#"
                INSERT INTO placed_orders(foods, total_price, created_at)
                VALUES ($1, $2, $3)
                RETURNING id
            "#,
                params,
            )
            .await?;
        let id: i64 = row.try_get("id")?;
        Ok(id.to_string())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredOrder>, StoreError> {
        let id = parse_order_id(id)?;
        let conn = self.connection().await?;
        let maybe_row = conn
            .query_opt(
                "SELECT id, foods, total_price, created_at FROM placed_orders WHERE id = $1",
                &[&id],
            )
            .await?;
        let Some(row) = maybe_row else {
            return Ok(None);
        };
        let Json(foods): Json<Vec<FoodItem>> = row.try_get("foods")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        Ok(Some(StoredOrder {
            id: id.to_string(),
            foods,
            total_price: row.try_get("total_price")?,
            created_at,
        }))
    }

    async fn close(&self) {
        self.pool.close();
        self.tracker.close();
        self.tracker.wait().await;
        info!("all database connections closed");
    }
}
