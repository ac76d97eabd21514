use crate::server::database::connection::Connection;
use log::{error, info};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time;

pub(crate) struct CommonPool<C> {
    /// pool name
    name: String,
    /// idle connections in the pool, accessed in a FIFO manner
    connections: Mutex<VecDeque<C>>,
    /// one permit per idle connection
    available: Semaphore,
}

/// Lets a pool user tell a dead client from one still able to serve queries
pub(crate) trait Liveness {
    fn is_closed(&self) -> bool;
}

/// A cheaply cloneable handle to a connection pool
pub(crate) struct Pool<C>(Arc<CommonPool<C>>);

impl<C> Clone for Pool<C> {
    fn clone(&self) -> Pool<C> {
        Pool(self.0.clone())
    }
}

impl<C: Send + 'static> Pool<C> {
    pub const DEFAULT_SIZE: usize = 10;

    /// create an empty pool, fill it with [`Pool::add`]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(CommonPool {
            name: name.into(),
            connections: Mutex::new(VecDeque::with_capacity(Self::DEFAULT_SIZE)),
            available: Semaphore::new(0),
        }))
    }

    fn connections(&self) -> MutexGuard<'_, VecDeque<C>> {
        self.0.connections.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, client: C) {
        self.connections().push_back(client);
        self.0.available.add_permits(1);
    }

    /// acquire a connection with specified timeout, bail out if timeout exceeds.
    pub async fn acquire(&self, timeout: Duration) -> Option<Connection<C>> {
        match time::timeout(timeout, self.0.available.acquire()).await {
            Ok(Ok(permit)) => {
                // the permit is handed back by `release`
                permit.forget();
                self.connections()
                    .pop_front()
                    .map(|client| Connection::new(client, self.clone()))
            }
            Ok(Err(_)) => {
                error!("pool {} is closed", self.0.name);
                None
            }
            Err(_) => {
                error!(
                    "timed out to acquire a new connection from pool {} after {} millisecond",
                    self.0.name,
                    timeout.as_millis()
                );
                None
            }
        }
    }

    pub fn release(&self, client: C) {
        if self.0.available.is_closed() {
            // closed pools drop returned clients
            return;
        }
        self.add(client);
    }

    /// stop handing out connections and drop the idle ones
    pub fn close(&self) {
        self.0.available.close();
        let drained = self.connections().drain(..).count();
        info!("pool {} closed, dropped {} idle connections", self.0.name, drained);
    }

    pub fn idle(&self) -> usize {
        self.connections().len()
    }
}
