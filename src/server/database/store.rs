use async_trait::async_trait;
use derive_more::{Display, Error};
use crate::server::model::order::{NewOrder, StoredOrder};

#[derive(Debug, Display, Error, PartialEq)]
pub(crate) enum StoreError {
    #[display("'{_0}' is not a valid order id")]
    InvalidId(#[error(not(source))] String),
    #[display("server is busy")]
    Busy,
    #[display("database error: {_0}")]
    Backend(#[error(not(source))] String),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(e: tokio_postgres::Error) -> Self {
        match e.as_db_error() {
            Some(db_error) => StoreError::Backend(db_error.message().to_string()),
            None => StoreError::Backend(e.to_string()),
        }
    }
}

/// Persistence for placed orders. Ids are generated by the store and handed out as strings.
#[async_trait]
pub(crate) trait OrderStore: Send + Sync {
    /// insert a new order document, returns its generated id
    async fn insert(&self, order: &NewOrder) -> Result<String, StoreError>;

    /// `Ok(None)` when the id is well formed but unknown
    async fn find_by_id(&self, id: &str) -> Result<Option<StoredOrder>, StoreError>;

    /// release held resources, called once at shutdown
    async fn close(&self) {}
}

/// Both stores use a 64 bit serial as their native id
pub(crate) fn parse_order_id(id: &str) -> Result<i64, StoreError> {
    id.parse().map_err(|_| StoreError::InvalidId(id.to_string()))
}
