//! Wall clock for order timestamps, pinned to the unix epoch under test

use chrono::{DateTime, Utc};

pub(crate) mod helper {
    pub use super::get_utc_now;
}

#[cfg(not(test))]
pub fn get_utc_now() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(test)]
pub fn get_utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}
