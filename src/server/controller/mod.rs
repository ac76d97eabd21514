pub(crate) mod error;
pub(crate) mod menu;
pub(crate) mod order;
