pub(crate) mod config;
pub(crate) mod item;
pub(crate) mod order;
pub(crate) mod restaurant;
