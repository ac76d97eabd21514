//! Restaurant menu proxy: fetch the upstream document, then flatten it

pub(crate) mod extractor;
pub(crate) mod upstream;
