pub mod identifiers;
pub(crate) mod operations;
