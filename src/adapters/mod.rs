// Adapters layer: concrete implementations of the domain ports.

pub mod formatter;
pub mod storage;
