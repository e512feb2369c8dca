pub mod engine;
pub mod generator;
pub mod locator;
pub mod mutator;
pub mod parser;
pub mod patcher;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{PatchOutput, PatchRequest};
pub use crate::domain::ports::{Formatter, Storage};
pub use crate::utils::error::Result;
