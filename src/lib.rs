pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    formatter::{CommandFormatter, PassthroughFormatter},
    storage::LocalStorage,
};
pub use config::TomlConfig;
pub use core::{engine::PatchEngine, patcher::patch};
pub use domain::model::{derive_key, PatchOutput, PatchReport, PatchRequest};
pub use utils::error::{ErrorKind, PatchError, Result};
