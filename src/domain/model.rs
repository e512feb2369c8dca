use crate::utils::error::Result;
use crate::utils::validation::{validate_identifier, validate_path, Validate};
use std::path::{Path, PathBuf};

pub const INITIAL_STATE_BINDING: &str = "initialState";
pub const ROOT_REDUCER_BINDING: &str = "rootReducer";
pub const DEFAULT_INITIAL_VALUE: &str = "{}";

/// The two files every patch touches, relative to the JS root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFile {
    InitialState,
    RootReducer,
}

impl TargetFile {
    pub fn relative_path(self) -> &'static str {
        match self {
            TargetFile::InitialState => "stores/initialState.js",
            TargetFile::RootReducer => "reducers/index.js",
        }
    }

    pub fn resolve(self, root: &Path) -> PathBuf {
        root.join(self.relative_path())
    }
}

/// Everything the patcher needs: where the files live, the registration key
/// and the source text of the new entry's initial value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRequest {
    pub root: PathBuf,
    pub key: String,
    pub initial: String,
}

impl PatchRequest {
    pub fn new(root: impl Into<PathBuf>, key: impl Into<String>, initial: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            key: key.into(),
            initial: initial.into(),
        }
    }

    /// Builds a request from a singular model name, e.g. `User` registers `users`.
    pub fn for_model(root: impl Into<PathBuf>, model_name: &str, initial: impl Into<String>) -> Self {
        Self::new(root, derive_key(model_name), initial)
    }
}

impl Validate for PatchRequest {
    fn validate(&self) -> Result<()> {
        validate_identifier("key", &self.key)?;
        validate_path("root", &self.root.to_string_lossy())?;
        Ok(())
    }
}

/// Regenerated text for both files; nothing is produced unless both succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutput {
    pub initial_state: String,
    pub root_reducer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub key: String,
    pub written: Vec<PathBuf>,
}

/// Lower-cases the first character and pluralizes with a trailing `s`.
pub fn derive_key(model_name: &str) -> String {
    let trimmed = model_name.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => format!("{}{}s", first.to_lowercase(), chars.as_str()),
        None => String::new(),
    }
}
