use crate::domain::ports::Storage;
use crate::utils::error::{PatchError, Result};
use std::path::{Path, PathBuf};

/// Filesystem storage. Relative paths resolve against `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &Path) -> Result<String> {
        let full_path = self.base_path.join(path);
        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|source| PatchError::FileAccess {
                path: full_path,
                source,
            })
    }

    async fn write_file(&self, path: &Path, data: &str) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| PatchError::FileAccess {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&full_path, data)
            .await
            .map_err(|source| PatchError::FileAccess {
                path: full_path,
                source,
            })
    }
}
