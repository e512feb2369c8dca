use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// File access used by the patch pipelines.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Style normalization applied to generated text before it is written.
/// Implementations must not change the program's meaning.
#[async_trait]
pub trait Formatter: Send + Sync {
    async fn format(&self, path: &Path, text: String) -> Result<String>;
}
