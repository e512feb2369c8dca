use crate::core::patcher::patch;
use crate::domain::model::{PatchOutput, PatchReport, PatchRequest, TargetFile};
use crate::domain::ports::{Formatter, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Gather-then-commit driver: both files are regenerated and formatted
/// before either write is issued.
pub struct PatchEngine<S: Storage, F: Formatter> {
    storage: S,
    formatter: F,
}

impl<S: Storage, F: Formatter> PatchEngine<S, F> {
    pub fn new(storage: S, formatter: F) -> Self {
        Self { storage, formatter }
    }

    /// Produces the formatted text for both files without writing anything.
    pub async fn plan(&self, request: &PatchRequest) -> Result<PatchOutput> {
        request.validate()?;
        tracing::debug!(root = %request.root.display(), key = %request.key, "planning patch");

        let output = patch(&self.storage, &request.root, &request.key, &request.initial).await?;

        let initial_state_path = TargetFile::InitialState.resolve(&request.root);
        let root_reducer_path = TargetFile::RootReducer.resolve(&request.root);
        let (initial_state, root_reducer) = tokio::try_join!(
            self.formatter.format(&initial_state_path, output.initial_state),
            self.formatter.format(&root_reducer_path, output.root_reducer),
        )?;

        Ok(PatchOutput {
            initial_state,
            root_reducer,
        })
    }

    /// Plans the patch, then writes both files concurrently.
    ///
    /// The pair is not written atomically: a crash between the two writes can
    /// leave one file updated and the other untouched.
    pub async fn run(&self, request: &PatchRequest) -> Result<PatchReport> {
        let output = self.plan(request).await?;

        let initial_state_path = TargetFile::InitialState.resolve(&request.root);
        let root_reducer_path = TargetFile::RootReducer.resolve(&request.root);
        tokio::try_join!(
            self.storage.write_file(&initial_state_path, &output.initial_state),
            self.storage.write_file(&root_reducer_path, &output.root_reducer),
        )?;

        tracing::info!("Updated {}", initial_state_path.display());
        tracing::info!("Updated {}", root_reducer_path.display());

        Ok(PatchReport {
            key: request.key.clone(),
            written: vec![initial_state_path, root_reducer_path],
        })
    }
}
