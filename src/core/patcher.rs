//! The two patch pipelines and the library entry point [`patch`].
//!
//! Each pipeline runs Read → Parsed → Located → Mutated → Generated and stops
//! at the first failure. Reads are the only suspension points; all tree work
//! is synchronous.

use crate::core::parser::{parse_module, SourceModule};
use crate::core::{generator, locator, mutator};
use crate::domain::model::{
    PatchOutput, TargetFile, INITIAL_STATE_BINDING, ROOT_REDUCER_BINDING,
};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Appends `key: <initial>` to the `initialState` object in `source`.
pub fn patch_initial_state(path: &Path, source: &str, key: &str, initial: &str) -> Result<String> {
    let label = path.display().to_string();

    let mut module = parse_module(&label, source)?;
    tracing::debug!(file = %label, "parsed");

    let SourceModule { cm, ast } = &mut module;
    let init = locator::find_named_variable_initializer(ast, INITIAL_STATE_BINDING)?;
    let object = locator::expect_object_literal(init, INITIAL_STATE_BINDING)?;
    tracing::debug!(file = %label, properties = object.props.len(), "located");

    mutator::append_property(cm, object, key, initial)?;
    tracing::debug!(file = %label, key, "mutated");

    let text = generator::generate(&module)?;
    tracing::debug!(file = %label, bytes = text.len(), "generated");
    Ok(text)
}

/// Imports `./<key>` after the existing imports and registers `key` in the
/// object passed to the `rootReducer` aggregation call.
pub fn patch_root_reducer(path: &Path, source: &str, key: &str) -> Result<String> {
    let label = path.display().to_string();

    let mut module = parse_module(&label, source)?;
    tracing::debug!(file = %label, "parsed");

    let index = locator::find_import_insertion_index(&module.ast);
    mutator::insert_import(&mut module.ast, index, key, &format!("./{key}"))?;

    let object = locator::find_aggregation_object(&mut module.ast, ROOT_REDUCER_BINDING)?;
    tracing::debug!(file = %label, import_index = index, "located");

    mutator::append_shorthand_property(object, key)?;
    tracing::debug!(file = %label, key, "mutated");

    let text = generator::generate(&module)?;
    tracing::debug!(file = %label, bytes = text.len(), "generated");
    Ok(text)
}

pub async fn update_initial_state<S: Storage>(
    storage: &S,
    root: &Path,
    key: &str,
    initial: &str,
) -> Result<String> {
    let path = TargetFile::InitialState.resolve(root);
    let source = storage.read_file(&path).await?;
    tracing::debug!(file = %path.display(), "read");

    patch_initial_state(&path, &source, key, initial).map_err(|e| e.in_file(&path))
}

pub async fn update_root_reducer<S: Storage>(storage: &S, root: &Path, key: &str) -> Result<String> {
    let path = TargetFile::RootReducer.resolve(root);
    let source = storage.read_file(&path).await?;
    tracing::debug!(file = %path.display(), "read");

    patch_root_reducer(&path, &source, key).map_err(|e| e.in_file(&path))
}

/// Runs both pipelines concurrently. Text for both files is returned only
/// when both succeed; nothing is written here.
pub async fn patch<S: Storage>(storage: &S, root: &Path, key: &str, initial: &str) -> Result<PatchOutput> {
    let (initial_state, root_reducer) = tokio::try_join!(
        update_initial_state(storage, root, key, initial),
        update_root_reducer(storage, root, key),
    )?;

    Ok(PatchOutput {
        initial_state,
        root_reducer,
    })
}
