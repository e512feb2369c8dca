use crate::domain::ports::Formatter;
use crate::utils::error::{PatchError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Leaves the generated style alone apart from a single trailing newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughFormatter;

#[async_trait]
impl Formatter for PassthroughFormatter {
    async fn format(&self, _path: &Path, text: String) -> Result<String> {
        Ok(format!("{}\n", text.trim_end()))
    }
}

/// Pipes text through an external formatter such as `prettier`.
///
/// `{file}` in any argument is replaced with the target path so the tool can
/// pick up project-level style configuration.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn failure(&self, path: &Path, message: String) -> PatchError {
        PatchError::Format {
            path: path.to_path_buf(),
            message: format!("`{}`: {}", self.program, message),
        }
    }
}

#[async_trait]
impl Formatter for CommandFormatter {
    async fn format(&self, path: &Path, text: String) -> Result<String> {
        let file = path.display().to_string();
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| arg.replace("{file}", &file))
            .collect();

        tracing::debug!(program = %self.program, ?args, "running formatter");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.failure(path, format!("failed to start: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.failure(path, "stdin unavailable".to_string()))?;
        stdin
            .write_all(text.as_bytes())
            .await
            .map_err(|e| self.failure(path, format!("failed to write input: {}", e)))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| self.failure(path, e.to_string()))?;

        if !output.status.success() {
            return Err(self.failure(
                path,
                format!(
                    "exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| self.failure(path, format!("produced invalid UTF-8: {}", e)))
    }
}
