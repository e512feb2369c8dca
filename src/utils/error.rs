use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax error in {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("Could not find a top-level binding called `{binding}`")]
    NotFound { binding: String },

    #[error("Binding `{binding}` has an unexpected shape: {message}")]
    Shape { binding: String, message: String },

    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<PatchError>,
    },

    #[error("Formatting {} failed: {message}", path.display())]
    Format { path: PathBuf, message: String },

    #[error("Code generation failed: {0}")]
    Codegen(#[from] std::io::Error),

    #[error("Invalid value for {field}: `{value}` ({reason})")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// The error taxonomy callers branch on, independent of file context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileAccess,
    Parse,
    NotFound,
    Shape,
    Format,
    Internal,
    InvalidInput,
}

impl PatchError {
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        PatchError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Strips `InFile` context wrappers.
    pub fn root_cause(&self) -> &PatchError {
        match self {
            PatchError::InFile { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PatchError::InFile { source, .. } => source.kind(),
            PatchError::FileAccess { .. } => ErrorKind::FileAccess,
            PatchError::Parse { .. } => ErrorKind::Parse,
            PatchError::NotFound { .. } => ErrorKind::NotFound,
            PatchError::Shape { .. } => ErrorKind::Shape,
            PatchError::Format { .. } => ErrorKind::Format,
            PatchError::Codegen(_) => ErrorKind::Internal,
            PatchError::Validation { .. } | PatchError::Config { .. } => ErrorKind::InvalidInput,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::FileAccess => {
                "Check that --root points at the JS root containing stores/ and reducers/"
            }
            ErrorKind::Parse => "Fix the syntax error, or pass a valid expression to --initial",
            ErrorKind::NotFound => {
                "Declare `const initialState = {...}` and `const rootReducer = combineReducers({...})` at module top level"
            }
            ErrorKind::Shape => "Pass an object literal as the first argument of combineReducers",
            ErrorKind::Format => "Check the [format] command in the config file",
            ErrorKind::Internal => "This is a bug, please report it",
            ErrorKind::InvalidInput => "Check the command line arguments and config file",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidInput => 2,
            ErrorKind::Internal => 3,
            _ => 1,
        }
    }

    /// Failure report shown to the user: the error followed by its suggestion.
    pub fn user_report(&self) -> String {
        format!("❌ {}\n💡 {}", self, self.recovery_suggestion())
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_sees_through_file_context() {
        let err = PatchError::NotFound {
            binding: "initialState".to_string(),
        }
        .in_file("stores/initialState.js");

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(matches!(
            err.root_cause(),
            PatchError::NotFound { binding } if binding == "initialState"
        ));
        assert_eq!(
            err.to_string(),
            "stores/initialState.js: Could not find a top-level binding called `initialState`"
        );
    }

    #[test]
    fn test_exit_codes() {
        let invalid = PatchError::Config {
            message: "bad".to_string(),
        };
        assert_eq!(invalid.exit_code(), 2);

        let shape = PatchError::Shape {
            binding: "rootReducer".to_string(),
            message: "spread".to_string(),
        };
        assert_eq!(shape.exit_code(), 1);
    }

    #[test]
    fn test_user_report_states_error_once() {
        let err = PatchError::NotFound {
            binding: "rootReducer".to_string(),
        }
        .in_file("reducers/index.js");

        let report = err.user_report();

        assert_eq!(report.matches(err.to_string().as_str()).count(), 1);
        assert_eq!(report.lines().count(), 2);
        assert!(report.ends_with(err.recovery_suggestion()));
    }
}
