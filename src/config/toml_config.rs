use crate::adapters::formatter::CommandFormatter;
use crate::utils::error::{PatchError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional project file, e.g. `state-patcher.toml`:
///
/// ```toml
/// [project]
/// root = "./resources/js/"
/// initial = "{}"
///
/// [format]
/// command = "npx"
/// args = ["prettier", "--stdin-filepath", "{file}"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    pub format: Option<FormatConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub root: Option<String>,
    pub initial: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl FormatConfig {
    pub fn formatter(&self) -> CommandFormatter {
        CommandFormatter::new(self.command.clone(), self.args.clone())
    }
}

impl TomlConfig {
    /// Loads and validates a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|source| PatchError::FileAccess {
                path: path.as_ref().to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    /// Parses config text, expanding `${VAR}` references first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let config: Self = toml::from_str(&processed_content).map_err(|e| PatchError::Config {
            message: format!("TOML parsing error: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(root) = &self.project.root {
            validate_path("project.root", root)?;
        }
        if let Some(format) = &self.format {
            validate_non_empty_string("format.command", &format.command)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
            [project]
            root = "./resources/js/"
            initial = "[]"

            [format]
            command = "npx"
            args = ["prettier", "--stdin-filepath", "{file}"]
            "#,
        )
        .unwrap();

        assert_eq!(config.project.root.as_deref(), Some("./resources/js/"));
        assert_eq!(config.project.initial.as_deref(), Some("[]"));
        let format = config.format.unwrap();
        assert_eq!(format.command, "npx");
        assert_eq!(format.args.len(), 3);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.project.root.is_none());
        assert!(config.format.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STATE_PATCHER_TEST_ROOT", "/tmp/project/js");
        let config = TomlConfig::from_toml_str(
            r#"
            [project]
            root = "${STATE_PATCHER_TEST_ROOT}"
            "#,
        )
        .unwrap();
        assert_eq!(config.project.root.as_deref(), Some("/tmp/project/js"));
    }

    #[test]
    fn test_unset_env_var_is_left_alone() {
        let config = TomlConfig::from_toml_str(
            r#"
            [project]
            initial = "${STATE_PATCHER_TEST_UNSET_VARIABLE}"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.project.initial.as_deref(),
            Some("${STATE_PATCHER_TEST_UNSET_VARIABLE}")
        );
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[project\nroot = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_empty_format_command_is_rejected() {
        let err = TomlConfig::from_toml_str("[format]\ncommand = \"  \"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
