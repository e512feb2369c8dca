use crate::config::toml_config::TomlConfig;
use crate::domain::model::{PatchRequest, DEFAULT_INITIAL_VALUE};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_ROOT: &str = "./resources/js/";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "state-patcher")]
#[command(about = "Register a new model in initialState and the root reducer")]
pub struct CliConfig {
    /// Singular model name, e.g. `user` (registered as `users`)
    #[arg(short, long)]
    pub name: String,

    /// Initial state expression for the model [default: {}]
    #[arg(short, long)]
    pub initial: Option<String>,

    /// JS root containing stores/ and reducers/ [default: ./resources/js/]
    #[arg(short, long)]
    pub root: Option<String>,

    /// TOML project file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the regenerated files instead of writing them")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Command line values win over the project file, which wins over defaults.
    pub fn to_request(&self, file: Option<&TomlConfig>) -> PatchRequest {
        let project = file.map(|f| &f.project);

        let root = self
            .root
            .clone()
            .or_else(|| project.and_then(|p| p.root.clone()))
            .unwrap_or_else(|| DEFAULT_ROOT.to_string());
        let initial = self
            .initial
            .clone()
            .or_else(|| project.and_then(|p| p.initial.clone()))
            .unwrap_or_else(|| DEFAULT_INITIAL_VALUE.to_string());

        PatchRequest::for_model(root, &self.name, initial)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        if let Some(root) = &self.root {
            validate_path("root", root)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::ProjectConfig;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("state-patcher").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--name", "user"]);
        let request = config.to_request(None);

        assert_eq!(request.key, "users");
        assert_eq!(request.root, PathBuf::from(DEFAULT_ROOT));
        assert_eq!(request.initial, "{}");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_short_flags() {
        let config = parse(&["-n", "Post", "-i", "[]", "-r", "./web/js", "-v"]);
        let request = config.to_request(None);

        assert_eq!(request.key, "posts");
        assert_eq!(request.initial, "[]");
        assert_eq!(request.root, PathBuf::from("./web/js"));
        assert!(config.verbose);
    }

    #[test]
    fn test_cli_values_override_project_file() {
        let file = TomlConfig {
            project: ProjectConfig {
                root: Some("./from/file".to_string()),
                initial: Some("null".to_string()),
            },
            format: None,
        };

        let request = parse(&["-n", "tag"]).to_request(Some(&file));
        assert_eq!(request.root, PathBuf::from("./from/file"));
        assert_eq!(request.initial, "null");

        let request = parse(&["-n", "tag", "-r", "./cli"]).to_request(Some(&file));
        assert_eq!(request.root, PathBuf::from("./cli"));
        assert_eq!(request.initial, "null");
    }

    #[test]
    fn test_name_is_required() {
        assert!(CliConfig::try_parse_from(["state-patcher"]).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(parse(&["-n", "user"]).validate().is_ok());
        assert!(parse(&["-n", " "]).validate().is_err());
        assert!(parse(&["-n", "user", "-r", ""]).validate().is_err());
    }
}
