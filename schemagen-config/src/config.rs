//! Configuration schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root of a schemagen configuration file.
///
/// ```toml
/// input = "src/types"
/// output = "src/generated"
///
/// [[tasks]]
/// target = "zod"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default input directory for every task.
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Default output directory for every task.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Generation tasks, run in order.
    #[serde(default)]
    pub tasks: Vec<TaskConfig>,
}

/// One `[[tasks]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskConfig {
    /// Target dialect name, validated when the file is loaded.
    pub target: String,

    #[serde(default)]
    pub input: Option<PathBuf>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Remove the target's previous output first (default: true).
    #[serde(default)]
    pub clean: Option<bool>,

    /// Append `.js` to relative imports in the output (default: true).
    #[serde(default, alias = "fixImports")]
    pub fix_imports: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_toml() {
        let config: Config = toml::from_str(
            r#"
            output = "out"

            [[tasks]]
            target = "zod"
            input = "models"

            [[tasks]]
            target = "yup"
            clean = false
            fixImports = false
            "#,
        )
        .unwrap();

        assert_eq!(config.input, None);
        assert_eq!(config.output, Some(PathBuf::from("out")));
        assert_eq!(config.tasks.len(), 2);
        assert_eq!(config.tasks[0].input, Some(PathBuf::from("models")));
        assert_eq!(config.tasks[1].clean, Some(false));
        assert_eq!(config.tasks[1].fix_imports, Some(false));
    }

    #[test]
    fn test_deserialize_json() {
        let config: Config = serde_json::from_str(
            r#"{ "input": "src/models", "tasks": [{ "target": "effect", "fix_imports": true }] }"#,
        )
        .unwrap();

        assert_eq!(config.input, Some(PathBuf::from("src/models")));
        assert_eq!(config.tasks[0].target, "effect");
        assert_eq!(config.tasks[0].fix_imports, Some(true));
    }

    #[test]
    fn test_tasks_default_to_empty() {
        let config: Config = toml::from_str("input = \"a\"").unwrap();
        assert!(config.tasks.is_empty());
    }
}
