//! Task resolution.
//!
//! Precedence for every setting: command line, then the task entry, then
//! the config root, then the built-in default.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use schemagen_core::Target;

use crate::{ConfigFile, Result, error::SourceContext};

/// Input directory used when nothing else is configured.
pub const DEFAULT_INPUT: &str = "src/types";

/// Output directory used when nothing else is configured.
pub const DEFAULT_OUTPUT: &str = "src/generated";

/// Settings given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub clean: Option<bool>,
    pub fix_imports: Option<bool>,
}

/// A fully resolved generation task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub target: Target,
    pub input: PathBuf,
    pub output: PathBuf,
    pub clean: bool,
    pub fix_imports: bool,
}

impl Task {
    /// A task for `target` given directly on the command line.
    ///
    /// Relative paths resolve against `cwd`.
    pub fn from_target(target: Target, overrides: &Overrides, cwd: &Path) -> Self {
        Self {
            target,
            input: cwd.join(overrides.input.as_deref().unwrap_or(Path::new(DEFAULT_INPUT))),
            output: cwd.join(overrides.output.as_deref().unwrap_or(Path::new(DEFAULT_OUTPUT))),
            clean: overrides.clean.unwrap_or(true),
            fix_imports: overrides.fix_imports.unwrap_or(true),
        }
    }
}

impl ConfigFile {
    /// Resolve every configured task.
    ///
    /// All paths, wherever they come from, resolve against `cwd`.
    pub fn tasks(&self, overrides: &Overrides, cwd: &Path) -> Result<Vec<Task>> {
        let config = self.config();

        config
            .tasks
            .iter()
            .map(|task| {
                let target = Target::from_str(&task.target).map_err(|e| {
                    SourceContext::new(self.content(), self.path().display().to_string())
                        .invalid_target(e)
                })?;

                let resolve = |cli: &Option<PathBuf>, own: &Option<PathBuf>, root: &Option<PathBuf>, default: &str| {
                    let path = cli
                        .as_deref()
                        .or(own.as_deref())
                        .or(root.as_deref())
                        .unwrap_or(Path::new(default));
                    cwd.join(path)
                };

                Ok(Task {
                    target,
                    input: resolve(&overrides.input, &task.input, &config.input, DEFAULT_INPUT),
                    output: resolve(&overrides.output, &task.output, &config.output, DEFAULT_OUTPUT),
                    clean: overrides.clean.or(task.clean).unwrap_or(true),
                    fix_imports: overrides.fix_imports.or(task.fix_imports).unwrap_or(true),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Format;

    fn config(content: &str) -> ConfigFile {
        ConfigFile::from_str_with_path(content, "/project/schemagen.toml", Format::Toml).unwrap()
    }

    #[test]
    fn test_from_target_defaults() {
        let task = Task::from_target(Target::Zod, &Overrides::default(), Path::new("/cwd"));
        assert_eq!(task.input, PathBuf::from("/cwd/src/types"));
        assert_eq!(task.output, PathBuf::from("/cwd/src/generated"));
        assert!(task.clean);
        assert!(task.fix_imports);
    }

    #[test]
    fn test_from_target_overrides() {
        let overrides = Overrides {
            input: Some("models".into()),
            output: Some("/abs/out".into()),
            clean: Some(false),
            fix_imports: None,
        };
        let task = Task::from_target(Target::Yup, &overrides, Path::new("/cwd"));
        assert_eq!(task.input, PathBuf::from("/cwd/models"));
        assert_eq!(task.output, PathBuf::from("/abs/out"));
        assert!(!task.clean);
    }

    #[test]
    fn test_precedence() {
        let file = config(
            r#"
            input = "root-in"
            output = "root-out"

            [[tasks]]
            target = "zod"
            input = "task-in"

            [[tasks]]
            target = "effect"
            fix_imports = false
            "#,
        );
        let cwd = Path::new("/project/sub");

        let tasks = file.tasks(&Overrides::default(), cwd).unwrap();
        assert_eq!(tasks[0].target, Target::Zod);
        assert_eq!(tasks[0].input, PathBuf::from("/project/sub/task-in"));
        assert_eq!(tasks[0].output, PathBuf::from("/project/sub/root-out"));
        assert_eq!(tasks[1].input, PathBuf::from("/project/sub/root-in"));
        assert!(!tasks[1].fix_imports);
        assert!(tasks[1].clean);

        let overrides = Overrides {
            output: Some("cli-out".into()),
            fix_imports: Some(true),
            ..Overrides::default()
        };
        let tasks = file.tasks(&overrides, cwd).unwrap();
        assert_eq!(tasks[0].output, PathBuf::from("/project/sub/cli-out"));
        assert_eq!(tasks[1].output, PathBuf::from("/project/sub/cli-out"));
        assert!(tasks[1].fix_imports);
    }

    #[test]
    fn test_paths_resolve_against_cwd_not_config_dir() {
        let file = config("output = \"out\"\n[[tasks]]\ntarget = \"typebox\"\n");
        let tasks = file.tasks(&Overrides::default(), Path::new("/project/packages/app")).unwrap();
        assert_eq!(tasks[0].input, PathBuf::from("/project/packages/app/src/types"));
        assert_eq!(tasks[0].output, PathBuf::from("/project/packages/app/out"));
    }

    #[test]
    fn test_absolute_config_paths_are_kept() {
        let file = config("[[tasks]]\ntarget = \"zod\"\ninput = \"/data/types\"\n");
        let tasks = file.tasks(&Overrides::default(), Path::new("/cwd")).unwrap();
        assert_eq!(tasks[0].input, PathBuf::from("/data/types"));
    }
}
