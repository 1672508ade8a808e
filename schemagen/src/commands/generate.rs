use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use schemagen_config::{Overrides, Task};
use schemagen_core::Target;
use tracing::debug;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Target dialect: typebox, zod, valibot, yup, effect, jsonschema or types.
    /// Without it, tasks are read from the config file
    pub target: Option<Target>,

    /// Input directory (defaults to src/types)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory (defaults to src/generated)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to the config file (defaults to searching upwards from the
    /// current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep existing output instead of removing it first
    #[arg(long)]
    pub no_clean: bool,

    /// Leave relative imports without a `.js` extension
    #[arg(long)]
    pub no_fix_imports: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let cwd = std::env::current_dir().wrap_err("failed to read the current directory")?;
        let overrides = self.overrides();

        let tasks = match self.target {
            Some(target) => vec![Task::from_target(target, &overrides, &cwd)],
            None => {
                let config = schemagen_config::load(self.config.as_deref(), &cwd).unwrap_or_exit();
                debug!(path = %config.path().display(), "using config");
                config.tasks(&overrides, &cwd).unwrap_or_exit()
            }
        };

        let mut out = TerminalOutput::new();
        for task in &tasks {
            let report = ops::generate(task, &cwd).unwrap_or_exit();
            report.render(&mut out);
        }
        Ok(())
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            input: self.input.clone(),
            output: self.output.clone(),
            clean: self.no_clean.then_some(false),
            fix_imports: self.no_fix_imports.then_some(false),
        }
    }
}
