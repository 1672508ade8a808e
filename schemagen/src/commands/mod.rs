mod generate;

use clap::{ArgAction, Parser};
use eyre::Result;
use generate::GenerateCommand;
use miette::{Diagnostic, GraphicalReportHandler};
use schemagen_codegen::GeneratorError;

/// Extension trait for exiting on config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for schemagen_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for Result<T> {
    /// Source-level generator errors are rendered as diagnostics; anything
    /// else goes through the installed eyre handler.
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(err) => {
                match err.downcast_ref::<GeneratorError>() {
                    Some(diagnostic) => {
                        let mut rendered = String::new();
                        let handler = GraphicalReportHandler::new();
                        match handler.render_report(&mut rendered, diagnostic as &dyn Diagnostic) {
                            Ok(()) => eprintln!("Error: {}\n\n{}", err, rendered),
                            Err(_) => eprintln!("Error: {:?}", err),
                        }
                    }
                    None => eprintln!("Error: {:?}", err),
                }
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "schemagen")]
#[command(version)]
#[command(about = "Generate validator schemas from TypeScript interfaces")]
pub(crate) struct Cli {
    #[command(flatten)]
    generate: GenerateCommand,

    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        self.generate.run()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "schemagen",
            "Zod",
            "-i",
            "models",
            "--no-clean",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.generate.target, Some(schemagen_core::Target::Zod));
        assert!(cli.generate.no_clean);
        assert!(!cli.generate.no_fix_imports);
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        assert!(Cli::try_parse_from(["schemagen", "arktype"]).is_err());
    }
}
