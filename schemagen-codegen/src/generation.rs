//! One generation run: a target, an input directory and an output directory.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use schemagen_ast::transform_source_text;
use schemagen_core::{Target, WriteResult};
use tracing::{debug, info, warn};

use crate::{
    GeneratorError,
    barrel::{BarrelSummary, generate_barrels},
    fixup::render_schema_file,
    generator::generator_for,
    imports::{ImportFixSummary, fix_imports},
    paths::{TYPES_DIR, input_relative, ts_files},
};

/// Options of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub target: Target,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Remove `<output_dir>/<target>` first.
    pub clean: bool,
    /// Append `.js` to relative imports afterwards.
    pub fix_imports: bool,
}

impl GenerationOptions {
    /// `<output_dir>/<target>`
    pub fn base_dir(&self) -> PathBuf {
        self.output_dir.join(self.target.as_str())
    }

    /// `<output_dir>/<target>/types`
    pub fn schema_dir(&self) -> PathBuf {
        self.base_dir().join(TYPES_DIR)
    }
}

/// A schema file produced from one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: WriteResult,
}

/// Outcome of [`run_generation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub target: Target,
    pub base_dir: PathBuf,
    pub files: Vec<GeneratedFile>,
    pub barrels: BarrelSummary,
    /// `None` when import fixing was disabled.
    pub imports: Option<ImportFixSummary>,
    /// The input directory held no `.ts` files.
    pub no_inputs: bool,
    pub warnings: Vec<String>,
}

impl GenerationSummary {
    fn new(options: &GenerationOptions) -> Self {
        Self {
            target: options.target,
            base_dir: options.base_dir(),
            files: Vec::new(),
            barrels: BarrelSummary::default(),
            imports: None,
            no_inputs: false,
            warnings: Vec::new(),
        }
    }
}

/// Flatten, generate, fix up and write every input, then write the barrels
/// and fix imports.
///
/// Any read, generation or write error aborts the run. Missing inputs and
/// missing schema files are reported as warnings.
pub fn run_generation(options: &GenerationOptions) -> Result<GenerationSummary> {
    let mut summary = GenerationSummary::new(options);
    let base_dir = options.base_dir();
    let schema_dir = options.schema_dir();

    if options.clean && base_dir.exists() {
        debug!(path = %base_dir.display(), "cleaning output");
        std::fs::remove_dir_all(&base_dir)
            .wrap_err_with(|| format!("failed to remove '{}'", base_dir.display()))?;
    }

    let inputs = ts_files(&options.input_dir)?;
    if inputs.is_empty() {
        let message = format!("no .ts files found in '{}'", options.input_dir.display());
        warn!("{}", message);
        summary.no_inputs = true;
        summary.warnings.push(message);
        return Ok(summary);
    }

    info!(dialect = %options.target, files = inputs.len(), "generating schemas");
    for input in &inputs {
        summary.files.push(generate_file(options, &schema_dir, input)?);
    }

    summary.barrels = generate_barrels(&base_dir, &schema_dir, &options.input_dir, &inputs)
        .wrap_err("failed to write barrel files")?;
    summary.warnings.extend(summary.barrels.skipped.iter().cloned());

    if options.fix_imports {
        summary.imports = Some(
            fix_imports(&base_dir)
                .wrap_err_with(|| format!("failed to fix imports in '{}'", base_dir.display()))?,
        );
    }

    Ok(summary)
}

fn generate_file(
    options: &GenerationOptions,
    schema_dir: &Path,
    input: &Path,
) -> Result<GeneratedFile> {
    let relative = input_relative(input, &options.input_dir);
    let output = schema_dir.join(&relative);
    let file_name = relative.to_string_lossy();
    debug!(input = %input.display(), output = %output.display(), "generating");

    let source = std::fs::read_to_string(input)
        .wrap_err_with(|| format!("failed to read '{}'", input.display()))?;

    let generated = transform_source_text(&source, &file_name)
        .map_err(GeneratorError::from)
        .and_then(|flattened| generator_for(options.target).generate(&flattened, &file_name))
        .wrap_err_with(|| {
            format!(
                "failed to generate {} schema for '{}'",
                options.target,
                input.display()
            )
        })?;

    let result = render_schema_file(options.target, &output, &generated).write()?;
    Ok(GeneratedFile {
        input: input.to_path_buf(),
        output,
        result,
    })
}
