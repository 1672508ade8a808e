//! Generate command report data structures.

use schemagen_core::Target;

use super::output::{Output, Report};

/// Report data from one generation task.
#[derive(Debug)]
pub struct GenerateReport {
    pub target: Target,

    /// Input directory as given to the task.
    pub input_dir: String,

    /// `<output>/<target>` directory.
    pub output_dir: String,

    /// Schema files, in input order.
    pub schemas: Vec<SchemaFile>,

    /// Barrel files written.
    pub barrels: Vec<String>,

    /// Import fixing result, if it ran.
    pub imports: Option<ImportChanges>,

    /// Soft warnings (no inputs, missing schema files).
    pub warnings: Vec<String>,
}

/// A generated schema file.
#[derive(Debug)]
pub struct SchemaFile {
    pub path: String,
    /// False when the file already had the generated content.
    pub changed: bool,
}

/// Import fixing counts.
#[derive(Debug)]
pub struct ImportChanges {
    pub scanned: usize,
    pub fixed: usize,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if self.schemas.is_empty() {
            return;
        }

        out.section(&format!("{} ({} files)", self.target, self.schemas.len()));
        for schema in &self.schemas {
            if schema.changed {
                out.added_item(&schema.path);
            } else {
                out.list_item(&format!("{} (unchanged)", schema.path));
            }
        }
        out.newline();

        out.key_value("Input", &self.input_dir);
        out.key_value("Generated", &self.output_dir);
        out.key_value("Barrels", &self.barrels.len().to_string());
        if let Some(imports) = &self.imports {
            out.key_value(
                "Fixed imports",
                &format!("{} of {} files", imports.fixed, imports.scanned),
            );
        }
        out.newline();
    }
}
