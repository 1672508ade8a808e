//! Barrel files re-exporting the declarations of each schema file.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use eyre::{Context, Result};
use indexmap::IndexSet;
use regex::Regex;
use schemagen_core::{File, builder::CodeBuilder, is_flattened_name, is_primary_name};
use tracing::{debug, warn};

use crate::paths::{DETAILS_FILE, INDEX_FILE, input_relative, module_specifier};

/// Header comment of every barrel file.
pub const BARREL_HEADER: &str = "// THIS FILE IS AUTO-GENERATED. DO NOT EDIT.";

static EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+(?:const|type|interface)\s+([A-Za-z0-9_]+)\s*(?:=|\{)")
        .expect("export pattern is valid")
});

/// The two barrels written for every schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrelKind {
    /// `index.ts`: declarations of the source file itself.
    Index,
    /// `details.ts`: declarations synthesized from property literals.
    Details,
}

impl BarrelKind {
    pub const ALL: [BarrelKind; 2] = [BarrelKind::Index, BarrelKind::Details];

    pub fn file_name(&self) -> &'static str {
        match self {
            BarrelKind::Index => INDEX_FILE,
            BarrelKind::Details => DETAILS_FILE,
        }
    }

    /// Whether the exported `name` belongs in this barrel.
    pub fn includes(&self, name: &str) -> bool {
        match self {
            BarrelKind::Index => is_primary_name(name),
            BarrelKind::Details => is_flattened_name(name),
        }
    }
}

/// Outcome of [`generate_barrels`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarrelSummary {
    /// Barrel files written (or already up to date).
    pub written: Vec<PathBuf>,
    /// Warnings for inputs whose schema file was missing.
    pub skipped: Vec<String>,
}

/// Exported `const`, `type` and `interface` names in order of first
/// appearance.
pub fn extract_exports(content: &str) -> IndexSet<String> {
    EXPORT_RE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Barrel text re-exporting `names` from `specifier`.
pub fn render_barrel<'a>(names: impl IntoIterator<Item = &'a str>, specifier: &str) -> String {
    CodeBuilder::barrel()
        .line(BARREL_HEADER)
        .blank()
        .block_with_close("export {", &format!("}} from \"{}\";", specifier), |b| {
            b.each(names, |b, name| b.line(&format!("{},", name)))
        })
        .blank()
        .build()
}

/// Write `index.ts`/`details.ts` for the schema file of every input.
///
/// The schema file of `<input_dir>/a/user.ts` is `<schema_dir>/a/user.ts`;
/// its barrels go to `<base_dir>/user/`. A barrel with no names is not
/// written.
pub fn generate_barrels(
    base_dir: &Path,
    schema_dir: &Path,
    input_dir: &Path,
    inputs: &[PathBuf],
) -> Result<BarrelSummary> {
    let mut summary = BarrelSummary::default();

    for input in inputs {
        let generated = schema_dir.join(input_relative(input, input_dir));

        if !generated.is_file() {
            let message = format!(
                "generated file '{}' not found, skipping barrels for '{}'",
                generated.display(),
                input.display()
            );
            warn!("{}", message);
            summary.skipped.push(message);
            continue;
        }

        let content = std::fs::read_to_string(&generated)
            .wrap_err_with(|| format!("failed to read '{}'", generated.display()))?;
        let exports = extract_exports(&content);

        let Some(stem) = input.file_stem() else {
            continue;
        };
        let barrel_dir = base_dir.join(stem);
        let specifier = module_specifier(&barrel_dir, &generated);

        for kind in BarrelKind::ALL {
            let names: Vec<&str> = exports
                .iter()
                .map(String::as_str)
                .filter(|name| kind.includes(name))
                .collect();
            if names.is_empty() {
                continue;
            }

            let path = barrel_dir.join(kind.file_name());
            debug!(path = %path.display(), exports = names.len(), "writing barrel");
            File::new(&path, render_barrel(names, &specifier)).write()?;
            summary.written.push(path);
        }
    }

    Ok(summary)
}
