//! Generate operation - one task from inputs to barrels.

use std::path::{Path, PathBuf};

use eyre::Result;
use schemagen_codegen::{GenerationOptions, run_generation};
use schemagen_config::Task;
use schemagen_core::WriteResult;

use crate::reports::{GenerateReport, ImportChanges, SchemaFile};

/// Execute one generation task.
///
/// Paths in the report are shown relative to `cwd` where possible.
pub fn generate(task: &Task, cwd: &Path) -> Result<GenerateReport> {
    let options = GenerationOptions {
        target: task.target,
        input_dir: task.input.clone(),
        output_dir: task.output.clone(),
        clean: task.clean,
        fix_imports: task.fix_imports,
    };
    let summary = run_generation(&options)?;

    let display = |path: &Path| -> String { relative_to(path, cwd).display().to_string() };

    Ok(GenerateReport {
        target: summary.target,
        input_dir: display(&task.input),
        output_dir: display(&summary.base_dir),
        schemas: summary
            .files
            .iter()
            .map(|file| SchemaFile {
                path: display(&file.output),
                changed: file.result == WriteResult::Written,
            })
            .collect(),
        barrels: summary.barrels.written.iter().map(|p| display(p)).collect(),
        imports: summary.imports.map(|imports| ImportChanges {
            scanned: imports.scanned,
            fixed: imports.fixed.len(),
        }),
        warnings: summary.warnings,
    })
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use schemagen_core::Target;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_generate_report() {
        let temp = TempDir::new().unwrap();
        let cwd = temp.path();
        fs::create_dir_all(cwd.join("src/types")).unwrap();
        fs::write(
            cwd.join("src/types/user.ts"),
            "export interface User {\n  address: { city: string };\n}\n",
        )
        .unwrap();

        let task = Task {
            target: Target::Zod,
            input: cwd.join("src/types"),
            output: cwd.join("src/generated"),
            clean: true,
            fix_imports: true,
        };
        let report = generate(&task, cwd).unwrap();

        assert_eq!(report.output_dir, "src/generated/zod");
        assert_eq!(report.schemas.len(), 1);
        assert_eq!(report.schemas[0].path, "src/generated/zod/types/user.ts");
        assert!(report.schemas[0].changed);
        assert_eq!(
            report.barrels,
            ["src/generated/zod/user/index.ts", "src/generated/zod/user/details.ts"]
        );
        let imports = report.imports.unwrap();
        assert_eq!((imports.scanned, imports.fixed), (3, 2));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(
            relative_to(Path::new("/work/src/generated"), Path::new("/work")),
            PathBuf::from("src/generated")
        );
        assert_eq!(
            relative_to(Path::new("/elsewhere/out"), Path::new("/work")),
            PathBuf::from("/elsewhere/out")
        );
    }
}
