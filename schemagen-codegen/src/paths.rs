//! Directory layout of the generated output.
//!
//! For target `zod` and output `out`:
//!
//! ```text
//! out/zod/                  base directory, removed by `clean`
//! out/zod/types/a/user.ts   schema file mirroring `<input>/a/user.ts`
//! out/zod/user/index.ts     primary barrel
//! out/zod/user/details.ts   flattened-property barrel
//! ```

use std::path::{Component, Path, PathBuf};

use eyre::{Context, Result};

/// Schema files directory relative to the base directory.
pub const TYPES_DIR: &str = "types";

/// File extension of input and generated files.
pub const FILE_EXTENSION: &str = "ts";

/// Primary barrel file name.
pub const INDEX_FILE: &str = "index.ts";

/// Flattened-property barrel file name.
pub const DETAILS_FILE: &str = "details.ts";

/// Every `.ts` file below `dir`, in glob order. Directories whose name ends
/// in `.ts` are skipped.
pub fn ts_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/**/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        FILE_EXTENSION
    );
    let mut files = Vec::new();
    for entry in glob::glob(&pattern).wrap_err_with(|| format!("invalid pattern '{}'", pattern))? {
        let path = entry.wrap_err_with(|| format!("failed to read '{}'", dir.display()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Path of `input` relative to `input_dir`, falling back to its file name.
pub fn input_relative(input: &Path, input_dir: &Path) -> PathBuf {
    match input.strip_prefix(input_dir) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => input.file_name().map(PathBuf::from).unwrap_or_default(),
    }
}

/// `target` relative to `from`, `/`-separated, without the `.ts` extension
/// and prefixed with `./` (e.g. `./../types/user`).
pub fn module_specifier(from: &Path, target: &Path) -> String {
    let from: Vec<Component> = from.components().collect();
    let target = target.with_extension("");
    let target: Vec<Component> = target.components().collect();

    let common = from
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    parts.extend(from[common..].iter().map(|_| "..".to_string()));
    parts.extend(
        target[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    format!("./{}", parts.join("/"))
}
