//! Appends `.js` to extensionless relative import specifiers, as ES module
//! resolution requires.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use eyre::{Context, Result};
use regex::{Captures, Regex};
use tracing::debug;

use crate::paths::ts_files;

static FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(from\s+['"])((\.?\.?/)[^'"]+)(['"];?)"#).expect("import pattern is valid")
});

static EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^/]+$").expect("extension pattern is valid"));

/// Outcome of [`fix_imports`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportFixSummary {
    /// Number of `.ts` files read.
    pub scanned: usize,
    /// Files that were rewritten.
    pub fixed: Vec<PathBuf>,
}

/// Rewrite the relative specifiers of `content`, or `None` if nothing
/// changed.
pub fn fix_import_specifiers(content: &str) -> Option<String> {
    let fixed = FROM_RE.replace_all(content, |caps: &Captures| {
        let specifier = &caps[2];
        let relative = specifier.starts_with("./") || specifier.starts_with("../");
        if relative && !EXTENSION_RE.is_match(specifier) {
            format!("{}{}.js{}", &caps[1], specifier, &caps[4])
        } else {
            caps[0].to_string()
        }
    });
    (fixed != content).then(|| fixed.into_owned())
}

/// Fix the imports of every `.ts` file below `base_dir`. Each changed file
/// is written once.
pub fn fix_imports(base_dir: &Path) -> Result<ImportFixSummary> {
    let files = ts_files(base_dir)?;
    let mut summary = ImportFixSummary {
        scanned: files.len(),
        fixed: Vec::new(),
    };

    for path in files {
        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        if let Some(fixed) = fix_import_specifiers(&content) {
            std::fs::write(&path, fixed)
                .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
            debug!(path = %path.display(), "fixed imports");
            summary.fixed.push(path);
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_relative_specifiers_get_js() {
        let fixed = fix_import_specifiers(
            "export {\n\tA,\n} from \"./../types/test\";\nimport { B } from '../b'\n",
        )
        .unwrap();
        assert_eq!(
            fixed,
            "export {\n\tA,\n} from \"./../types/test.js\";\nimport { B } from '../b.js'\n"
        );
    }

    #[test]
    fn test_other_specifiers_unchanged() {
        let content = "import { z } from 'zod'\n\
                       import a from './a.js'\n\
                       import b from './data.json'\n\
                       import c from '/abs/c'\n\
                       import d from '@scope/pkg/sub'\n";
        assert_eq!(fix_import_specifiers(content), None);
    }

    #[test]
    fn test_dotted_directory_still_fixed() {
        assert_eq!(
            fix_import_specifiers("import a from './v1.2/a'").as_deref(),
            Some("import a from './v1.2/a.js'")
        );
    }

    #[test]
    fn test_fix_imports_writes_changed_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("user")).unwrap();
        fs::write(root.join("user/index.ts"), "export { A } from \"./../types/user\";\n").unwrap();
        fs::write(root.join("plain.ts"), "import { z } from 'zod'\n").unwrap();

        let summary = fix_imports(root).unwrap();
        assert_eq!(summary.scanned, 2);
        assert_eq!(summary.fixed, [root.join("user/index.ts")]);
        assert_eq!(
            fs::read_to_string(root.join("user/index.ts")).unwrap(),
            "export { A } from \"./../types/user.js\";\n"
        );

        let again = fix_imports(root).unwrap();
        assert!(again.fixed.is_empty());
    }

    #[test]
    fn test_file_with_two_specifiers_is_written_once() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(
            root.join("both.ts"),
            "import { A } from './a';
export { B } from \"../b\";
",
        )
        .unwrap();

        let summary = fix_imports(root).unwrap();
        assert_eq!(summary.scanned, 1);
        assert_eq!(summary.fixed, [root.join("both.ts")]);
        assert_eq!(
            fs::read_to_string(root.join("both.ts")).unwrap(),
            "import { A } from './a.js';\nexport { B } from \"../b.js\";\n"
        );
    }
}
