//! Configuration file discovery.

use std::path::Path;

use tracing::debug;

use crate::{ConfigFile, Error, Format, Result, file::parse_config};

/// File names searched in each directory, in priority order.
pub const CONFIG_FILE_NAMES: [&str; 5] = [
    "schemagen.toml",
    ".schemagenrc.toml",
    ".schemagenrc.json",
    ".schemagenrc",
    "package.json",
];

/// Search `start` and its ancestors for a configuration file.
///
/// A `package.json` only counts when it has a `schemagen` key.
pub fn discover(start: &Path) -> Result<Option<ConfigFile>> {
    for dir in start.ancestors() {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }

            if name == "package.json" {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    Box::new(Error::Io {
                        path: path.clone(),
                        source: e,
                    })
                })?;
                let filename = path.display().to_string();
                if parse_config(&content, &filename, Format::PackageJson)?.is_none() {
                    debug!(path = %path.display(), "package.json has no schemagen key");
                    continue;
                }
            }

            debug!(path = %path.display(), "found configuration");
            return ConfigFile::open(&path).map(Some);
        }
    }
    Ok(None)
}

/// Load the configuration named on the command line, or discover one from
/// `cwd`.
pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return ConfigFile::open(cwd.join(path));
    }
    discover(cwd)?.ok_or_else(|| {
        Box::new(Error::NotFound {
            searched: cwd.to_path_buf(),
        })
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_discover_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("schemagen.toml"), "[[tasks]]\ntarget = \"zod\"\n").unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let file = discover(&nested).unwrap().unwrap();
        assert_eq!(file.path(), dir.path().join("schemagen.toml"));
    }

    #[test]
    fn test_discover_priority() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".schemagenrc"), "[[tasks]]\ntarget = \"yup\"\n").unwrap();
        fs::write(
            dir.path().join(".schemagenrc.json"),
            r#"{ "tasks": [{ "target": "zod" }] }"#,
        )
        .unwrap();

        let file = discover(dir.path()).unwrap().unwrap();
        assert_eq!(file.config().tasks[0].target, "zod");
    }

    #[test]
    fn test_discover_skips_package_json_without_key() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();
        let nested = dir.path().join("pkg");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            nested.join("package.json"),
            r#"{ "schemagen": { "tasks": [{ "target": "effect" }] } }"#,
        )
        .unwrap();

        let file = discover(&nested).unwrap().unwrap();
        assert_eq!(file.config().tasks[0].target, "effect");
        assert!(discover(dir.path()).unwrap().is_none_or(|f| f.path() != dir.path().join("package.json")));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("custom.toml"), "[[tasks]]\ntarget = \"types\"\n").unwrap();

        let file = load(Some(Path::new("custom.toml")), dir.path()).unwrap();
        assert_eq!(file.config().tasks[0].target, "types");
    }

    #[test]
    fn test_load_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(None, dir.path()).unwrap_err();
        assert!(matches!(*err, Error::NotFound { .. }));
    }
}
