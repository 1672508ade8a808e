use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use schemagen_core::Target;
use serde_json::Value;

use crate::{Config, Error, Result, error::SourceContext};

/// Key holding the configuration inside `package.json`.
pub const PACKAGE_JSON_KEY: &str = "schemagen";

/// How a configuration file is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    /// Configuration nested under the `schemagen` key of `package.json`.
    PackageJson,
}

impl Format {
    /// Pick the format from a file name, sniffing extension-less rc files.
    pub fn detect(path: &Path, content: &str) -> Self {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        match path.extension().and_then(|e| e.to_str()) {
            _ if name == "package.json" => Format::PackageJson,
            Some("json") => Format::Json,
            Some("toml") => Format::Toml,
            _ if content.trim_start().starts_with('{') => Format::Json,
            _ => Format::Toml,
        }
    }
}

/// A configuration file with its raw content and parsed config.
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    content: String,
    config: Config,
}

impl ConfigFile {
    /// Read and validate the configuration at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let format = Format::detect(&path, &content);
        let filename = path.display().to_string();
        let config = parse_config(&content, &filename, format)?.ok_or_else(|| {
            SourceContext::new(content.as_str(), filename.as_str()).empty_tasks()
        })?;

        Ok(Self {
            path,
            content,
            config,
        })
    }

    /// Parse and validate configuration text.
    ///
    /// `path` is where the text notionally lives; it is only used for error
    /// reporting.
    pub fn from_str_with_path(content: &str, path: impl Into<PathBuf>, format: Format) -> Result<Self> {
        let path = path.into();
        let filename = path.display().to_string();
        let config = parse_config(content, &filename, format)?
            .ok_or_else(|| SourceContext::new(content, filename.as_str()).empty_tasks())?;

        Ok(Self {
            path,
            content: content.to_string(),
            config,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Parse and validate configuration text.
///
/// Returns `Ok(None)` for a `package.json` without a `schemagen` key.
pub(crate) fn parse_config(content: &str, filename: &str, format: Format) -> Result<Option<Config>> {
    let ctx = SourceContext::new(content, filename);

    let config: Config = match format {
        Format::Toml => toml::from_str(content).map_err(|e| ctx.toml_error(e))?,
        Format::Json => serde_json::from_str(content).map_err(|e| ctx.json_error(e))?,
        Format::PackageJson => {
            let mut package: Value = serde_json::from_str(content).map_err(|e| ctx.json_error(e))?;
            let Some(section) = package.get_mut(PACKAGE_JSON_KEY).map(Value::take) else {
                return Ok(None);
            };
            serde_json::from_value(section).map_err(|e| ctx.json_error(e))?
        }
    };

    validate(&config, &ctx)?;
    Ok(Some(config))
}

fn validate(config: &Config, ctx: &SourceContext) -> Result<()> {
    if config.tasks.is_empty() {
        return Err(ctx.empty_tasks());
    }
    for task in &config.tasks {
        Target::from_str(&task.target).map_err(|e| ctx.invalid_target(e))?;
    }
    Ok(())
}
