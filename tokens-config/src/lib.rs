//! Configuration for the design-token compiler.
//!
//! Three layers, later ones winning: the `defaults/tokens.default.toml` compiled into the
//! binary, a `tokens.toml` project file (picked up from the working directory or named
//! explicitly), and single-key overrides from command-line flags. [`Loader::build`]
//! deserializes the result into a [`TokensConfig`] and rejects namespaces that cannot prefix
//! SCSS variables.
//!
//! `tokens.source_file` may be a glob (`tokens/*.yaml`); [`TokensConfig::source_files`] expands
//! it into the sources to convert.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokens_babel::{ConvertOptions, OutputFormat};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/tokens.default.toml");

/// Config file picked up from the working directory when none is given explicitly.
pub const DEFAULT_FILE_NAME: &str = "tokens.toml";

const GLOB_CHARS: &[char] = &['*', '?', '[', '{'];

/// Top-level configuration consumed by the compiler.
#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
    pub root_path: PathBuf,
    pub tokens_path: PathBuf,
    pub tokens: TokenSourceConfig,
}

/// Where tokens come from and how they are emitted.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSourceConfig {
    /// Path or glob naming the YAML sources.
    pub source_file: PathBuf,
    /// Overrides `root_path/tokens_path` as the output directory.
    pub output_path: Option<PathBuf>,
    pub namespace: String,
    pub formats: Vec<OutputFormat>,
}

impl TokensConfig {
    /// Directory the output files are written to.
    pub fn output_dir(&self) -> PathBuf {
        match &self.tokens.output_path {
            Some(path) => path.clone(),
            None => self.root_path.join(&self.tokens_path),
        }
    }

    /// Reject namespaces that cannot be embedded in SCSS identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let namespace = &self.tokens.namespace;
        if namespace.is_empty() {
            return Err(ConfigError::Message(
                "tokens.namespace must not be empty".to_string(),
            ));
        }
        if let Some(c) = namespace
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ConfigError::Message(format!(
                "tokens.namespace '{}' contains '{}'; only letters, digits, '-' and '_' are allowed",
                namespace, c
            )));
        }
        Ok(())
    }

    /// Sources named by `tokens.source_file`, expanded if it is a glob.
    pub fn source_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        expand_sources(&self.tokens.source_file)
    }

    /// The explicit options handed to each conversion.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new(self.tokens.namespace.clone(), self.output_dir())
            .with_formats(self.tokens.formats.iter().copied())
    }
}

/// Builds a [`TokensConfig`] from the embedded defaults plus project layers.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the compiled-in defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a project file given on the command line; building fails if it does not exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a project file only if present, as done for `tokens.toml` in the working directory.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key (`tokens.namespace`) above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers, deserialize, then check the namespace.
    pub fn build(self) -> Result<TokensConfig, ConfigError> {
        let config: TokensConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in configuration, without any project file.
pub fn load_defaults() -> Result<TokensConfig, ConfigError> {
    Loader::new().build()
}

/// Expand a source path that may contain glob characters.
///
/// A plain path is returned as is, whether or not it exists. A glob is matched against the
/// files under its longest literal directory prefix; matches come back sorted.
pub fn expand_sources(pattern: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let text = pattern.to_string_lossy();
    if !text.contains(GLOB_CHARS) {
        return Ok(vec![pattern.to_path_buf()]);
    }

    let mut base = PathBuf::new();
    let mut rest = Vec::new();
    for component in pattern.components() {
        let part = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !part.contains(GLOB_CHARS) {
            base.push(component);
        } else {
            rest.push(part.into_owned());
        }
    }
    if base.as_os_str().is_empty() {
        base.push(".");
    }

    // leading '/' anchors the glob at `base`
    let glob = format!("/{}", rest.join("/"));
    let invalid = |err: ignore::Error| {
        ConfigError::Message(format!("tokens.source_file '{}': {}", text, err))
    };
    let mut overrides = OverrideBuilder::new(&base);
    overrides.add(&glob).map_err(invalid)?;
    let overrides = overrides.build().map_err(invalid)?;

    let mut sources: Vec<PathBuf> = WalkBuilder::new(&base)
        .standard_filters(false)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable path under {}", base.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|kind| kind.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| overrides.matched(path, false).is_whitelist())
        .collect();
    sources.sort();

    if sources.is_empty() {
        tracing::warn!("no token sources match {}", text);
    }
    Ok(sources)
}
