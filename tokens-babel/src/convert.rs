//! Source file → output files
//!
//! [`convert`] runs the whole pipeline for one token source: read, resolve aliases, load the
//! tree, then render and write one file per requested format into the output directory.
//!
//! Nothing here fails the caller. A missing source is skipped, an unreadable or malformed one
//! is converted as an empty tree, and a format that cannot be written does not stop the others.
//! Every such event is logged and recorded in the returned [`ConvertReport`].

use crate::error::FormatError;
use crate::format::{EmitContext, OutputFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tokens_parser::{resolve_with_report, try_load, ResolveDiagnostic, TokenTree};

/// Key under which the namespace is attached to each format's copy of the tree.
pub const NAMESPACE_KEY: &str = "namespace";

/// Everything a conversion needs to know, passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub namespace: String,
    pub formats: Vec<OutputFormat>,
    pub output_dir: PathBuf,
}

impl ConvertOptions {
    /// Options producing every supported format.
    pub fn new(namespace: impl Into<String>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            namespace: namespace.into(),
            formats: OutputFormat::ALL.to_vec(),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn with_formats(mut self, formats: impl IntoIterator<Item = OutputFormat>) -> Self {
        self.formats = formats.into_iter().collect();
        self
    }
}

/// What happened while converting one source file.
#[derive(Debug)]
pub struct ConvertReport {
    pub source: PathBuf,
    /// The source did not exist; nothing was written.
    pub skipped: bool,
    /// Why the source was converted as an empty tree, if it was.
    pub load_error: Option<String>,
    pub diagnostics: Vec<ResolveDiagnostic>,
    pub written: Vec<PathBuf>,
    pub failures: Vec<(OutputFormat, FormatError)>,
}

impl ConvertReport {
    fn new(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            skipped: false,
            load_error: None,
            diagnostics: Vec::new(),
            written: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Every requested format was written from a cleanly loaded and resolved source.
    pub fn is_clean(&self) -> bool {
        !self.skipped
            && self.load_error.is_none()
            && self.diagnostics.is_empty()
            && self.failures.is_empty()
    }
}

/// Convert one token source into the configured output files.
pub fn convert(source: &Path, options: &ConvertOptions) -> ConvertReport {
    let mut report = ConvertReport::new(source);

    if !source.exists() {
        tracing::warn!("{} cannot be found, token files not built", source.display());
        report.skipped = true;
        return report;
    }

    let tree = read_tokens(source, &mut report);
    let base_name = base_name(source);

    for &format in &options.formats {
        match write_format(&tree, format, &base_name, options) {
            Ok(path) => {
                tracing::info!(format = %format, path = %path.display(), "wrote token file");
                report.written.push(path);
            }
            Err(err) => {
                tracing::warn!(
                    format = %format,
                    source = %source.display(),
                    error = %err,
                    "could not write token file"
                );
                report.failures.push((format, err));
            }
        }
    }

    report
}

/// Convert several sources independently, in order.
pub fn convert_all<I, P>(sources: I, options: &ConvertOptions) -> Vec<ConvertReport>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    sources
        .into_iter()
        .map(|source| convert(source.as_ref(), options))
        .collect()
}

/// Render `tree` in `format`, with the namespace attached the way that format expects.
///
/// The tree itself is left untouched; each format works on its own copy.
pub fn render(
    tree: &TokenTree,
    format: OutputFormat,
    namespace: &str,
    base_name: &str,
) -> Result<String, FormatError> {
    let formatter = format.formatter();
    let mut tree = tree.clone();
    tree.insert(NAMESPACE_KEY, formatter.namespace_value(namespace));
    formatter.serialize(
        &tree,
        &EmitContext {
            namespace,
            base_name,
        },
    )
}

/// File name without its extension (`tokens/brand.yaml` → `brand`).
pub fn base_name(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_tokens(source: &Path, report: &mut ConvertReport) -> TokenTree {
    let raw = match fs::read_to_string(source) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "could not read tokens file {}",
                source.display()
            );
            report.load_error = Some(err.to_string());
            return TokenTree::new();
        }
    };

    let resolution = resolve_with_report(&raw);
    report.diagnostics = resolution.diagnostics;

    match try_load(&resolution.text) {
        Ok(tree) => {
            tracing::debug!(tokens = tree.flatten().len(), "loaded {}", source.display());
            tree
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                "could not parse tokens file {} into JSON",
                source.display()
            );
            report.load_error = Some(err.to_string());
            TokenTree::new()
        }
    }
}

fn write_format(
    tree: &TokenTree,
    format: OutputFormat,
    base_name: &str,
    options: &ConvertOptions,
) -> Result<PathBuf, FormatError> {
    let text = render(tree, format, &options.namespace, base_name)?;

    fs::create_dir_all(&options.output_dir).map_err(|source| FormatError::Io {
        path: options.output_dir.clone(),
        source,
    })?;

    let path = options
        .output_dir
        .join(format!("{}.{}", base_name, format.extension()));
    fs::write(&path, text).map_err(|source| FormatError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
