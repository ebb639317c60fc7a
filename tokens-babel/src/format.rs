//! Format trait definition
//!
//! Every output format implements [`Format`]. The set of formats is closed: [`OutputFormat`]
//! names each one and hands out its implementation, so configuration and the CLI select formats
//! by enum rather than by looking strings up in a table.

use crate::error::FormatError;
use crate::formats::{JsonFormat, ScssFormat};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tokens_parser::{TokenTree, TokenValue};

/// What an emitter needs to know besides the tree itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitContext<'a> {
    /// Prefix for variable names and the JSON root key.
    pub namespace: &'a str,
    /// Source file name without its extension (`tokens` for `tokens.yaml`).
    pub base_name: &'a str,
}

/// Trait for token output formats
///
/// # Examples
///
/// ```ignore
/// struct PlainFormat;
///
/// impl Format for PlainFormat {
///     fn name(&self) -> &str {
///         "plain"
///     }
///
///     fn extension(&self) -> &str {
///         "txt"
///     }
///
///     fn serialize(&self, tree: &TokenTree, ctx: &EmitContext<'_>) -> Result<String, FormatError> {
///         Ok(format!("{} tokens in {}", tree.len(), ctx.base_name))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "json", "scss")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extension for written output, without the dot
    fn extension(&self) -> &str;

    /// Value attached to the tree as its `namespace` entry before serializing.
    fn namespace_value(&self, namespace: &str) -> TokenValue {
        TokenValue::Text(namespace.to_string())
    }

    /// Serialize a token tree into output text
    fn serialize(&self, tree: &TokenTree, ctx: &EmitContext<'_>) -> Result<String, FormatError>;
}

/// The supported output formats.
///
/// Parses from `json`, `.json`, `scss` or `.scss`, which is also how configuration files and
/// the command line spell them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputFormat {
    Json,
    Scss,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Json, OutputFormat::Scss];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Scss => "scss",
        }
    }

    pub fn extension(self) -> &'static str {
        self.formatter().extension()
    }

    /// The implementation behind this format.
    pub fn formatter(self) -> &'static dyn Format {
        match self {
            OutputFormat::Json => &JsonFormat,
            OutputFormat::Scss => &ScssFormat,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "scss" => Ok(OutputFormat::Scss),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = FormatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
