//! Error types for token source processing

use thiserror::Error;

/// Why a resolved source could not be loaded into a token tree.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("token source root must be a mapping, found {found}")]
    NotAMapping { found: &'static str },
}

/// Problems found while resolving alias markers.
///
/// These never stop resolution: the offending marker is replaced by a visible placeholder and
/// the diagnostic is reported alongside the resolved text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveDiagnostic {
    #[error("cannot find value for anchor `{name}`")]
    UnresolvedAlias { name: String },

    #[error("cyclic anchor chain: {}", .chain.join(" -> "))]
    CyclicAnchorChain { chain: Vec<String> },
}
