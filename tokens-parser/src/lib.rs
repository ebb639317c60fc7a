//! Design-token source processing
//!
//!     Turns a YAML token source into a [`TokenTree`]:
//!
//!         raw text → resolving (alias markers) → loading (YAML) → TokenTree
//!
//!     This is a pure lib: it reads no files and writes nothing. Emitting JSON or stylesheets
//!     from a tree lives in `tokens-babel`.
//!
//!     The file structure :
//!     .
//!     ├── error.rs        # LoadError, ResolveDiagnostic
//!     ├── resolving.rs    # `&anchor value` / `!{*anchor}` text substitution
//!     ├── loading.rs      # YAML → TokenTree
//!     ├── tree.rs         # TokenTree model and flattening
//!     └── lib.rs

pub mod error;
pub mod loading;
pub mod resolving;
pub mod tree;

pub use error::{LoadError, ResolveDiagnostic};
pub use loading::{load, try_load};
pub use resolving::{resolve, resolve_with_report, Resolution};
pub use tree::{FlatToken, TokenTree, TokenValue};

/// Resolve alias markers in `raw` and load the result.
pub fn parse(raw: &str) -> TokenTree {
    load(&resolve(raw))
}
