//! Output formats for design tokens
//!
//!     This crate turns a [`tokens_parser::TokenTree`] into output files and drives the full
//!     source → files conversion used by the `tokens` binary.
//!
//! Architecture
//!
//!     - Format trait: uniform interface for every output format
//!     - OutputFormat: the closed set of formats, selectable from config and CLI
//!     - Format implementations: JSON and SCSS
//!     - convert: per-source orchestration (read, resolve, load, render, write)
//!
//!     Like the parser, this is a pure lib: no code here assumes a shell, prints to stdout or
//!     reads environment variables. Configuration arrives as an explicit [`ConvertOptions`].
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError
//!     ├── format.rs               # Format trait, OutputFormat, EmitContext
//!     ├── formats
//!     │   ├── json/mod.rs
//!     │   ├── scss/mod.rs
//!     │   └── mod.rs
//!     ├── convert.rs              # convert / convert_all / render
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── formats.rs              # exact output for known trees
//!     ├── convert.rs              # file-level behavior against a temp dir
//!     ├── properties.rs           # proptest round trips
//!     └── fixtures

pub mod convert;
pub mod error;
pub mod format;
pub mod formats;

pub use convert::{convert, convert_all, render, ConvertOptions, ConvertReport};
pub use error::FormatError;
pub use format::{EmitContext, Format, OutputFormat};
