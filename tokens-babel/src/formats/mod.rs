//! Format implementations
//!
//! Each submodule turns a token tree into the text of one output file.

pub mod json;
pub mod scss;

pub use json::JsonFormat;
pub use scss::ScssFormat;
