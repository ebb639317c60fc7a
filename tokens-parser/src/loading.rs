//! YAML loading
//!
//! Parses alias-resolved source text into a [`TokenTree`]. [`load`] never fails: malformed
//! input produces a warning and an empty tree, so a broken source still yields (near-empty)
//! output files instead of aborting a build.

use crate::error::LoadError;
use crate::tree::{TokenTree, TokenValue};
use serde_yaml::{Mapping, Value};

/// Parse `source` into a token tree, falling back to an empty tree on failure.
pub fn load(source: &str) -> TokenTree {
    match try_load(source) {
        Ok(tree) => tree,
        Err(err) => {
            tracing::warn!(error = %err, "could not parse tokens into a tree");
            TokenTree::new()
        }
    }
}

/// Parse `source` into a token tree.
///
/// An empty document loads as an empty tree. Any other non-mapping root is an error.
pub fn try_load(source: &str) -> Result<TokenTree, LoadError> {
    let value: Value = serde_yaml::from_str(source)?;
    match untag(value) {
        Value::Mapping(mapping) => Ok(convert_mapping(mapping)),
        Value::Null => Ok(TokenTree::new()),
        other => Err(LoadError::NotAMapping {
            found: kind_name(&other),
        }),
    }
}

fn convert_mapping(mapping: Mapping) -> TokenTree {
    mapping
        .into_iter()
        .filter_map(|(key, value)| match key_to_string(&key) {
            Some(key) => Some((key, convert_value(value))),
            None => {
                tracing::warn!(kind = kind_name(&key), "skipping token with a non-scalar key");
                None
            }
        })
        .collect()
}

fn convert_value(value: Value) -> TokenValue {
    match value {
        Value::Mapping(mapping) => TokenValue::Group(convert_mapping(mapping)),
        Value::Sequence(items) => TokenValue::List(items.into_iter().map(convert_value).collect()),
        Value::String(s) => TokenValue::Text(s),
        Value::Number(n) => TokenValue::Number(n),
        Value::Bool(b) => TokenValue::Bool(b),
        Value::Null => TokenValue::Null,
        Value::Tagged(tagged) => convert_value(tagged.value),
    }
}

/// Tags carry no meaning for tokens; keep the tagged value.
fn untag(mut value: Value) -> Value {
    while let Value::Tagged(tagged) = value {
        value = tagged.value;
    }
    value
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Tagged(tagged) => key_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
