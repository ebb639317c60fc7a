//! Token tree model
//!
//!     The in-memory form of one token source file: an ordered mapping from key to either a
//!     nested group or a leaf value. Declaration order is kept because the stylesheet output
//!     groups declarations by their first-level section.
//!
//!     Trees are built once per source file by the loader and then only read. The one
//!     exception is the `namespace` entry the conversion step attaches to a per-format copy.

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered mapping of token names to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenTree {
    entries: IndexMap<String, TokenValue>,
}

/// A single entry of a [`TokenTree`].
///
/// Serializes untagged, so a tree serializes to the same shape the YAML source had.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Group(TokenTree),
    List(Vec<TokenValue>),
    Text(String),
    Number(serde_yaml::Number),
    Bool(bool),
    Null,
}

/// A leaf reached by [`TokenTree::flatten`], with the key path that leads to it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatToken<'a> {
    pub path: Vec<String>,
    pub value: &'a TokenValue,
}

impl FlatToken<'_> {
    /// The key path joined with `separator` (e.g. `spacing-sm`).
    pub fn joined(&self, separator: &str) -> String {
        self.path.join(separator)
    }

    /// First-level section this leaf belongs to.
    pub fn section(&self) -> &str {
        self.path.first().map(String::as_str).unwrap_or_default()
    }
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TokenValue>) -> Option<TokenValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&TokenValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TokenValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten the tree into its leaves, in traversal order.
    ///
    /// Lists contribute one path segment per index. Empty groups and empty lists have no
    /// leaves and contribute nothing.
    pub fn flatten(&self) -> Vec<FlatToken<'_>> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        flatten_entries(self.iter(), &mut path, &mut out);
        out
    }
}

fn flatten_entries<'a, K>(
    entries: impl Iterator<Item = (K, &'a TokenValue)>,
    path: &mut Vec<String>,
    out: &mut Vec<FlatToken<'a>>,
) where
    K: ToString,
{
    for (key, value) in entries {
        path.push(key.to_string());
        match value {
            TokenValue::Group(tree) => flatten_entries(tree.iter(), path, out),
            TokenValue::List(items) => flatten_entries(items.iter().enumerate(), path, out),
            leaf => out.push(FlatToken {
                path: path.clone(),
                value: leaf,
            }),
        }
        path.pop();
    }
}

impl TokenValue {
    pub fn is_leaf(&self) -> bool {
        !matches!(self, TokenValue::Group(_) | TokenValue::List(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&TokenTree> {
        match self {
            TokenValue::Group(tree) => Some(tree),
            _ => None,
        }
    }
}

impl FromIterator<(String, TokenValue)> for TokenTree {
    fn from_iter<I: IntoIterator<Item = (String, TokenValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<TokenTree> for TokenValue {
    fn from(tree: TokenTree) -> Self {
        TokenValue::Group(tree)
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        TokenValue::Text(s)
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        TokenValue::Text(s.to_string())
    }
}

impl From<i64> for TokenValue {
    fn from(n: i64) -> Self {
        TokenValue::Number(n.into())
    }
}

impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        TokenValue::Number(n.into())
    }
}

impl From<bool> for TokenValue {
    fn from(b: bool) -> Self {
        TokenValue::Bool(b)
    }
}
