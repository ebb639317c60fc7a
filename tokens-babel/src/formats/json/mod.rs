//! JSON token output
//!
//! The tree is wrapped in a single root key built from the namespace (hyphens become
//! underscores) and the source's base name:
//!
//! ```text
//! {
//!     "esds_tokens": {
//!         "spacing": {
//!             "sm": "4px"
//!         },
//!         "namespace": "esds"
//!     }
//! }
//! ```

use crate::error::FormatError;
use crate::format::{EmitContext, Format};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use tokens_parser::TokenTree;

const INDENT: &[u8] = b"    ";

/// Root key for a namespace and base name (`my-ds` + `tokens` → `my_ds_tokens`).
pub fn root_key(namespace: &str, base_name: &str) -> String {
    format!("{}_{}", namespace.replace('-', "_"), base_name)
}

/// Single-entry object; serialized directly so the tree keeps its key order.
struct Namespaced<'a> {
    key: String,
    tree: &'a TokenTree,
}

impl Serialize for Namespaced<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, self.tree)?;
        map.end()
    }
}

/// Format implementation for JSON token files
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Token tree as a namespaced JSON object"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &TokenTree, ctx: &EmitContext<'_>) -> Result<String, FormatError> {
        let root = Namespaced {
            key: root_key(ctx.namespace, ctx.base_name),
            tree,
        };

        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        root.serialize(&mut serializer)?;

        // serde_json only ever writes UTF-8
        let mut output = String::from_utf8_lossy(&buf).into_owned();
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokens_parser::TokenValue;

    fn ctx<'a>(namespace: &'a str, base_name: &'a str) -> EmitContext<'a> {
        EmitContext {
            namespace,
            base_name,
        }
    }

    #[test]
    fn test_root_key_replaces_hyphens() {
        assert_eq!(root_key("esds", "tokens"), "esds_tokens");
        assert_eq!(root_key("my-design-system", "brand_colors"), "my_design_system_brand_colors");
    }

    #[test]
    fn test_four_space_indentation() {
        let mut tree = TokenTree::new();
        tree.insert("radius", "2px");

        let output = JsonFormat.serialize(&tree, &ctx("ns", "base")).unwrap();
        assert_eq!(output, "{\n    \"ns_base\": {\n        \"radius\": \"2px\"\n    }\n}\n");
    }

    #[test]
    fn test_keeps_tree_key_order() {
        let mut tree = TokenTree::new();
        tree.insert("zeta", 1i64);
        tree.insert("alpha", 2i64);

        let output = JsonFormat.serialize(&tree, &ctx("ns", "base")).unwrap();
        let zeta = output.find("zeta").unwrap();
        let alpha = output.find("alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_empty_tree() {
        let output = JsonFormat.serialize(&TokenTree::new(), &ctx("ns", "base")).unwrap();
        assert_eq!(output, "{\n    \"ns_base\": {}\n}\n");
    }

    #[test]
    fn test_lists_stay_arrays() {
        let mut tree = TokenTree::new();
        tree.insert("stack", TokenValue::List(vec!["a".into(), "b".into()]));

        let output = JsonFormat.serialize(&tree, &ctx("ns", "base")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["ns_base"]["stack"], serde_json::json!(["a", "b"]));
    }
}
