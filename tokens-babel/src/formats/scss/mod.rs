//! SCSS token output
//!
//! Produces three blocks from one tree:
//!
//! - `!default` variable declarations, one per leaf, named by the dash-joined key path. A
//!   blank line separates first-level sections.
//! - A nested map literal mirroring the tree, whose leaves point at those variables, so a
//!   consumer overriding a variable also changes the map.
//! - A `<namespace>-token($keys...)` accessor walking the map.
//!
//! ## Example
//!
//! ```text
//! // DO NOT EDIT: This file is automatically generated by a build task
//!
//! $esds-spacing-sm: 4px !default;
//! $esds-spacing-md: 8px !default;
//!
//! $esds-namespace: "esds" !default;
//! $esds-tokens: (
//!     'spacing': (
//!         'sm': $esds-spacing-sm,
//!         'md': $esds-spacing-md
//!     ),
//!     'namespace': $esds-namespace
//! );
//!
//! @function esds-token($keys...) {
//!     $map: $esds-tokens;
//!     @each $key in $keys {
//!         $map: map-get($map, $key);
//!     }
//!     @return $map;
//! }
//! ```

use crate::error::FormatError;
use crate::format::{EmitContext, Format};
use std::fmt::Display;
use tokens_parser::{TokenTree, TokenValue};

pub const HEADER: &str = "// DO NOT EDIT: This file is automatically generated by a build task";

const INDENT: &str = "    ";

/// Builds the stylesheet text for one tree
struct ScssSerializer<'a> {
    ctx: &'a EmitContext<'a>,
    output: String,
}

impl<'a> ScssSerializer<'a> {
    fn new(ctx: &'a EmitContext<'a>) -> Self {
        Self {
            ctx,
            output: String::new(),
        }
    }

    fn serialize(mut self, tree: &TokenTree) -> String {
        self.output.push_str(HEADER);
        self.output.push_str("\n\n");
        self.write_declarations(tree);
        self.write_map(tree);
        self.output.push('\n');
        self.write_accessor();
        self.output
    }

    fn write_declarations(&mut self, tree: &TokenTree) {
        let mut previous_section: Option<&str> = None;
        let flat = tree.flatten();
        for token in &flat {
            let section = token.section();
            if previous_section.is_some_and(|previous| previous != section) {
                self.output.push('\n');
            }
            previous_section = Some(section);

            self.output.push_str(&format!(
                "${}-{}: {} !default;\n",
                self.ctx.namespace,
                token.joined("-"),
                render_leaf(token.value)
            ));
        }
    }

    fn write_map(&mut self, tree: &TokenTree) {
        let prefix = format!("${}-", self.ctx.namespace);
        self.output
            .push_str(&format!("${}: (\n", map_variable(self.ctx)));
        self.output.push_str(&map_section(tree.iter(), 1, &prefix));
        self.output.push_str(");\n");
    }

    fn write_accessor(&mut self) {
        let namespace = self.ctx.namespace;
        self.output
            .push_str(&format!("@function {}-token($keys...) {{\n", namespace));
        self.output
            .push_str(&format!("{}$map: ${};\n", INDENT, map_variable(self.ctx)));
        self.output
            .push_str(&format!("{}@each $key in $keys {{\n", INDENT));
        self.output
            .push_str(&format!("{0}{0}$map: map-get($map, $key);\n", INDENT));
        self.output.push_str(&format!("{}}}\n", INDENT));
        self.output.push_str(&format!("{}@return $map;\n", INDENT));
        self.output.push_str("}\n");
    }
}

/// Name of the map variable, without the `$` (`esds` + `brand_colors` → `esds-brand-colors`).
pub fn map_variable(ctx: &EmitContext<'_>) -> String {
    format!("{}-{}", ctx.namespace, ctx.base_name.replace('_', "-"))
}

/// One nesting level of the map literal. Entries are comma separated; the last one has none.
fn map_section<'t, K: Display>(
    entries: impl Iterator<Item = (K, &'t TokenValue)>,
    level: usize,
    prefix: &str,
) -> String {
    let indent = INDENT.repeat(level);
    let lines: Vec<String> = entries
        .map(|(key, value)| {
            let nested_prefix = format!("{}{}-", prefix, key);
            let body = match value {
                TokenValue::Group(tree) => map_section(tree.iter(), level + 1, &nested_prefix),
                TokenValue::List(items) => {
                    map_section(items.iter().enumerate(), level + 1, &nested_prefix)
                }
                _ => return format!("{}'{}': {}{}", indent, key, prefix, key),
            };
            if body.is_empty() {
                format!("{}'{}': ()", indent, key)
            } else {
                format!("{}'{}': (\n{}{})", indent, key, body, indent)
            }
        })
        .collect();

    if lines.is_empty() {
        String::new()
    } else {
        lines.join(",\n") + "\n"
    }
}

/// Leaf value as it appears on the right-hand side of a declaration.
fn render_leaf(value: &TokenValue) -> String {
    match value {
        TokenValue::Text(s) => s.clone(),
        TokenValue::Number(n) => n.to_string(),
        TokenValue::Bool(b) => b.to_string(),
        TokenValue::Null => "null".to_string(),
        TokenValue::Group(_) | TokenValue::List(_) => "()".to_string(),
    }
}

/// Format implementation for SCSS token files
pub struct ScssFormat;

impl Format for ScssFormat {
    fn name(&self) -> &str {
        "scss"
    }

    fn description(&self) -> &str {
        "!default variables, a nested token map and a lookup function"
    }

    fn extension(&self) -> &str {
        "scss"
    }

    /// Stylesheets embed the namespace as a quoted string literal.
    fn namespace_value(&self, namespace: &str) -> TokenValue {
        TokenValue::Text(format!("\"{}\"", namespace))
    }

    fn serialize(&self, tree: &TokenTree, ctx: &EmitContext<'_>) -> Result<String, FormatError> {
        Ok(ScssSerializer::new(ctx).serialize(tree))
    }
}
