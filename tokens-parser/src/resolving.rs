//! Alias resolution
//!
//!     Token sources use a small text-level reference scheme on top of YAML. It is not YAML's
//!     own anchor/alias mechanism and is applied to the raw text before the YAML parser sees it.
//!
//!     Anchor definition, one per line:
//!
//!         brand: &brandColor "#fff"
//!         accent: &accentColor *brandColor
//!
//!     Alias marker, anywhere in the text:
//!
//!         background: !{*accentColor}
//!
//!     Resolution runs in two steps:
//!
//!     1. Every anchor definition is traced to a final value. A value of the form `*name` points
//!        at another anchor and is followed to that anchor's first definition. Definitions whose
//!        value is a pointer are rewritten in place to the traced value, so the YAML parser never
//!        sees an anchor placed on an alias (`&accentColor "#fff"` above).
//!     2. Every alias marker is replaced by its anchor's value, with one pair of surrounding
//!        double quotes removed.
//!
//!     Failures do not stop resolution. An unknown anchor becomes
//!     `CANNOT FIND VALUE FOR <name>` in the output text and a cyclic chain becomes
//!     `CYCLIC REFERENCE FOR <a -> b -> a>`, so the problem shows up in the generated files.

use crate::error::ResolveDiagnostic;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// `&name value` up to the end of the line.
static ANCHOR_DEFINITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(\S*) ([^\r\n]*)").unwrap());

/// `!{*name}`
static ALIAS_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\{\*([^\s{}]*)\}").unwrap());

/// Placeholder prefix for aliases and pointers naming an undefined anchor.
pub const MISSING_VALUE_PREFIX: &str = "CANNOT FIND VALUE FOR";

/// Placeholder prefix for anchors whose pointer chain loops back on itself.
pub const CYCLE_PREFIX: &str = "CYCLIC REFERENCE FOR";

/// Resolved text plus everything that went wrong on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub text: String,
    pub diagnostics: Vec<ResolveDiagnostic>,
}

impl Resolution {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Replace every alias marker in `raw` with its anchor's value.
pub fn resolve(raw: &str) -> String {
    resolve_with_report(raw).text
}

/// Like [`resolve`], also returning the diagnostics collected along the way.
pub fn resolve_with_report(raw: &str) -> Resolution {
    let mut anchors = AnchorTable::scan(raw);
    let traced = anchors.trace_all();
    let mut diagnostics = std::mem::take(&mut anchors.diagnostics);

    let rewritten = rewrite_pointer_definitions(raw, &traced);

    // later definitions of a name replace earlier ones
    let values: HashMap<&str, &str> = anchors
        .definitions
        .iter()
        .zip(&traced)
        .map(|((name, _), value)| (*name, value.as_str()))
        .collect();

    let text = ALIAS_MARKER
        .replace_all(&rewritten, |caps: &Captures| {
            let name = &caps[1];
            match values.get(name) {
                Some(value) => strip_quotes(value).to_string(),
                None => {
                    tracing::warn!(anchor = name, "alias refers to an undefined anchor");
                    diagnostics.push(ResolveDiagnostic::UnresolvedAlias {
                        name: name.to_string(),
                    });
                    missing_value(name)
                }
            }
        })
        .into_owned();

    tracing::debug!(
        anchors = values.len(),
        diagnostics = diagnostics.len(),
        "resolved alias markers"
    );

    Resolution { text, diagnostics }
}

/// Anchor definitions found in one source text.
struct AnchorTable<'a> {
    /// Every definition, in source order.
    definitions: Vec<(&'a str, &'a str)>,
    /// First definition per name; pointer chains follow these.
    first: HashMap<&'a str, &'a str>,
    diagnostics: Vec<ResolveDiagnostic>,
}

impl<'a> AnchorTable<'a> {
    fn scan(raw: &'a str) -> Self {
        let definitions: Vec<_> = ANCHOR_DEFINITION
            .captures_iter(raw)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str();
                let value = caps.get(2)?.as_str().trim_end();
                Some((name, value))
            })
            .collect();

        let mut first = HashMap::new();
        for (name, value) in &definitions {
            first.entry(*name).or_insert(*value);
        }

        Self {
            definitions,
            first,
            diagnostics: Vec::new(),
        }
    }

    /// Trace every definition, in source order.
    fn trace_all(&mut self) -> Vec<String> {
        let mut traced = Vec::with_capacity(self.definitions.len());
        for (name, value) in self.definitions.clone() {
            let mut chain = vec![name];
            traced.push(self.trace(value, &mut chain));
        }
        traced
    }

    fn trace(&mut self, value: &'a str, chain: &mut Vec<&'a str>) -> String {
        let Some(target) = pointer_target(value) else {
            return value.to_string();
        };

        if chain.contains(&target) {
            let mut cycle: Vec<String> = chain.iter().map(|name| name.to_string()).collect();
            cycle.push(target.to_string());
            let placeholder = format!("{} {}", CYCLE_PREFIX, cycle.join(" -> "));
            tracing::warn!(chain = %cycle.join(" -> "), "cyclic anchor chain");
            self.diagnostics
                .push(ResolveDiagnostic::CyclicAnchorChain { chain: cycle });
            return placeholder;
        }

        match self.first.get(target).copied() {
            Some(next) => {
                chain.push(target);
                let traced = self.trace(next, chain);
                chain.pop();
                traced
            }
            None => {
                tracing::warn!(anchor = target, "anchor points to an undefined anchor");
                self.diagnostics.push(ResolveDiagnostic::UnresolvedAlias {
                    name: target.to_string(),
                });
                missing_value(target)
            }
        }
    }
}

/// Replace the value of each pointer definition (`&text *base`) with its traced value.
///
/// `traced` holds one entry per definition, in the order [`ANCHOR_DEFINITION`] matches them.
fn rewrite_pointer_definitions(raw: &str, traced: &[String]) -> String {
    let mut traced = traced.iter();
    ANCHOR_DEFINITION
        .replace_all(raw, |caps: &Captures| {
            let value = traced.next();
            match value {
                Some(value) if pointer_target(&caps[2]).is_some() => {
                    format!("&{} {}", &caps[1], value)
                }
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// `*name` → `name`
fn pointer_target(value: &str) -> Option<&str> {
    value.trim_start().strip_prefix('*')?.split_whitespace().next()
}

fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

fn missing_value(name: &str) -> String {
    format!("{} {}", MISSING_VALUE_PREFIX, name)
}
