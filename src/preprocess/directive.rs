// Author: Dustin Pilgrim
// License: MIT

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Node;

static EXPAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^@PP\.Expand\[(.*)\]$").expect("expand directive pattern is valid")
});

static REPLACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^@PP\.Replace\[(.*)\]$").expect("replace directive pattern is valid")
});

/// A macro directive found on a node of a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `Key:@PP.Expand[v1,...,vN];`: one layer per listed value.
    Expand { key: String, values: Vec<String> },
    /// `@PP.Replace[var1,...,varM] { ... }`: one layer per child layer of
    /// the directive node. Variables are kept longest first.
    Replace { key: String, variables: Vec<String> },
}

impl Directive {
    /// Inspect the node stored under `key`. A Replace key wins over an
    /// Expand value on the same node.
    pub fn detect(key: &str, node: &Node) -> Option<Directive> {
        if !node.layers().is_empty() {
            if let Some(variables) = replace_variables(key) {
                return Some(Directive::Replace {
                    key: key.to_string(),
                    variables,
                });
            }
        }

        let values = expand_values(node.value()?)?;
        Some(Directive::Expand {
            key: key.to_string(),
            values,
        })
    }

    pub fn key(&self) -> &str {
        match self {
            Directive::Expand { key, .. } | Directive::Replace { key, .. } => key,
        }
    }
}

/// Values of `@PP.Expand[...]`, split on `,` verbatim. `None` for anything
/// else, including an empty list.
pub fn expand_values(value: &str) -> Option<Vec<String>> {
    let inner = EXPAND_RE.captures(value)?.get(1)?.as_str();
    if inner.is_empty() {
        return None;
    }
    Some(inner.split(',').map(str::to_string).collect())
}

/// Variable names of `@PP.Replace[...]`, longest first. Empty names are
/// skipped; `None` when no name is left.
pub fn replace_variables(key: &str) -> Option<Vec<String>> {
    let inner = REPLACE_RE.captures(key)?.get(1)?.as_str();

    let mut variables: Vec<String> = inner
        .split(',')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if variables.is_empty() {
        return None;
    }

    // stable: equal lengths keep their declared order
    variables.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    Some(variables)
}
