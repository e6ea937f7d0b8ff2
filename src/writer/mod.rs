// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use crate::ast::{Layer, Node};
use crate::utils::{is_delimiter, is_ndf_whitespace};

/// Render `node` as NDF text.
///
/// In pretty mode every nesting level adds one tab, layers are separated
/// by a blank line and the final newline is trimmed. Compact mode emits no
/// decorative whitespace at all. A root node writes its layers at
/// `indent_level`; any other node writes its children one level deeper.
pub fn render(node: &Node, indent_level: usize, pretty: bool) -> String {
    let mut out = String::new();
    write_node(&mut out, node, indent_level, pretty);
    if pretty && out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Render a document-level layer list, as produced by the parser.
pub fn render_layers(layers: &[Layer], pretty: bool) -> String {
    let mut out = String::new();
    write_layers(&mut out, layers, 0, pretty);
    if pretty && out.ends_with('\n') {
        out.pop();
    }
    out
}

fn write_node(out: &mut String, node: &Node, level: usize, pretty: bool) {
    if node.is_root() {
        write_layers(out, node.layers(), level, pretty);
        return;
    }

    write_indent(out, level, pretty);
    out.push_str(&escape_key(node.key().unwrap_or_default()));
    if let Some(value) = node.value() {
        out.push(':');
        if node.is_leaf() {
            out.push_str(&escape_value(value));
        } else {
            out.push_str(&escape_value_before_block(value));
        }
    }

    if node.is_leaf() {
        out.push(';');
        if pretty {
            out.push('\n');
        }
        return;
    }

    if pretty {
        out.push('\n');
        write_indent(out, level, pretty);
        out.push_str("{\n");
    } else {
        out.push('{');
    }

    write_layers(out, node.layers(), level + 1, pretty);

    write_indent(out, level, pretty);
    out.push('}');
    if pretty {
        out.push('\n');
    }
}

fn write_layers(out: &mut String, layers: &[Layer], level: usize, pretty: bool) {
    for (i, layer) in layers.iter().enumerate() {
        if pretty && i > 0 {
            out.push('\n');
        }
        for child in layer.nodes() {
            write_node(out, child, level, pretty);
        }
    }
}

fn write_indent(out: &mut String, level: usize, pretty: bool) {
    if pretty {
        out.extend(std::iter::repeat_n('\t', level));
    }
}

/// Escape a value so that the parser reads it back verbatim.
///
/// `;`, `{`, `}` and `\` are prefixed with a backslash, as is a `/` that
/// is directly followed by another `/`. A lone `/` is emitted unchanged.
pub fn escape_value(value: &str) -> String {
    escape_with(value, |_| false)
}

/// Escape a key. Besides the value rules, `:` and the whitespace set are
/// escaped because key position treats them as syntax.
pub fn escape_key(key: &str) -> String {
    escape_with(key, |c| c == ':' || is_ndf_whitespace(c))
}

/// Escape a value that is followed by `{`. The parser trims unescaped
/// trailing whitespace there, so the trailing run is escaped as well.
pub fn escape_value_before_block(value: &str) -> String {
    let body = value.trim_end_matches(is_ndf_whitespace);
    let mut out = escape_value(body);
    for c in value[body.len()..].chars() {
        out.push('\\');
        out.push(c);
    }
    out
}

fn escape_with(text: &str, extra: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let needs_escape = match c {
            '/' => chars.peek() == Some(&'/'),
            c => is_delimiter(c) || extra(c),
        };
        if needs_escape {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

impl Node {
    pub fn to_ndf_string(&self, pretty: bool) -> String {
        render(self, 0, pretty)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self, 0, true))
    }
}
