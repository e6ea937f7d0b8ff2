// Author: Dustin Pilgrim
// License: MIT

use std::fs;

use serde::Serialize;

use crate::ast::{Layer, Node};
use crate::parser::Parser;
use crate::NdfError;

/// Export a parsed layer list to JSON.
///
/// Layers become a JSON array so repeated keys survive:
/// - each layer → object keyed by node key, in insertion order
/// - each node → `{"value": string | null, "children": [...]}`
/// - `children` is omitted for leaf nodes
///
/// This is the `Serialize` form of [`Layer`] and [`Node`].
///
/// # Examples
/// ```
/// use ndf_cfg::{export::export_layers_to_json, parser::parse};
///
/// let layers = parse("A:1;A:2;").unwrap();
/// let json = export_layers_to_json(&layers).unwrap();
/// let v: serde_json::Value = serde_json::from_str(&json).unwrap();
/// assert_eq!(v[1]["A"]["value"], "2");
/// ```
pub fn export_layers_to_json(layers: &[Layer]) -> Result<String, NdfError> {
    to_json(layers)
}

/// Export a single node (and its subtree) to JSON.
pub fn export_node_to_json(node: &Node) -> Result<String, NdfError> {
    to_json(node)
}

fn to_json<T: Serialize + ?Sized>(tree: &T) -> Result<String, NdfError> {
    serde_json::to_string_pretty(tree).map_err(|e| {
        NdfError::type_error(format!("Failed to serialize JSON: {}", e), "Report this as a bug", 406)
    })
}

/// Read, parse and export an NDF file in one call.
///
/// # Errors
/// Returns error if the file can't be read or a preprocessor directive is invalid.
pub fn export_ndf_file(path: &str) -> Result<String, NdfError> {
    let input = fs::read_to_string(path)
        .map_err(|e| NdfError::file_error(format!("Failed to read file: {}", e), path.to_string(), 500))?;

    let layers = Parser::new(&input).parse_layers()?;
    export_layers_to_json(&layers)
}
