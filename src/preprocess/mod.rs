// Author: Dustin Pilgrim
// License: MIT

//! Expansion of `@PP.Expand` and `@PP.Replace` macro directives.
//!
//! Each layer is handled depth-first: the children of its nodes are
//! expanded before the layer itself is inspected. Only the first directive
//! of a layer is expanded per pass; the resulting clones are visited again
//! so that every directive of a layer ends up multiplied into the full
//! cartesian product.

use log::{debug, trace};

use crate::ast::{replace_in_layer, Layer};
use crate::NdfError;

mod directive;

pub use directive::{expand_values, replace_variables, Directive};

/// Expand every directive in `layers` in place.
///
/// Fails without a usable result when a Replace instantiation lacks one
/// of its declared variables.
pub fn preprocess(layers: &mut Vec<Layer>) -> Result<(), NdfError> {
    let mut index = 0;
    while index < layers.len() {
        match expand_layer(&mut layers[index])? {
            // revisit `index`: the first clone may hold further directives
            Some(expanded) => {
                layers.splice(index..=index, expanded);
            }
            None => index += 1,
        }
    }
    Ok(())
}

/// Preprocess the children of `layer` and expand its first directive.
/// `None` when the layer holds no directive.
fn expand_layer(layer: &mut Layer) -> Result<Option<Vec<Layer>>, NdfError> {
    let mut found = None;
    for (key, node) in layer.iter_mut() {
        preprocess(&mut node.children)?;
        if let Some(directive) = Directive::detect(key, node) {
            found = Some(directive);
            break;
        }
    }

    let Some(directive) = found else {
        return Ok(None);
    };

    let expanded = match &directive {
        Directive::Expand { key, values } => expand(layer, key, values),
        Directive::Replace { key, variables } => replace(layer, key, variables)?,
    };
    debug!(
        "Directive on '{}' expanded into {} layer(s)",
        directive.key(),
        expanded.len()
    );
    Ok(Some(expanded))
}

fn expand(layer: &Layer, key: &str, values: &[String]) -> Vec<Layer> {
    values
        .iter()
        .map(|value| {
            let mut clone = layer.clone();
            if let Some(node) = clone.get_mut(key) {
                node.set_value(Some(value.clone()));
            }
            clone
        })
        .collect()
}

fn replace(layer: &Layer, key: &str, variables: &[String]) -> Result<Vec<Layer>, NdfError> {
    let Some(directive_node) = layer.get(key) else {
        return Ok(Vec::new());
    };

    let mut expanded = Vec::with_capacity(directive_node.layer_count());
    for instantiation in directive_node.layers() {
        let mut clone = layer.clone();
        for variable in variables {
            let Some(definition) = instantiation.get(variable) else {
                return Err(NdfError::MissingVariable {
                    variable: variable.clone(),
                    directive: key.to_string(),
                    hint: Some("Every block of a Replace directive must define all of its variables".into()),
                    code: Some(301),
                });
            };
            let substitute = definition.value().unwrap_or_default();
            trace!("Substituting '{}' with '{}'", variable, substitute);
            replace_in_layer(&mut clone, variable, substitute);
        }
        expanded.push(clone);
    }

    for clone in &mut expanded {
        clone.remove(key);
    }
    Ok(expanded)
}
