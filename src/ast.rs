// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;
use indexmap::map::{Iter, IterMut};
use serde::Serialize;

use crate::NdfError;

/// A single `key(:value)(;|{...})` unit of an NDF document.
///
/// The synthetic root of a parsed document has neither key nor value.
/// Children are a sequence of layers so that repeated keys at the same
/// nesting level never overwrite each other.
///
/// Serializes as `{"value": ..., "children": [...]}`; the key is carried by
/// the enclosing layer's map.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Node {
    #[serde(skip)]
    pub(crate) key: Option<String>,
    pub(crate) value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) children: Vec<Layer>,
}

/// Ordered, key-unique group of sibling nodes.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Layer(IndexMap<String, Node>);

impl Node {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Node {
            key: Some(key.into()),
            value,
            children: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Node::default()
    }

    /// Build a root node that owns `layers`.
    pub fn with_layers(layers: Vec<Layer>) -> Self {
        Node {
            key: None,
            value: None,
            children: layers,
        }
    }

    /// Parse NDF text (with preprocessing) into a root node.
    pub fn parse(text: &str) -> Result<Self, NdfError> {
        crate::parser::parse(text).map(Node::with_layers)
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    pub fn layers(&self) -> &[Layer] {
        &self.children
    }

    pub fn layers_mut(&mut self) -> &mut Vec<Layer> {
        &mut self.children
    }

    pub fn into_layers(self) -> Vec<Layer> {
        self.children
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.children.get(index)
    }

    pub fn layer_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_root(&self) -> bool {
        self.key.is_none() && self.value.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// First child with `key`, searching layers in order.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.children.iter().find_map(|layer| layer.get(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.children.iter_mut().find_map(|layer| layer.get_mut(key))
    }

    /// Every child with `key`, one per layer at most, in layer order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter_map(move |layer| layer.get(key))
    }

    /// Append a leaf `key:value` child. A key already present in the last
    /// layer starts a new layer instead of overwriting.
    pub fn add_entry(&mut self, key: impl Into<String>, value: Option<String>) {
        push_node(&mut self.children, Node::new(key, value));
    }

    /// Append a whole subtree under the same duplicate-key rule as `add_entry`.
    /// Nodes without a key are dropped.
    pub fn add_child(&mut self, node: Node) {
        push_node(&mut self.children, node);
    }

    /// Replace every value in this subtree that equals `old` with `new`.
    pub fn replace_values(&mut self, old: &str, new: &str) {
        if self.value.as_deref() == Some(old) {
            self.value = Some(new.to_string());
        }
        for layer in &mut self.children {
            for node in layer.nodes_mut() {
                node.replace_values(old, new);
            }
        }
    }

    /// Substitute every occurrence of `pattern` inside the values of this subtree.
    pub fn replace_in_values(&mut self, pattern: &str, substitute: &str) {
        if let Some(value) = self.value.as_mut() {
            if value.contains(pattern) {
                *value = value.replace(pattern, substitute);
            }
        }
        replace_in_layers(&mut self.children, pattern, substitute);
    }
}

pub(crate) fn replace_in_layers(layers: &mut [Layer], pattern: &str, substitute: &str) {
    for layer in layers {
        replace_in_layer(layer, pattern, substitute);
    }
}

pub(crate) fn replace_in_layer(layer: &mut Layer, pattern: &str, substitute: &str) {
    for node in layer.nodes_mut() {
        node.replace_in_values(pattern, substitute);
    }
}

/// Shared node-append rule of the parser and the construction API.
pub(crate) fn push_node(layers: &mut Vec<Layer>, node: Node) {
    let node = match layers.last_mut() {
        Some(layer) => match layer.try_insert(node) {
            Ok(()) => return,
            Err(node) => node,
        },
        None => node,
    };

    if node.key.is_none() {
        return;
    }

    let mut layer = Layer::new();
    if layer.try_insert(node).is_ok() {
        layers.push(layer);
    }
}

impl Layer {
    pub fn new() -> Self {
        Layer(IndexMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert `node` under its own key. The node is handed back when it has
    /// no key or the key is already taken in this layer.
    pub fn try_insert(&mut self, node: Node) -> Result<(), Node> {
        let key = match node.key.as_ref() {
            Some(key) if !self.0.contains_key(key) => key.clone(),
            _ => return Err(node),
        };
        self.0.insert(key, node);
        Ok(())
    }

    /// Remove `key`, keeping the order of the remaining nodes.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.0.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.0.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.0.values_mut()
    }

    pub fn iter(&self) -> Iter<'_, String, Node> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, String, Node> {
        self.0.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// IndexMap equality ignores order; layers compare in insertion order.
impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl IntoIterator for Layer {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = (&'a String, &'a Node);
    type IntoIter = Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
