// Author: Dustin Pilgrim
// License: MIT

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ast::{Layer, Node};
use crate::reader::Reader;
use crate::{preprocess, NdfError};

mod block;

/// Default limit on nested `{` blocks.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest block nesting accepted before the parse fails with
    /// `NdfError::NestingTooDeep`.
    ///
    /// Scanning itself never fails and tolerates any malformed input; this
    /// limit is its only error. Rendering, preprocessing, cloning and
    /// dropping walk the tree recursively, so an unbounded depth would
    /// trade the error for a stack overflow. Raise it for machine-written
    /// documents nested deeper than the default.
    pub max_depth: usize,
    /// Run the `@PP` macro preprocessor over the scanned tree.
    pub preprocess: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            preprocess: true,
        }
    }
}

pub struct Parser<'a> {
    reader: Reader<'a>,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Parser {
            reader: Reader::new(input),
            options,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Scan the whole input and, unless disabled, expand `@PP` directives.
    pub fn parse_layers(&mut self) -> Result<Vec<Layer>, NdfError> {
        let mut layers = block::scan(&mut self.reader, self.options.max_depth)?;
        debug!(
            "Scanned {} top-level layer(s) over {} line(s)",
            layers.len(),
            self.reader.line()
        );

        if self.options.preprocess {
            preprocess::preprocess(&mut layers)?;
            debug!("Preprocessed into {} top-level layer(s)", layers.len());
        }

        Ok(layers)
    }

    /// Like `parse_layers`, wrapped in a synthetic root node.
    pub fn parse_node(&mut self) -> Result<Node, NdfError> {
        self.parse_layers().map(Node::with_layers)
    }
}

/// Parse NDF text with default options.
pub fn parse(text: &str) -> Result<Vec<Layer>, NdfError> {
    Parser::new(text).parse_layers()
}

pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Vec<Layer>, NdfError> {
    Parser::with_options(text, *options).parse_layers()
}

#[cfg(test)]
mod tests;
