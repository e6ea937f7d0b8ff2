// Author: Dustin Pilgrim
// License: MIT

use std::mem;

use log::trace;

use crate::ast::{push_node, Layer, Node};
use crate::reader::{skip_line_comment, Reader};
use crate::utils::{is_ndf_whitespace, trim_trailing_whitespace};
use crate::NdfError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Key,
    Value,
}

/// State of one `{ ... }` block (or the document itself) while it is being scanned.
struct Frame {
    layers: Vec<Layer>,
    node: Node,
    position: Position,
    buffer: String,
    /// Bytes of `buffer` up to and including the last escaped character.
    protected_len: usize,
}

impl Frame {
    fn new() -> Self {
        Frame {
            layers: Vec::new(),
            node: Node::default(),
            position: Position::Key,
            buffer: String::new(),
            protected_len: 0,
        }
    }

    /// Move the buffer into the pending node's key or value.
    fn flush(&mut self) {
        let text = mem::take(&mut self.buffer);
        self.protected_len = 0;
        match self.position {
            Position::Key => self.node.key = Some(text),
            Position::Value => self.node.value = Some(text),
        }
    }

    fn finish_node(&mut self) {
        let node = mem::take(&mut self.node);
        push_node(&mut self.layers, node);
        self.position = Position::Key;
    }
}

/// Scan `reader` to its end into a layer list.
///
/// Blocks are tracked on an explicit frame stack. Text left in the buffer
/// when a block closes or the input ends is dropped, unterminated blocks
/// are closed at end of input, and a `}` with no open block ends the scan.
pub(super) fn scan(reader: &mut Reader, max_depth: usize) -> Result<Vec<Layer>, NdfError> {
    let mut stack = vec![Frame::new()];
    let mut escaped = false;

    while let Some(c) = reader.peek() {
        let Some(frame) = stack.last_mut() else {
            break;
        };

        if escaped {
            reader.bump();
            frame.buffer.push(c);
            frame.protected_len = frame.buffer.len();
            escaped = false;
            continue;
        }

        match c {
            '/' => {
                reader.bump();
                if reader.peek() == Some('/') {
                    reader.bump();
                    skip_line_comment(reader);
                } else {
                    frame.buffer.push('/');
                }
            }
            ':' if frame.position == Position::Key => {
                reader.bump();
                frame.flush();
                frame.position = Position::Value;
            }
            ';' => {
                reader.bump();
                frame.flush();
                frame.finish_node();
            }
            '{' => {
                reader.bump();
                trim_trailing_whitespace(&mut frame.buffer, frame.protected_len);
                frame.flush();

                if stack.len() > max_depth {
                    return Err(NdfError::NestingTooDeep {
                        depth: max_depth,
                        line: reader.line(),
                        column: reader.column(),
                        hint: Some("Flatten the document or raise ParseOptions::max_depth".into()),
                        code: Some(101),
                    });
                }
                stack.push(Frame::new());
            }
            '}' => {
                reader.bump();
                if stack.len() == 1 {
                    trace!(
                        "Unmatched '}}' at {}:{}, ignoring the rest of the input",
                        reader.line(),
                        reader.column()
                    );
                    break;
                }
                close_block(&mut stack);
            }
            '\\' => {
                reader.bump();
                escaped = true;
            }
            c if is_ndf_whitespace(c) => {
                reader.bump();
                if frame.position == Position::Value {
                    frame.buffer.push(c);
                }
            }
            c => {
                reader.bump();
                frame.buffer.push(c);
            }
        }
    }

    if stack.len() > 1 {
        trace!("{} block(s) left open at end of input", stack.len() - 1);
    }
    while stack.len() > 1 {
        close_block(&mut stack);
    }

    Ok(stack.pop().map(|frame| frame.layers).unwrap_or_default())
}

/// Hand the innermost frame's layers to the node waiting in its parent.
fn close_block(stack: &mut Vec<Frame>) {
    let Some(child) = stack.pop() else {
        return;
    };
    if let Some(parent) = stack.last_mut() {
        parent.node.children = child.layers;
        parent.finish_node();
    }
}
