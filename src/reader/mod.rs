// Author: Dustin Pilgrim
// License: MIT

use std::str::Chars;

mod scanner;

pub(crate) use scanner::skip_line_comment;

/// Pull-style character source with one character of lookahead.
pub struct Reader<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut reader = Reader {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 0,
        };
        reader.peek = reader.input.next();
        reader
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Look at the next character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.peek
    }

    /// Consume the next character
    pub fn bump(&mut self) -> Option<char> {
        scanner::bump(self)
    }

    pub fn is_eof(&self) -> bool {
        self.peek.is_none()
    }
}
