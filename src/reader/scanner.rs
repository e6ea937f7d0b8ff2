use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(reader: &mut Reader) -> Option<char> {
    let curr = reader.peek;
    if let Some(c) = curr {
        if c == '\n' {
            reader.line += 1;
            reader.column = 0;
        } else {
            reader.column += 1;
        }
    }
    reader.peek = reader.input.next();
    curr
}

/// Discard a `//` comment body up to and including the terminating newline.
///
/// Expects the opening `//` to be consumed already.
pub(crate) fn skip_line_comment(reader: &mut Reader) {
    while let Some(ch) = bump(reader) {
        if ch == '\n' {
            break;
        }
    }
}
