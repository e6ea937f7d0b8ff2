// Author: Dustin Pilgrim
// License: MIT

/// Characters discarded in key position and trimmed before a `{`.
pub fn is_ndf_whitespace(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\t' | '\0' | ' ')
}

/// Characters with structural meaning anywhere in the input.
pub fn is_delimiter(c: char) -> bool {
    matches!(c, ';' | '{' | '}' | '\\')
}

/// Strip the grammar's whitespace set from the end of `buffer` in place,
/// never cutting into the first `protected` bytes.
pub fn trim_trailing_whitespace(buffer: &mut String, protected: usize) {
    let kept = buffer.trim_end_matches(is_ndf_whitespace).len().max(protected);
    buffer.truncate(kept);
}
