//! Leading-whitespace measurement.
//!
//! A space adds one column. A tab rounds the width up to the next even
//! number (`(width + 2) & !1`), so tab stops fall every two columns.

use crate::cursor::Cursor;

/// Width after passing over `ch`, or `None` if `ch` is not indentation.
pub fn advance_width(width: u32, ch: char) -> Option<u32> {
    match ch {
        ' ' => Some(width + 1),
        '\t' => Some((width + 2) & !1),
        _ => None,
    }
}

/// Width of a whitespace prefix. Stops at the first non-indentation character.
pub fn measure_str(text: &str) -> u32 {
    let mut width = 0;
    for ch in text.chars() {
        match advance_width(width, ch) {
            Some(next) => width = next,
            None => break,
        }
    }
    width
}

/// Skip spaces and tabs under the cursor and return their width.
///
/// Leaves the cursor on the first other character, a line break, or end of input.
pub fn measure_whitespace<C: Cursor + ?Sized>(cursor: &mut C) -> u32 {
    let mut width = 0;
    while let Some(next) = cursor.lookahead().and_then(|ch| advance_width(width, ch)) {
        width = next;
        cursor.skip();
    }
    width
}

pub fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}
