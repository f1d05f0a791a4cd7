//! The host's character cursor, injected into every scan request.

/// Character access the scanner needs from its host.
///
/// Mirrors the tree-sitter lexer interface: characters passed over with
/// [`Cursor::skip`] are excluded from the token, characters passed over with
/// [`Cursor::advance`] are part of it, and only [`Cursor::mark_end`] decides
/// where the emitted token actually ends. A host that gets a token back
/// resumes from the marked end, so anything read past it is re-read later.
pub trait Cursor {
    /// Current character, `None` at end of input.
    fn lookahead(&self) -> Option<char>;

    /// Consume the current character into the token.
    fn advance(&mut self);

    /// Pass over the current character as whitespace.
    fn skip(&mut self);

    /// Zero-based column of the current character.
    fn column(&self) -> u32;

    fn is_eof(&self) -> bool;

    /// Commit: the token ends at the current position.
    fn mark_end(&mut self);
}

/// In-memory cursor over a string, for hosts that hold the whole source.
///
/// Positions are character offsets.
#[derive(Debug, Clone)]
pub struct StrCursor {
    chars: Vec<char>,
    pos: usize,
    column: u32,
    token_start: usize,
    marked_end: usize,
}

impl StrCursor {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            column: 0,
            token_start: 0,
            marked_end: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Start of the current token: the request position plus anything skipped.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Position of the last [`Cursor::mark_end`].
    pub fn marked_end(&self) -> usize {
        self.marked_end
    }

    /// Move to `pos` and begin a fresh token request there.
    pub fn reset_to(&mut self, pos: usize) {
        let pos = pos.min(self.chars.len());
        self.pos = pos;
        self.token_start = pos;
        self.marked_end = pos;
        self.column = self.column_at(pos);
    }

    /// Character at an absolute position.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    /// Text between two positions.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    fn column_at(&self, pos: usize) -> u32 {
        let line_start = self.chars[..pos]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        (pos - line_start) as u32
    }

    fn step(&mut self) {
        if let Some(c) = self.char_at(self.pos) {
            self.pos += 1;
            if c == '\n' {
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }
}

impl Cursor for StrCursor {
    fn lookahead(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    fn advance(&mut self) {
        self.step();
    }

    fn skip(&mut self) {
        self.step();
        self.token_start = self.pos;
    }

    fn column(&self) -> u32 {
        self.column
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn mark_end(&mut self) {
        self.marked_end = self.pos;
    }
}
