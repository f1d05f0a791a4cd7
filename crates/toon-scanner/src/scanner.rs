use std::cmp::Ordering;

use crate::codec;
use crate::config::{ScannerConfig, SERIALIZATION_BUFFER_SIZE};
use crate::cursor::Cursor;
use crate::indent::{IndentContext, IndentStack};
use crate::measure::{is_line_break, measure_whitespace};
use crate::token::{TokenKind, ValidTokens};

/// Indentation scanner.
///
/// Owns the indent stack for one document and answers the host's token
/// requests. Each request either emits one INDENT or DEDENT or declines,
/// and pops at most one level, so a line that closes several levels is
/// answered by several requests at the same position.
///
/// Only INDENT and end-of-input DEDENT commit the skipped line breaks and
/// whitespace. An ordinary DEDENT leaves the token end where the request
/// started, so the host re-scans the same prefix on the next request.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    stack: IndentStack,
    config: ScannerConfig,
}

/// What the prefix skip found before the first content character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LinePrefix {
    width: u32,
    crossed_line_break: bool,
}

impl Scanner {
    /// Create a scanner whose stack holds only the top-level sentinel.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        Self {
            stack: IndentStack::new(),
            config,
        }
    }

    pub fn stack(&self) -> &IndentStack {
        &self.stack
    }

    /// Decide whether an INDENT or DEDENT belongs at the cursor.
    ///
    /// Returns `None` to decline; the host then lexes the input itself.
    /// On `Some`, the token ends at the cursor's last marked end.
    pub fn scan<C: Cursor + ?Sized>(&mut self, cursor: &mut C, valid: ValidTokens) -> Option<TokenKind> {
        cursor.mark_end();
        let start_column = cursor.column();
        let prefix = Self::skip_prefix(cursor);

        if cursor.is_eof() {
            if valid.dedent && self.stack.pop().is_some() {
                cursor.mark_end();
                tracing::trace!(depth = self.stack.depth(), "dedent at end of input");
                return Some(TokenKind::Dedent);
            }
            return None;
        }

        // Mid-line whitespace never carries indentation.
        if !prefix.crossed_line_break && start_column != 0 {
            return None;
        }

        let top = self.stack.top().width;
        match prefix.width.cmp(&top) {
            Ordering::Greater if valid.indent => {
                let context = self.context_at(cursor);
                self.stack.push(prefix.width, context);
                cursor.mark_end();
                tracing::trace!(width = prefix.width, ?context, "indent");
                Some(TokenKind::Indent)
            }
            Ordering::Less if valid.dedent => {
                self.stack.pop();
                tracing::trace!(width = prefix.width, top, "dedent");
                Some(TokenKind::Dedent)
            }
            _ => {
                tracing::trace!(width = prefix.width, top, "decline");
                None
            }
        }
    }

    /// Skip line breaks and whitespace-only lines, measuring the last line's indent.
    fn skip_prefix<C: Cursor + ?Sized>(cursor: &mut C) -> LinePrefix {
        let mut crossed_line_break = false;
        loop {
            let width = measure_whitespace(cursor);
            match cursor.lookahead() {
                Some(ch) if is_line_break(ch) => {
                    cursor.skip();
                    crossed_line_break = true;
                }
                _ => {
                    return LinePrefix {
                        width,
                        crossed_line_break,
                    }
                }
            }
        }
    }

    fn context_at<C: Cursor + ?Sized>(&self, cursor: &C) -> IndentContext {
        if self.config.tracks_context() && cursor.lookahead() == Some(self.config.list_marker()) {
            IndentContext::ListItem
        } else {
            IndentContext::Normal
        }
    }

    /// Write the stack into `buffer`, dropping whole records that do not fit.
    pub fn serialize(&self, buffer: &mut [u8]) -> usize {
        codec::serialize(&self.stack, self.config.record_layout(), buffer)
    }

    /// Replace the stack with the one stored in `bytes`.
    pub fn deserialize(&mut self, bytes: &[u8]) {
        self.stack = codec::deserialize(bytes, self.config.record_layout());
        tracing::trace!(depth = self.stack.depth(), len = bytes.len(), "restored");
    }

    /// Serialize into a buffer of the host's maximum snapshot size.
    pub fn snapshot(&self) -> Vec<u8> {
        let mut buffer = vec![0u8; SERIALIZATION_BUFFER_SIZE];
        let len = self.serialize(&mut buffer);
        buffer.truncate(len);
        buffer
    }
}
