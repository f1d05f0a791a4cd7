//! Reference host loop.
//!
//! Drives a [`Scanner`] over a whole string the way a tree-sitter parse
//! would: the scanner gets the first chance at every position, and when it
//! declines the host lexes one token of its own. The host side is
//! deliberately coarse (line breaks and whole-line content) since the real
//! grammar lives elsewhere.

use crate::config::ScannerConfig;
use crate::cursor::{Cursor, StrCursor};
use crate::measure::is_line_break;
use crate::scanner::Scanner;
use crate::token::{TokenKind, ValidTokens};

/// Character range of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostTokenKind {
    Indent,
    Dedent,
    Newline,
    /// Rest of a line, trailing whitespace trimmed.
    Content(String),
}

impl From<TokenKind> for HostTokenKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Indent => HostTokenKind::Indent,
            TokenKind::Dedent => HostTokenKind::Dedent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: HostTokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: HostTokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Tokenize `source` with the default configuration.
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_with(source, ScannerConfig::default())
}

pub fn tokenize_with(source: &str, config: ScannerConfig) -> Vec<Token> {
    let mut scanner = Scanner::with_config(config);
    let mut cursor = StrCursor::new(source);
    let mut tokens = Vec::new();
    let mut pos = 0;

    loop {
        cursor.reset_to(pos);
        if let Some(kind) = scanner.scan(&mut cursor, ValidTokens::ALL) {
            let end = cursor.marked_end();
            tokens.push(Token::new(kind.into(), Span::new(cursor.token_start().min(end), end)));
            pos = end;
            continue;
        }

        cursor.reset_to(pos);
        match lex_host_token(&mut cursor) {
            Some(token) => {
                pos = token.span.end;
                tokens.push(token);
            }
            None => break,
        }
    }

    tokens
}

/// Lex one token the scanner declined to produce. `None` at end of input.
fn lex_host_token(cursor: &mut StrCursor) -> Option<Token> {
    while matches!(cursor.lookahead(), Some(' ' | '\t')) {
        cursor.skip();
    }

    let start = cursor.position();
    match cursor.lookahead()? {
        '\r' => {
            cursor.advance();
            if cursor.lookahead() == Some('\n') {
                cursor.advance();
            }
        }
        '\n' => cursor.advance(),
        _ => {
            while cursor.lookahead().is_some_and(|ch| !is_line_break(ch)) {
                cursor.advance();
            }
            let text = cursor.slice(start, cursor.position());
            let content = text.trim_end_matches([' ', '\t']).to_string();
            return Some(Token::new(
                HostTokenKind::Content(content),
                Span::new(start, cursor.position()),
            ));
        }
    }
    Some(Token::new(
        HostTokenKind::Newline,
        Span::new(start, cursor.position()),
    ))
}

/// INDENT/DEDENT totals for a token stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Structure {
    pub indents: usize,
    pub dedents: usize,
    pub max_depth: usize,
    /// Offsets of the first content character on lines whose indentation
    /// matches no open level.
    pub misaligned: Vec<usize>,
}

impl Structure {
    pub fn is_balanced(&self) -> bool {
        self.indents == self.dedents
    }

    /// Balanced, and every dedent lands on a width opened earlier.
    pub fn is_well_formed(&self) -> bool {
        self.is_balanced() && self.misaligned.is_empty()
    }
}

pub fn structure(tokens: &[Token]) -> Structure {
    let mut summary = Structure::default();
    let mut depth = 0usize;
    let mut previous: Option<&HostTokenKind> = None;
    for token in tokens {
        match token.kind {
            HostTokenKind::Indent => {
                // A dedent straight into an indent means the line sits
                // between two levels.
                if previous == Some(&HostTokenKind::Dedent) {
                    summary.misaligned.push(token.span.end);
                }
                summary.indents += 1;
                depth += 1;
                summary.max_depth = summary.max_depth.max(depth);
            }
            HostTokenKind::Dedent => {
                summary.dedents += 1;
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        previous = Some(&token.kind);
    }
    summary
}

/// 1-based line and column of a character offset.
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for ch in source.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}
