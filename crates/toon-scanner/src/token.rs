/// Synthetic structural tokens produced by the indentation scanner.
///
/// The discriminants match the order of the grammar's `externals` list,
/// which is how a tree-sitter host indexes `valid_symbols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TokenKind {
    Indent = 0,
    Dedent = 1,
}

impl TokenKind {
    /// Symbol id as seen by the host.
    pub fn symbol(self) -> u16 {
        self as u16
    }
}

/// The set of token kinds the host grammar currently accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidTokens {
    pub indent: bool,
    pub dedent: bool,
}

impl ValidTokens {
    /// Both INDENT and DEDENT acceptable.
    pub const ALL: ValidTokens = ValidTokens {
        indent: true,
        dedent: true,
    };

    /// Neither kind acceptable; every request declines.
    pub const NONE: ValidTokens = ValidTokens {
        indent: false,
        dedent: false,
    };

    pub fn only(kind: TokenKind) -> Self {
        let mut valid = Self::NONE;
        match kind {
            TokenKind::Indent => valid.indent = true,
            TokenKind::Dedent => valid.dedent = true,
        }
        valid
    }

    /// Build from a host `valid_symbols` slice indexed by [`TokenKind::symbol`].
    /// Missing entries count as not acceptable.
    pub fn from_symbols(symbols: &[bool]) -> Self {
        Self {
            indent: symbols.get(TokenKind::Indent as usize).copied().unwrap_or(false),
            dedent: symbols.get(TokenKind::Dedent as usize).copied().unwrap_or(false),
        }
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::Indent => self.indent,
            TokenKind::Dedent => self.dedent,
        }
    }
}
