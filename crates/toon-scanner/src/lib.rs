//! TOON indentation scanner
//!
//! Turns leading whitespace at line starts into synthetic INDENT and DEDENT
//! tokens for an external parsing engine. The engine owns everything else
//! (keys, scalars, punctuation); the scanner only answers whether the
//! current position opens or closes a nesting level.
//!
//! Scanner state is a stack of indent levels that can be snapshotted into a
//! bounded byte buffer and restored, so a host can rewind for incremental
//! re-parses and speculative branches.
//!
//! # Example
//!
//! ```
//! use toon_scanner::{Scanner, StrCursor, TokenKind, ValidTokens};
//!
//! let mut scanner = Scanner::new();
//! let mut cursor = StrCursor::new("a:\n  b: 1");
//! cursor.reset_to(2);
//! assert_eq!(scanner.scan(&mut cursor, ValidTokens::ALL), Some(TokenKind::Indent));
//! assert_eq!(scanner.stack().widths(), vec![0, 2]);
//! ```

pub mod codec;
pub mod config;
pub mod cursor;
pub mod driver;
pub mod indent;
pub mod measure;
pub mod scanner;
pub mod token;

pub use config::{RecordLayout, ScannerConfig, SERIALIZATION_BUFFER_SIZE};
pub use cursor::{Cursor, StrCursor};
pub use indent::{IndentContext, IndentDescriptor, IndentStack};
pub use scanner::Scanner;
pub use token::{TokenKind, ValidTokens};

/// Invalid scanner configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("list marker {0:?} is indentation whitespace or a line break")]
    InvalidListMarker(char),
}
