//! tree-sitter external scanner bindings.
//!
//! Exposes the `tree_sitter_toon_external_scanner_*` symbols a generated
//! tree-sitter parser links against, backed by [`toon_scanner::Scanner`].
//! The external token order in the grammar must be `_indent`, `_dedent`.

use std::ffi::{c_char, c_uint, c_void};
use std::slice;

use toon_scanner::{Cursor, Scanner, ValidTokens};

/// Snapshot buffer size the tree-sitter runtime allocates.
pub const TREE_SITTER_SERIALIZATION_BUFFER_SIZE: usize = toon_scanner::SERIALIZATION_BUFFER_SIZE;

/// Number of entries in `valid_symbols`.
pub const EXTERNAL_TOKEN_COUNT: usize = 2;

/// The lexer handle tree-sitter passes to `scan`, laid out as in `tree_sitter/parser.h`.
#[repr(C)]
pub struct TSLexer {
    pub lookahead: i32,
    pub result_symbol: u16,
    pub advance: unsafe extern "C" fn(*mut TSLexer, bool),
    pub mark_end: unsafe extern "C" fn(*mut TSLexer),
    pub get_column: unsafe extern "C" fn(*mut TSLexer) -> u32,
    pub is_at_included_range_start: unsafe extern "C" fn(*const TSLexer) -> bool,
    pub eof: unsafe extern "C" fn(*const TSLexer) -> bool,
    pub log: Option<unsafe extern "C" fn(*const TSLexer, *const c_char, ...)>,
}

/// [`Cursor`] over a live `TSLexer`.
struct LexerCursor {
    lexer: *mut TSLexer,
}

impl Cursor for LexerCursor {
    fn lookahead(&self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        // SAFETY: `lexer` is valid for the duration of the scan call.
        let raw = unsafe { (*self.lexer).lookahead };
        u32::try_from(raw).ok().and_then(char::from_u32)
    }

    fn advance(&mut self) {
        // SAFETY: as above.
        unsafe { ((*self.lexer).advance)(self.lexer, false) }
    }

    fn skip(&mut self) {
        // SAFETY: as above.
        unsafe { ((*self.lexer).advance)(self.lexer, true) }
    }

    fn column(&self) -> u32 {
        // SAFETY: as above.
        unsafe { ((*self.lexer).get_column)(self.lexer) }
    }

    fn is_eof(&self) -> bool {
        // SAFETY: as above.
        unsafe { ((*self.lexer).eof)(self.lexer) }
    }

    fn mark_end(&mut self) {
        // SAFETY: as above.
        unsafe { ((*self.lexer).mark_end)(self.lexer) }
    }
}

#[no_mangle]
pub extern "C" fn tree_sitter_toon_external_scanner_create() -> *mut c_void {
    Box::into_raw(Box::new(Scanner::new())).cast()
}

/// # Safety
///
/// `payload` must come from `create` and not have been destroyed.
#[no_mangle]
pub unsafe extern "C" fn tree_sitter_toon_external_scanner_destroy(payload: *mut c_void) {
    if !payload.is_null() {
        drop(Box::from_raw(payload.cast::<Scanner>()));
    }
}

/// # Safety
///
/// `payload` must come from `create`; `buffer` must hold
/// [`TREE_SITTER_SERIALIZATION_BUFFER_SIZE`] writable bytes.
#[no_mangle]
pub unsafe extern "C" fn tree_sitter_toon_external_scanner_serialize(
    payload: *mut c_void,
    buffer: *mut c_char,
) -> c_uint {
    let Some(scanner) = payload.cast::<Scanner>().as_ref() else {
        return 0;
    };
    if buffer.is_null() {
        return 0;
    }
    let buffer = slice::from_raw_parts_mut(buffer.cast::<u8>(), TREE_SITTER_SERIALIZATION_BUFFER_SIZE);
    scanner.serialize(buffer) as c_uint
}

/// # Safety
///
/// `payload` must come from `create`; `buffer` must hold `length` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn tree_sitter_toon_external_scanner_deserialize(
    payload: *mut c_void,
    buffer: *const c_char,
    length: c_uint,
) {
    let Some(scanner) = payload.cast::<Scanner>().as_mut() else {
        return;
    };
    let bytes = if length == 0 || buffer.is_null() {
        &[][..]
    } else {
        slice::from_raw_parts(buffer.cast::<u8>(), length as usize)
    };
    scanner.deserialize(bytes);
}

/// # Safety
///
/// `payload` must come from `create`; `lexer` must be the runtime's lexer;
/// `valid_symbols` must hold [`EXTERNAL_TOKEN_COUNT`] entries.
#[no_mangle]
pub unsafe extern "C" fn tree_sitter_toon_external_scanner_scan(
    payload: *mut c_void,
    lexer: *mut TSLexer,
    valid_symbols: *const bool,
) -> bool {
    let Some(scanner) = payload.cast::<Scanner>().as_mut() else {
        return false;
    };
    if lexer.is_null() {
        return false;
    }
    let valid = if valid_symbols.is_null() {
        ValidTokens::NONE
    } else {
        ValidTokens::from_symbols(slice::from_raw_parts(valid_symbols, EXTERNAL_TOKEN_COUNT))
    };

    let mut cursor = LexerCursor { lexer };
    match scanner.scan(&mut cursor, valid) {
        Some(kind) => {
            (*lexer).result_symbol = kind.symbol();
            true
        }
        None => false,
    }
}
