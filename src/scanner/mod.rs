pub mod lexer;
pub mod token;

use crate::error::LexError;
use token::Token;

/// Scan source code into a list of tokens.
///
/// The first lexical error aborts the scan; no partial token sequence is
/// produced. The error is returned with the source attached for diagnostics.
pub fn scan(source: &str) -> Result<Vec<Token>, LexError> {
    lexer::scan_all(source).map_err(|e| e.with_source_code("input", source))
}
