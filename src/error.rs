use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::runtime::value::Operation;
use crate::scanner::token::TokenKind;

// ============= Lexical errors (with miette diagnostics) =============

/// A fatal scan error. The first one aborts lexing; there is no recovery and
/// no partial token sequence.
#[derive(Error, Debug, Diagnostic)]
#[error("error on line {line}, col {column}: {kind}")]
#[diagnostic(code(opal::lex))]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: u32,
    pub column: u32,
    #[label("here")]
    pub span: SourceSpan,
    #[source_code]
    src: NamedSource<String>,
}

impl LexError {
    pub(crate) fn new(kind: LexErrorKind, line: u32, column: u32, offset: usize) -> Self {
        Self {
            kind,
            line,
            column,
            span: SourceSpan::new(offset.into(), 1),
            src: NamedSource::new("input", String::new()),
        }
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            src: NamedSource::new(name, source.into()),
            ..self
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("illegal character '{0}'")]
    IllegalCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("invalid character literal")]
    InvalidCharLiteral,
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    #[error("unterminated multiline comment")]
    UnterminatedComment,
    #[error("number literals cannot start with underscores")]
    LeadingUnderscore,
    #[error("number literals cannot end with underscores")]
    TrailingUnderscore,
}

// ============= Token conversion errors =============

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token kind {kind} has no literal value")]
    NoLiteralValue { kind: TokenKind },

    #[error("invalid number literal '{literal}'")]
    InvalidNumber {
        literal: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

// ============= Value-operation errors (simple, no miette) =============

/// A recoverable failure from a binary operation on runtime values. The
/// evaluator decides whether to report and continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("type '{type_name}' does not support {operation}")]
    UnsupportedOperation {
        type_name: &'static str,
        operation: Operation,
    },

    #[error("cannot apply {operation} to lists of lengths {left} and {right}")]
    LengthMismatch {
        operation: Operation,
        left: usize,
        right: usize,
    },

    #[error("cannot pop from an empty list")]
    EmptyPop,
}

// ============= Tests =============

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display_format() {
        let err = LexError::new(LexErrorKind::IllegalCharacter('?'), 3, 7, 12);
        assert_eq!(err.to_string(), "error on line 3, col 7: illegal character '?'");
    }

    #[test]
    fn lex_error_implements_diagnostic() {
        let err = LexError::new(LexErrorKind::UnterminatedString, 1, 1, 0);
        let diag: &dyn Diagnostic = &err;
        assert!(diag.code().is_some());
    }

    #[test]
    fn lex_error_with_source() {
        let err = LexError::new(LexErrorKind::UnterminatedComment, 1, 1, 0)
            .with_source_code("test.opal", "/* never closed");
        assert_eq!(
            err.to_string(),
            "error on line 1, col 1: unterminated multiline comment"
        );
    }

    #[test]
    fn underscore_error_messages() {
        let leading = LexError::new(LexErrorKind::LeadingUnderscore, 1, 1, 0);
        let trailing = LexError::new(LexErrorKind::TrailingUnderscore, 1, 1, 0);
        assert_eq!(
            leading.to_string(),
            "error on line 1, col 1: number literals cannot start with underscores"
        );
        assert_eq!(
            trailing.to_string(),
            "error on line 1, col 1: number literals cannot end with underscores"
        );
    }

    #[test]
    fn token_error_names_the_kind() {
        let err = TokenError::NoLiteralValue {
            kind: TokenKind::Semicolon,
        };
        assert_eq!(err.to_string(), "token kind Semicolon has no literal value");
    }

    #[test]
    fn value_error_names_type_and_operation() {
        let err = ValueError::UnsupportedOperation {
            type_name: "fun",
            operation: Operation::Add,
        };
        assert_eq!(err.to_string(), "type 'fun' does not support addition");
    }

    #[test]
    fn length_mismatch_message() {
        let err = ValueError::LengthMismatch {
            operation: Operation::Mul,
            left: 2,
            right: 5,
        };
        assert_eq!(
            err.to_string(),
            "cannot apply multiplication to lists of lengths 2 and 5"
        );
    }
}
