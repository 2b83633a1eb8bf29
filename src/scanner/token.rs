use std::fmt;

use serde::Serialize;

use crate::error::TokenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum TokenKind {
    /// Placeholder kind carried by [`Token::empty`]; never produced by a
    /// successful scan.
    None,

    // Literals
    Number,
    String,
    Char,
    Bool,

    // Names
    Ident,
    Funcall,

    // Brackets. Square brackets and parentheses share one kind pair; the
    // literal records which shape was written.
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,

    // Keywords
    Fun,
    If,
    Else,

    Semicolon,
    Assign,
    Pipe,

    // Operators
    Plus,
    Concat,
    Hyphen,
    Asterisk,
    ForwardSlash,
    Percent,

    // Comparisons. Both `=>` and `>=` scan as GreaterThanOrEqualTo, and both
    // `=<` and `<=` as LesserThanOrEqualTo; the kind names follow the token
    // contract the parser consumes, even though the `=>`/`=<` spellings read
    // like the opposite comparison.
    Equals,
    NotEquals,
    GreaterThan,
    LesserThan,
    GreaterThanOrEqualTo,
    LesserThanOrEqualTo,

    And,
    Or,
    BitAnd,
    BitOr,
    BitXOR,
}

/// Map a scanned identifier to its keyword kind, if it is one.
pub fn keyword_kind(ident: &str) -> Option<TokenKind> {
    match ident {
        "True" | "False" => Some(TokenKind::Bool),
        "fun" => Some(TokenKind::Fun),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        _ => None,
    }
}

/// A classified lexical unit with its 1-based source position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub column: u32,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, column: u32, line: u32) -> Self {
        Self {
            kind,
            literal: literal.into(),
            column,
            line,
        }
    }

    /// A token with no valid position, for parser-synthesized tokens.
    pub fn with_literal(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self::new(kind, literal, 0, 0)
    }

    /// The distinguished none token: no kind, no literal, no valid position.
    pub fn empty() -> Self {
        Self::with_literal(TokenKind::None, "")
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_literal(&self, literal: &str) -> bool {
        self.literal == literal
    }

    /// Interpret the literal text according to the token kind.
    ///
    /// Defined for `Number` (parsed as `f32`), `String` (raw pass-through),
    /// and `Bool` (`True`-equality); every other kind carries no literal
    /// value and yields a typed error.
    pub fn convert(&self) -> Result<Literal, TokenError> {
        match self.kind {
            TokenKind::Number => self
                .literal
                .parse::<f32>()
                .map(Literal::Number)
                .map_err(|source| TokenError::InvalidNumber {
                    literal: self.literal.clone(),
                    source,
                }),
            TokenKind::String => Ok(Literal::Str(self.literal.clone())),
            TokenKind::Bool => Ok(Literal::Bool(self.literal == "True")),
            kind => Err(TokenError::NoLiteralValue { kind }),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, '{}', {}, {}}}",
            self.kind, self.literal, self.column, self.line
        )
    }
}

/// The natural literal value of a token, produced by [`Token::convert`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Number(f32),
    Str(String),
    Bool(bool),
}
