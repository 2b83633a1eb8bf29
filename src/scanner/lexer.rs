use crate::error::{LexError, LexErrorKind};
use crate::scanner::token::{Token, TokenKind, keyword_kind};

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_ident(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Scan the whole source, stopping at the first error. Errors carry the
/// 1-based line/column of the offending construct.
pub fn scan_all(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).scan()
}

/// Cursor over the source characters. Single-use: consumed by [`Lexer::scan`].
///
/// `current` is `None` until the first `advance`, and again once the input is
/// exhausted. `line`/`column` bookkeeping happens in `advance`: the column
/// counter resets exactly when the newly current character is a newline, so
/// the newline itself occupies column 1 of the line it opens.
struct Lexer {
    chars: Vec<char>,
    next: usize,
    offset: usize,
    line: u32,
    column: u32,
    current: Option<char>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            next: 0,
            offset: 0,
            line: 1,
            column: 0,
            current: None,
        }
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current {
            self.offset += ch.len_utf8();
        }
        self.current = self.chars.get(self.next).copied();
        self.next += 1;
        self.column += 1;
        if self.current == Some('\n') {
            self.line += 1;
            self.column = 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.next).copied()
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.line, self.column, self.offset)
    }

    /// Emit a one-character token and move past it.
    fn single(&mut self, kind: TokenKind, ch: char) -> Token {
        let token = Token::new(kind, ch, self.column, self.line);
        self.advance();
        token
    }

    /// Emit a two-character token (current + lookahead) and move past both.
    fn double(&mut self, kind: TokenKind, ch: char) -> Token {
        let mut literal = String::from(ch);
        if let Some(next) = self.peek() {
            literal.push(next);
        }
        let token = Token::new(kind, literal, self.column, self.line);
        self.advance();
        self.advance();
        token
    }

    fn scan(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        self.advance();

        while let Some(ch) = self.current {
            match ch {
                ' ' | '\n' | '\r' | '\t' => self.advance(),
                '[' | '(' => tokens.push(self.single(TokenKind::OpenBracket, ch)),
                ']' | ')' => tokens.push(self.single(TokenKind::CloseBracket, ch)),
                '$' => tokens.push(self.single(TokenKind::Pipe, ch)),
                ';' => tokens.push(self.single(TokenKind::Semicolon, ch)),
                '+' => tokens.push(self.single(TokenKind::Plus, ch)),
                '-' if self.peek().is_some_and(is_digit) => {
                    tokens.push(self.collect_number(true)?)
                }
                '-' => tokens.push(self.single(TokenKind::Hyphen, ch)),
                '*' => tokens.push(self.single(TokenKind::Asterisk, ch)),
                '/' => match self.peek() {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => self.skip_block_comment()?,
                    _ => tokens.push(self.single(TokenKind::ForwardSlash, ch)),
                },
                '%' => tokens.push(self.single(TokenKind::Percent, ch)),
                '&' => tokens.push(self.single(TokenKind::BitAnd, ch)),
                '|' => tokens.push(self.single(TokenKind::BitOr, ch)),
                '^' => tokens.push(self.single(TokenKind::BitXOR, ch)),
                '=' => match self.peek() {
                    Some('>') => tokens.push(self.double(TokenKind::GreaterThanOrEqualTo, ch)),
                    Some('<') => tokens.push(self.double(TokenKind::LesserThanOrEqualTo, ch)),
                    Some('=') => tokens.push(self.double(TokenKind::Equals, ch)),
                    _ => tokens.push(self.single(TokenKind::Assign, ch)),
                },
                '>' => match self.peek() {
                    Some('=') => tokens.push(self.double(TokenKind::GreaterThanOrEqualTo, ch)),
                    _ => tokens.push(self.single(TokenKind::GreaterThan, ch)),
                },
                '<' => match self.peek() {
                    Some('=') => tokens.push(self.double(TokenKind::LesserThanOrEqualTo, ch)),
                    _ => tokens.push(self.single(TokenKind::LesserThan, ch)),
                },
                '!' if self.peek() == Some('=') => {
                    tokens.push(self.double(TokenKind::NotEquals, ch))
                }
                '"' => tokens.push(self.collect_string(false)?),
                '\'' => tokens.push(self.collect_string(true)?),
                // An underscore directly before a digit routes to the number
                // collector so its leading-underscore check can reject it.
                '_' if self.peek().is_some_and(is_digit) => {
                    tokens.push(self.collect_number(false)?)
                }
                c if is_digit(c) => tokens.push(self.collect_number(false)?),
                c if is_ident(c) => tokens.push(self.collect_ident(false)),
                '#' if self.peek().is_some_and(is_ident) => {
                    self.advance();
                    tokens.push(self.collect_ident(false));
                }
                '@' if self.peek().is_some_and(is_ident) => {
                    tokens.push(self.collect_ident(true))
                }
                c => return Err(self.error(LexErrorKind::IllegalCharacter(c))),
            }
        }

        Ok(tokens)
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.current {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let line = self.line;
        let column = self.column;
        let offset = self.offset;

        while self.current.is_some() {
            if self.current == Some('*') && self.peek() == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::new(
            LexErrorKind::UnterminatedComment,
            line,
            column,
            offset,
        ))
    }

    /// Digits, `_` grouping separators, and at most one `.`; a second `.`
    /// ends the literal. Underscores are stripped from the emitted literal.
    fn collect_number(&mut self, negative: bool) -> Result<Token, LexError> {
        let line = self.line;
        let column = self.column;
        let offset = self.offset;

        if negative {
            self.advance();
        }

        let mut text = String::new();
        let mut dot = false;

        while let Some(ch) = self.current {
            if !(is_digit(ch) || ch == '_' || ch == '.') {
                break;
            }
            if ch == '.' {
                if dot {
                    break;
                }
                dot = true;
            }
            if ch == '_' && dot {
                return Err(self.error(LexErrorKind::IllegalCharacter('_')));
            }
            text.push(ch);
            self.advance();
        }

        if text.starts_with('_') {
            return Err(LexError::new(
                LexErrorKind::LeadingUnderscore,
                line,
                column,
                offset,
            ));
        }
        if text.ends_with('_') {
            return Err(LexError::new(
                LexErrorKind::TrailingUnderscore,
                line,
                column,
                offset,
            ));
        }

        let mut literal = text.replace('_', "");
        if negative {
            literal.insert(0, '-');
        }

        Ok(Token::new(TokenKind::Number, literal, column, line))
    }

    /// Identifier characters plus embedded `.`. Keywords win over both the
    /// plain and the funcall form.
    fn collect_ident(&mut self, funcall: bool) -> Token {
        let line = self.line;
        let column = self.column;

        if funcall {
            self.advance();
        }

        let mut text = String::new();
        while let Some(ch) = self.current {
            if !(is_ident(ch) || ch == '.') {
                break;
            }
            text.push(ch);
            self.advance();
        }

        let kind = keyword_kind(&text).unwrap_or(if funcall {
            TokenKind::Funcall
        } else {
            TokenKind::Ident
        });

        Token::new(kind, text, column, line)
    }

    fn collect_string(&mut self, is_char: bool) -> Result<Token, LexError> {
        let line = self.line;
        let column = self.column;
        let offset = self.offset;
        let delimiter = if is_char { '\'' } else { '"' };

        self.advance();

        let mut text = String::new();
        let mut escaped = false;

        while let Some(ch) = self.current {
            if ch == '\n' || (!escaped && ch == delimiter) {
                break;
            }
            if escaped {
                match ch {
                    '\\' | '"' | '\'' => text.push(ch),
                    'n' => text.push('\n'),
                    'r' => text.push('\r'),
                    't' => text.push('\t'),
                    '0' => text.push('\0'),
                    other => {
                        return Err(LexError::new(
                            LexErrorKind::InvalidEscape(other),
                            line,
                            column,
                            offset,
                        ));
                    }
                }
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else {
                text.push(ch);
            }
            self.advance();
        }

        if self.current != Some(delimiter) {
            let kind = if is_char {
                LexErrorKind::UnterminatedChar
            } else {
                LexErrorKind::UnterminatedString
            };
            return Err(LexError::new(kind, line, column, offset));
        }

        if is_char && text.chars().count() != 1 {
            return Err(LexError::new(
                LexErrorKind::InvalidCharLiteral,
                line,
                self.column - 1,
                offset,
            ));
        }

        self.advance();

        let kind = if is_char {
            TokenKind::Char
        } else {
            TokenKind::String
        };

        Ok(Token::new(kind, text, column, line))
    }
}
