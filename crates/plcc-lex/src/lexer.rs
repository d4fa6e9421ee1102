//! Main lexer implementation.
//!
//! Classification rules, tested at each position in order: whitespace is
//! skipped; a letter or underscore starts an identifier; a digit (or a
//! sign immediately followed by a digit) starts a number; `'` and `"`
//! start character and string literals; anything else is an operator,
//! longest match first.

use plcc_util::{ParseError, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Escape characters permitted after a backslash in character and string
/// literals.
const ESCAPES: [char; 7] = ['b', 'n', 'r', 't', '\'', '"', '\\'];

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Lexer for PLC source code.
///
/// Produces tokens on demand via [`Lexer::next_token`]; [`tokenize`] drains
/// the whole stream at once.
///
/// # Example
///
/// ```
/// use plcc_lex::{tokenize, TokenKind};
///
/// let tokens = tokenize("LET x = 1;").unwrap();
/// assert_eq!(tokens.len(), 5);
/// assert_eq!(tokens[0].kind, TokenKind::Identifier);
/// assert_eq!(tokens[0].lexeme, "LET");
/// ```
pub struct Lexer<'src> {
    /// Character cursor for source traversal.
    cursor: Cursor<'src>,
}

/// Lex an entire source string into a token sequence.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer over the given source code.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Returns the next token, or `None` at the end of the source.
    ///
    /// Fails on an unterminated character or string literal, an invalid
    /// escape, or a literal line break inside a string; the error index is
    /// the byte offset of the offending character.
    pub fn next_token(&mut self) -> Result<Option<Token<'src>>, ParseError> {
        self.skip_whitespace();

        if self.cursor.is_at_end() {
            return Ok(None);
        }

        let start = self.cursor.position();
        let c = self.cursor.current_char();

        let kind = if is_ident_start(c) {
            self.lex_identifier()
        } else if c.is_ascii_digit()
            || ((c == '+' || c == '-') && self.cursor.peek_char(1).is_ascii_digit())
        {
            self.lex_number()
        } else if c == '\'' {
            self.lex_character()?
        } else if c == '"' {
            self.lex_string()?
        } else {
            self.lex_operator()
        };

        let lexeme = self.cursor.slice_from(start);
        let span = Span::new(start, self.cursor.position());
        Ok(Some(Token::new(kind, lexeme, span)))
    }

    fn skip_whitespace(&mut self) {
        while self.cursor.current_char().is_whitespace() && !self.cursor.is_at_end() {
            self.cursor.advance();
        }
    }

    /// `[A-Za-z_][A-Za-z0-9_-]*`
    fn lex_identifier(&mut self) -> TokenKind {
        self.cursor.advance();
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        TokenKind::Identifier
    }

    /// Optional sign, digits, and an optional fraction. A `.` not followed
    /// by a digit is left for the next token.
    fn lex_number(&mut self) -> TokenKind {
        if self.cursor.current_char() == '+' || self.cursor.current_char() == '-' {
            self.cursor.advance();
        }
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            TokenKind::Decimal
        } else {
            TokenKind::Integer
        }
    }

    /// `'` then exactly one content character (plain or escaped) then `'`.
    fn lex_character(&mut self) -> Result<TokenKind, ParseError> {
        self.cursor.advance();

        match self.cursor.current_char() {
            '\0' if self.cursor.is_at_end() => {
                return Err(self.error_here("unterminated character literal"));
            }
            '\'' => return Err(self.error_here("empty character literal")),
            '\\' => {
                self.cursor.advance();
                self.expect_escape()?;
            }
            _ => self.cursor.advance(),
        }

        if self.cursor.current_char() != '\'' {
            return Err(self.error_here("unterminated character literal"));
        }
        self.cursor.advance();
        Ok(TokenKind::Character)
    }

    /// `"` then content characters (plain or escaped) then `"`. A literal
    /// line break terminates the literal with an error.
    fn lex_string(&mut self) -> Result<TokenKind, ParseError> {
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_here("unterminated string literal"));
            }
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    return Ok(TokenKind::String);
                }
                '\n' => return Err(self.error_here("unterminated string literal")),
                '\\' => {
                    self.cursor.advance();
                    self.expect_escape()?;
                }
                _ => self.cursor.advance(),
            }
        }
    }

    /// `;`, one of the two-character operators `<= >= == != && ||`, or any
    /// single non-whitespace character.
    fn lex_operator(&mut self) -> TokenKind {
        let c = self.cursor.current_char();
        let next = self.cursor.peek_char(1);
        self.cursor.advance();

        let two_char = (matches!(c, '<' | '>' | '!' | '=') && next == '=')
            || (c == '&' && next == '&')
            || (c == '|' && next == '|');
        if two_char {
            self.cursor.advance();
        }
        TokenKind::Operator
    }

    /// Consumes the character after a backslash, requiring it to be one of
    /// the supported escapes.
    fn expect_escape(&mut self) -> Result<(), ParseError> {
        let c = self.cursor.current_char();
        if self.cursor.is_at_end() || !ESCAPES.contains(&c) {
            return Err(self.error_here(format!("invalid escape sequence '\\{c}'")));
        }
        self.cursor.advance();
        Ok(())
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.cursor.position())
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The token sequence is a function of the input alone.
        #[test]
        fn lex_is_deterministic(source in ".{0,200}") {
            let first = tokenize(&source).map(|ts| {
                ts.iter().map(|t| (t.kind, t.lexeme.to_string(), t.start())).collect::<Vec<_>>()
            });
            let second = tokenize(&source).map(|ts| {
                ts.iter().map(|t| (t.kind, t.lexeme.to_string(), t.start())).collect::<Vec<_>>()
            });
            prop_assert_eq!(first, second);
        }

        /// Re-lexing any produced lexeme yields a single token with the
        /// same kind and lexeme.
        #[test]
        fn lexeme_round_trip(source in ".{0,200}") {
            if let Ok(tokens) = tokenize(&source) {
                for token in tokens {
                    let relexed = tokenize(token.lexeme).unwrap();
                    prop_assert_eq!(relexed.len(), 1);
                    prop_assert_eq!(relexed[0].kind, token.kind);
                    prop_assert_eq!(relexed[0].lexeme, token.lexeme);
                    prop_assert_eq!(relexed[0].start(), 0);
                }
            }
        }

        /// Tokens tile the input left to right without overlap.
        #[test]
        fn tokens_are_ordered(source in "[a-zA-Z0-9_ ;=<>!&|+.-]{0,100}") {
            let tokens = tokenize(&source).unwrap();
            let mut last_end = 0;
            for token in tokens {
                prop_assert!(token.start() >= last_end);
                last_end = token.span.end;
            }
        }
    }
}
