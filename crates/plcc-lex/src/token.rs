//! Token definitions.

use plcc_util::Span;

/// Classification of a lexeme.
///
/// Keywords are not distinguished at the lexical level: `LET`, `IF`, and
/// friends are ordinary [`TokenKind::Identifier`] tokens whose lexemes the
/// parser matches by content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `[A-Za-z_][A-Za-z0-9_-]*`
    Identifier,
    /// Optional sign, one or more digits.
    Integer,
    /// Optional sign, digits, `.`, digits.
    Decimal,
    /// A single-quoted character literal, escapes unprocessed.
    Character,
    /// A double-quoted string literal, escapes unprocessed.
    String,
    /// `;`, a two-character operator (`<= >= == != && ||`), or any other
    /// single non-whitespace character.
    Operator,
}

/// A lexical unit: kind, verbatim lexeme, and source position.
///
/// The lexeme is a slice of the original source, so quotes and escape
/// backslashes in literals are preserved exactly as written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    /// Classification of the lexeme.
    pub kind: TokenKind,
    /// The matched source text, verbatim.
    pub lexeme: &'src str,
    /// Byte range of the lexeme in the source.
    pub span: Span,
}

impl<'src> Token<'src> {
    /// Create a token.
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// The 0-based byte offset of the first character of the lexeme.
    #[inline]
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// True when the token has the given kind.
    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True when the token has the given kind and exact lexeme.
    #[inline]
    pub fn is_lexeme(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }
}
