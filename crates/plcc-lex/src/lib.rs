//! plcc-lex - Lexical analyzer for PLC source text.
//!
//! The lexer transforms a source string into an ordered sequence of
//! [`Token`]s. Tokens are classified into six kinds (identifier, integer,
//! decimal, character, string, operator); whitespace is discarded between
//! tokens and never tokenized. Lexemes are zero-copy slices of the source
//! and preserve the input verbatim, including sign characters in numbers
//! and escape backslashes in character/string literals.
//!
//! Lexing is deterministic: the token sequence is a function of the input
//! alone. The first rule violation (unterminated literal, invalid escape,
//! line break inside a string) aborts with a [`ParseError`] carrying the
//! byte index of the offending character.

pub mod cursor;
pub mod lexer;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use cursor::Cursor;
pub use lexer::{tokenize, Lexer};
pub use plcc_util::ParseError;
pub use token::{Token, TokenKind};
