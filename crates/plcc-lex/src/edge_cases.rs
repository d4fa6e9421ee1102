//! Edge case tests for plcc-lex.

use crate::{tokenize, TokenKind};

#[test]
fn test_edge_long_identifier() {
    let name = "a".repeat(10_000);
    let tokens = tokenize(&name).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].lexeme.len(), 10_000);
}

#[test]
fn test_edge_keywords_are_identifiers() {
    let tokens = tokenize("LET DEF IF WHILE RETURN").unwrap();
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_edge_sign_glues_to_digit_only() {
    // `x=-1` lexes the `-1` as a signed integer, not as an operator.
    let tokens = tokenize("x=-1;").unwrap();
    let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme).collect();
    assert_eq!(lexemes, vec!["x", "=", "-1", ";"]);

    // `x - 1` keeps the minus detached.
    let tokens = tokenize("x - 1").unwrap();
    let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme).collect();
    assert_eq!(lexemes, vec!["x", "-", "1"]);
}

#[test]
fn test_edge_adjacent_plus_digit_inside_expression() {
    // A known consequence of the sign rule: `y+1` is two tokens, the
    // second being the integer `+1`.
    let tokens = tokenize("y+1").unwrap();
    let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme).collect();
    assert_eq!(lexemes, vec!["y", "+1"]);
    assert_eq!(tokens[1].kind, TokenKind::Integer);
}

#[test]
fn test_edge_decimal_requires_digit_after_dot() {
    let tokens = tokenize("5.toString()").unwrap();
    let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme).collect();
    assert_eq!(lexemes, vec!["5", ".", "toString", "(", ")"]);
    assert_eq!(tokens[0].kind, TokenKind::Integer);
}

#[test]
fn test_edge_multiple_signs() {
    // Only a sign directly before a digit joins the number.
    let tokens = tokenize("--1").unwrap();
    let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme).collect();
    assert_eq!(lexemes, vec!["-", "-1"]);
    assert_eq!(tokens[0].kind, TokenKind::Operator);
    assert_eq!(tokens[1].kind, TokenKind::Integer);
}

#[test]
fn test_edge_escaped_quote_in_string() {
    let tokens = tokenize(r#""say \"hi\"""#).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].lexeme, r#""say \"hi\"""#);
}

#[test]
fn test_edge_character_error_positions() {
    assert_eq!(tokenize("'").unwrap_err().index, 1);
    assert_eq!(tokenize("'a").unwrap_err().index, 2);
    assert_eq!(tokenize(r"'\x'").unwrap_err().index, 2);
}

#[test]
fn test_edge_crlf_between_tokens() {
    let tokens = tokenize("LET x;\r\nLET y;").unwrap();
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[3].lexeme, "LET");
    assert_eq!(tokens[3].start(), 8);
}

#[test]
fn test_edge_zero_padded_numbers_verbatim() {
    let tokens = tokenize("007 +042").unwrap();
    assert_eq!(tokens[0].lexeme, "007");
    assert_eq!(tokens[1].lexeme, "+042");
}
