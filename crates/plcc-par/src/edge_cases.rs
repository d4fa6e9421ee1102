//! Edge case tests for plcc-par.

use crate::ast::*;
use crate::{parse, parse_expression, parse_statement};

#[test]
fn test_edge_empty_source() {
    let source = parse("").unwrap();
    assert!(source.fields.is_empty());
    assert!(source.methods.is_empty());
}

#[test]
fn test_edge_deeply_nested_groups() {
    let depth = 64;
    let mut text = String::new();
    for _ in 0..depth {
        text.push('(');
    }
    text.push_str("a + b");
    for _ in 0..depth {
        text.push(')');
    }
    let mut expression = parse_expression(&text).unwrap();
    for _ in 0..depth {
        let ExprKind::Group(inner) = expression.kind else {
            panic!("expected group");
        };
        expression = *inner;
    }
    assert!(matches!(expression.kind, ExprKind::Binary { .. }));
}

#[test]
fn test_edge_nested_control_flow() {
    let statement = parse_statement(
        "WHILE a DO IF b DO FOR (i = 0; i < 2; i = i + 1) f(); END ELSE g(); END END",
    )
    .unwrap();
    let Statement::While { body, .. } = statement else {
        panic!("expected while");
    };
    let Statement::If { then_body, .. } = &body[0] else {
        panic!("expected if");
    };
    assert!(matches!(then_body[0], Statement::For { .. }));
}

#[test]
fn test_edge_empty_bodies_parse() {
    // Empty blocks are syntactically fine; the analyzer enforces the
    // non-empty rules for if/for.
    let statement = parse_statement("IF c DO END").unwrap();
    let Statement::If { then_body, .. } = statement else {
        panic!("expected if");
    };
    assert!(then_body.is_empty());

    let source = parse("DEF f() DO END").unwrap();
    assert!(source.methods[0].body.is_empty());
}

#[test]
fn test_edge_keyword_dispatch_is_token_exact() {
    // `LETTER` is an ordinary identifier, not the LET keyword.
    let statement = parse_statement("LETTER = 1;").unwrap();
    assert!(matches!(statement, Statement::Assignment { .. }));
}

#[test]
fn test_edge_call_statement() {
    let statement = parse_statement("list.add(1);").unwrap();
    let Statement::Expression(expression) = statement else {
        panic!("expected expression statement");
    };
    assert!(matches!(expression.kind, ExprKind::Function { .. }));
}

#[test]
fn test_edge_unexpected_eof_inside_method() {
    let err = parse("DEF f() DO RETURN 0;").unwrap_err();
    // One past the final `;`.
    assert_eq!(err.index, 20);
    assert_eq!(err.message, "expected 'END'");
}

#[test]
fn test_edge_missing_paren_in_for() {
    let err = parse_statement("FOR i = 0; i < 3;) f(); END").unwrap_err();
    assert_eq!(err.index, 4);
    assert_eq!(err.message, "expected '('");
}

#[test]
fn test_edge_argument_list_errors() {
    let err = parse_expression("f(1,)").unwrap_err();
    assert_eq!(err.index, 4);
    assert_eq!(err.message, "expected expression");

    let err = parse_expression("f(1 2)").unwrap_err();
    assert_eq!(err.index, 4);
    assert_eq!(err.message, "expected ')'");
}

#[test]
fn test_edge_trailing_input_rejected() {
    let err = parse_expression("a b").unwrap_err();
    assert_eq!(err.index, 2);
    assert_eq!(err.message, "unexpected trailing input");
}

#[test]
fn test_edge_annotation_slots_start_empty() {
    let source = parse("LET x: Integer = 1; DEF main(): Integer DO RETURN x; END").unwrap();
    assert!(source.fields[0].variable.is_none());
    assert!(source.methods[0].function.is_none());
    let Statement::Return { value } = &source.methods[0].body[0] else {
        panic!("expected return");
    };
    assert!(value.ty.is_none());
}
