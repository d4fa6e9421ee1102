//! Edge case tests for plcc-sem.

use crate::analyze;
use plcc_env::{Environment, SemanticError, Value};
use plcc_par::parse;

fn analyzed(source: &str) -> Result<Environment, SemanticError> {
    let mut ast = parse(source).map_err(|e| SemanticError::invalid(e.to_string()))?;
    let mut env = Environment::new();
    env.define_host_function(
        "print",
        "System.out.println",
        vec![Environment::ANY],
        Environment::NIL,
        |_| Ok(Value::Nil),
    )?;
    analyze(&mut ast, &mut env)?;
    Ok(env)
}

const EMPTY_MAIN: &str = "DEF main(): Integer DO RETURN 0; END";

#[test]
fn test_edge_duplicate_fields_rejected() {
    let err = analyzed(&format!(
        "LET x: Integer; LET x: String; {EMPTY_MAIN}"
    ))
    .unwrap_err();
    assert_eq!(err, SemanticError::Redefinition { name: "x".into() });
}

#[test]
fn test_edge_duplicate_method_same_arity_rejected() {
    let err = analyzed(&format!(
        "DEF f() DO RETURN 0; END DEF f() DO RETURN 1; END {EMPTY_MAIN}"
    ))
    .unwrap_err();
    assert_eq!(err, SemanticError::Redefinition { name: "f/0".into() });
}

#[test]
fn test_edge_overloading_by_arity_allowed() {
    analyzed(&format!(
        "DEF f() DO RETURN 0; END DEF f(x: Integer) DO RETURN x; END {EMPTY_MAIN}"
    ))
    .unwrap();
}

#[test]
fn test_edge_duplicate_parameter_names_rejected() {
    let err = analyzed(&format!(
        "DEF f(a: Integer, a: Integer) DO RETURN 0; END {EMPTY_MAIN}"
    ))
    .unwrap_err();
    assert_eq!(err, SemanticError::Redefinition { name: "a".into() });
}

#[test]
fn test_edge_local_shadowing_parameter_is_redefinition() {
    // Parameters and body statements share the method scope.
    let err = analyzed(&format!(
        "DEF f(a: Integer) DO LET a = 1; RETURN a; END {EMPTY_MAIN}"
    ))
    .unwrap_err();
    assert_eq!(err, SemanticError::Redefinition { name: "a".into() });
}

#[test]
fn test_edge_local_shadows_field() {
    analyzed(&format!(
        "LET x: Integer = 1; DEF f(): Integer DO LET x = 2; RETURN x; END {EMPTY_MAIN}"
    ))
    .unwrap();
}

#[test]
fn test_edge_return_type_binding_is_reserved() {
    // The hidden `returnType` binding occupies the method scope.
    let err = analyzed(&format!(
        "DEF f(): Integer DO LET returnType = 1; RETURN 0; END {EMPTY_MAIN}"
    ))
    .unwrap_err();
    assert_eq!(
        err,
        SemanticError::Redefinition {
            name: "returnType".into()
        }
    );
}

#[test]
fn test_edge_unknown_type_names() {
    let err = analyzed(&format!("LET x: Widget; {EMPTY_MAIN}")).unwrap_err();
    assert_eq!(err, SemanticError::undefined("Widget"));

    let err = analyzed(&format!("DEF f(x: Widget) DO RETURN 0; END {EMPTY_MAIN}")).unwrap_err();
    assert_eq!(err, SemanticError::undefined("Widget"));

    let err = analyzed(&format!("DEF f(): Widget DO RETURN 0; END {EMPTY_MAIN}")).unwrap_err();
    assert_eq!(err, SemanticError::undefined("Widget"));
}

#[test]
fn test_edge_while_condition_must_be_boolean() {
    let err = analyzed(
        "DEF main(): Integer DO WHILE \"yes\" DO print(1); END RETURN 0; END",
    )
    .unwrap_err();
    assert_eq!(err, SemanticError::type_mismatch("Boolean", "String"));
}

#[test]
fn test_edge_assignment_to_undefined_variable() {
    let err = analyzed("DEF main(): Integer DO ghost = 1; RETURN 0; END").unwrap_err();
    assert_eq!(err, SemanticError::undefined("ghost"));
}

#[test]
fn test_edge_nil_assignable_only_to_nil_and_any() {
    analyzed(&format!("LET x: Any = NIL; {EMPTY_MAIN}")).unwrap();
    let err = analyzed(&format!("LET x: Integer = NIL; {EMPTY_MAIN}")).unwrap_err();
    assert_eq!(err, SemanticError::type_mismatch("Integer", "Nil"));
}

#[test]
fn test_edge_comparable_declared_variable() {
    analyzed(&format!("LET x: Comparable = 1; LET y: Comparable = 'c'; {EMPTY_MAIN}")).unwrap();
}

#[test]
fn test_edge_field_of_declared_any_accepts_everything() {
    analyzed(&format!(
        "LET a: Any = 1; LET b: Any = \"s\"; LET c: Any = TRUE; {EMPTY_MAIN}"
    ))
    .unwrap();
}
