//! Edge case tests for plcc-int.

use std::cell::RefCell;
use std::rc::Rc;

use num_bigint::BigInt;
use plcc_env::{Environment, Function, FunctionBody, SemanticError, Value};
use plcc_par::parse;

use crate::Interpreter;

fn run(source: &str) -> Result<Value, SemanticError> {
    run_in(Environment::new(), source)
}

fn run_in(env: Environment, source: &str) -> Result<Value, SemanticError> {
    let ast = parse(source).map_err(|e| SemanticError::runtime(e.to_string()))?;
    Interpreter::new(env).evaluate(&ast)
}

fn int(value: i64) -> Value {
    Value::Integer(BigInt::from(value))
}

#[test]
fn test_edge_undefined_variable() {
    let err = run("DEF main(): Integer DO RETURN ghost; END").unwrap_err();
    assert_eq!(err, SemanticError::undefined("ghost"));
}

#[test]
fn test_edge_undefined_function_includes_arity() {
    let err = run("DEF main(): Integer DO RETURN ghost(1, 2); END").unwrap_err();
    assert_eq!(err, SemanticError::undefined("ghost/2"));
}

#[test]
fn test_edge_wrong_arity_misses_lookup() {
    let err = run(
        "DEF f(x: Integer): Integer DO RETURN x; END \
         DEF main(): Integer DO RETURN f(); END",
    )
    .unwrap_err();
    assert_eq!(err, SemanticError::undefined("f/0"));
}

#[test]
fn test_edge_declared_function_is_not_callable() {
    let mut env = Environment::new();
    env.define_function(Function {
        name: "stub".into(),
        jvm_name: "stub".into(),
        param_types: vec![],
        return_type: Environment::NIL,
        body: FunctionBody::Declared,
    })
    .unwrap();
    let err = run_in(env, "DEF main(): Integer DO stub(); RETURN 0; END").unwrap_err();
    assert_eq!(
        err,
        SemanticError::runtime("function 'stub' has no implementation")
    );
}

#[test]
fn test_edge_call_api_checks_arity() {
    let mut env = Environment::new();
    let id = env
        .define_host_function("one", "one", vec![Environment::ANY], Environment::NIL, |_| {
            Ok(Value::Nil)
        })
        .unwrap();
    let mut interpreter = Interpreter::new(env);
    let err = interpreter.call(id, vec![]).unwrap_err();
    assert_eq!(
        err,
        SemanticError::Arity {
            function: "one".into(),
            expected: 1,
            actual: 0,
        }
    );
}

#[test]
fn test_edge_host_error_propagates() {
    let mut env = Environment::new();
    env.define_host_function("fail", "fail", vec![], Environment::NIL, |_| {
        Err(SemanticError::runtime("host failure"))
    })
    .unwrap();
    let err = run_in(env, "DEF main(): Integer DO fail(); RETURN 0; END").unwrap_err();
    assert_eq!(err, SemanticError::runtime("host failure"));
}

#[test]
fn test_edge_field_receiver_must_be_object() {
    let err = run(
        "DEF main(): Integer DO LET x = 1; RETURN x.y; END",
    )
    .unwrap_err();
    assert_eq!(err, SemanticError::type_mismatch("Object", "Integer"));
}

#[test]
fn test_edge_arguments_evaluate_left_to_right() {
    let mut env = Environment::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&order);
    env.define_host_function("probe", "probe", vec![Environment::ANY], Environment::ANY, {
        move |args| {
            sink.borrow_mut().push(args[0].to_string());
            Ok(args[0].clone())
        }
    })
    .unwrap();
    env.define_host_function(
        "pair",
        "pair",
        vec![Environment::ANY, Environment::ANY],
        Environment::NIL,
        |_| Ok(Value::Nil),
    )
    .unwrap();

    run_in(
        env,
        "DEF main(): Integer DO pair(probe(1), probe(2)); RETURN 0; END",
    )
    .unwrap();
    assert_eq!(*order.borrow(), vec!["1", "2"]);
}

#[test]
fn test_edge_assignment_value_can_reference_target() {
    let result = run(
        "DEF main(): Integer DO LET x = 1; x = x + x; x = x + x; RETURN x; END",
    );
    assert_eq!(result, Ok(int(4)));
}

#[test]
fn test_edge_while_condition_reevaluated_each_pass() {
    let mut env = Environment::new();
    let fuel = Rc::new(RefCell::new(3));
    let counter = Rc::clone(&fuel);
    env.define_host_function("more", "more", vec![], Environment::BOOLEAN, move |_| {
        let mut remaining = counter.borrow_mut();
        *remaining -= 1;
        Ok(Value::Bool(*remaining > 0))
    })
    .unwrap();

    let result = run_in(
        env,
        "DEF main(): Integer DO \
         LET spins = 0; \
         WHILE more() DO spins = spins + 1; END \
         RETURN spins; END",
    );
    assert_eq!(result, Ok(int(2)));
}

#[test]
fn test_edge_group_evaluates_inner() {
    assert_eq!(
        run("DEF main(): Integer DO RETURN (2 + 3) * 4; END"),
        Ok(int(20))
    );
}

#[test]
fn test_edge_nil_concatenation() {
    let result = run("DEF main(): String DO RETURN \"v=\" + NIL; END").unwrap();
    assert_eq!(result, Value::String("v=nil".into()));
}
