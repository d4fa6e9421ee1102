//! The interpreter proper.

use std::cmp::Ordering;

use bigdecimal::RoundingMode;
use num_traits::Zero;

use plcc_env::{Environment, Function, FunctionBody, Value, Variable};
use plcc_par::{BinaryOp, ExprKind, Expression, Literal, Source, Statement};
use plcc_util::{FunctionId, ScopeId, SemanticError, VariableId};

/// Result of evaluating one statement: either execution continues, or a
/// `RETURN` is unwinding toward the enclosing method call.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value),
}

/// Tree-walking evaluator.
///
/// # Example
///
/// ```
/// use plcc_env::Environment;
/// use plcc_int::Interpreter;
/// use plcc_par::parse;
///
/// let ast = parse("DEF main(): Integer DO RETURN 41 + 1; END").unwrap();
/// let mut interpreter = Interpreter::new(Environment::new());
/// let result = interpreter.evaluate(&ast).unwrap();
/// assert_eq!(result.to_string(), "42");
/// ```
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn into_env(self) -> Environment {
        self.env
    }

    /// Evaluate a program: define its fields (initializers evaluated in
    /// order, defaulting to nil) and methods in the current scope, then
    /// invoke `main/0` and return its value.
    pub fn evaluate(&mut self, source: &Source) -> Result<Value, SemanticError> {
        for field in &source.fields {
            let value = match &field.value {
                Some(initializer) => self.eval_expression(initializer)?,
                None => Value::Nil,
            };
            let variable =
                Variable::new(field.name.clone(), Environment::ANY, field.constant)
                    .with_value(value);
            self.env.define_variable(variable)?;
        }

        for method in &source.methods {
            self.define_method(method)?;
        }

        let main = self
            .env
            .lookup_function("main", 0)
            .map_err(|_| SemanticError::runtime("program does not define main/0"))?;
        self.call(main, Vec::new())
    }

    /// Install a method as a function closing over the current scope.
    fn define_method(&mut self, method: &plcc_par::Method) -> Result<FunctionId, SemanticError> {
        let function = Function {
            name: method.name.clone(),
            jvm_name: method.name.clone(),
            param_types: vec![Environment::ANY; method.params.len()],
            return_type: Environment::ANY,
            body: FunctionBody::Method {
                params: method.params.clone(),
                body: method.body.clone().into(),
                scope: self.env.current_scope(),
            },
        };
        self.env.define_function(function)
    }

    /// Invoke a function with already-evaluated arguments.
    ///
    /// Method frames are children of the scope the method was defined in
    /// (lexical closure), not of the caller's scope; the caller's scope is
    /// restored on every exit path.
    pub fn call(
        &mut self,
        id: FunctionId,
        arguments: Vec<Value>,
    ) -> Result<Value, SemanticError> {
        let function = self.env.function(id).clone();
        if function.arity() != arguments.len() {
            return Err(SemanticError::Arity {
                function: function.name.clone(),
                expected: function.arity(),
                actual: arguments.len(),
            });
        }

        match function.body {
            FunctionBody::Host(host) => host(&arguments),
            FunctionBody::Method {
                params,
                body,
                scope,
            } => self.in_child_scope_of(scope, move |interpreter| {
                for (name, value) in params.iter().zip(arguments) {
                    let variable = Variable::new(name.clone(), Environment::ANY, false)
                        .with_value(value);
                    interpreter.env.define_variable(variable)?;
                }
                for statement in body.iter() {
                    if let Flow::Return(value) = interpreter.eval_statement(statement)? {
                        return Ok(value);
                    }
                }
                Ok(Value::Nil)
            }),
            FunctionBody::Declared => Err(SemanticError::runtime(format!(
                "function '{}' has no implementation",
                function.name
            ))),
        }
    }

    /// Run `f` in a fresh child of `parent`, restoring the previous scope
    /// on every exit path.
    fn in_child_scope_of<T>(
        &mut self,
        parent: ScopeId,
        f: impl FnOnce(&mut Self) -> Result<T, SemanticError>,
    ) -> Result<T, SemanticError> {
        let previous = self.env.current_scope();
        let child = self.env.push_child_of(parent);
        self.env.set_current(child);
        let result = f(self);
        self.env.set_current(previous);
        result
    }

    /// Run `f` in a fresh child of the current scope.
    fn scoped<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, SemanticError>,
    ) -> Result<T, SemanticError> {
        self.in_child_scope_of(self.env.current_scope(), f)
    }

    fn eval_block(&mut self, body: &[Statement]) -> Result<Flow, SemanticError> {
        for statement in body {
            let flow = self.eval_statement(statement)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn eval_statement(&mut self, statement: &Statement) -> Result<Flow, SemanticError> {
        match statement {
            Statement::Expression(expression) => {
                self.eval_expression(expression)?;
                Ok(Flow::Normal)
            }

            Statement::Declaration { name, value, .. } => {
                let value = match value {
                    Some(initializer) => self.eval_expression(initializer)?,
                    None => Value::Nil,
                };
                let variable =
                    Variable::new(name.clone(), Environment::ANY, false).with_value(value);
                self.env.define_variable(variable)?;
                Ok(Flow::Normal)
            }

            Statement::Assignment { receiver, value } => {
                let ExprKind::Access {
                    receiver: object,
                    name,
                    ..
                } = &receiver.kind
                else {
                    return Err(SemanticError::runtime(
                        "assignment target must be an access expression",
                    ));
                };
                let value = self.eval_expression(value)?;
                let id = match object {
                    Some(object) => {
                        let scope = self.eval_expression(object)?.as_object()?;
                        self.env.lookup_variable_in(scope, name)?
                    }
                    None => self.env.lookup_variable(name)?,
                };
                self.assign(id, value)?;
                Ok(Flow::Normal)
            }

            Statement::If {
                condition,
                then_body,
                else_body,
            } => {
                let condition = self.eval_expression(condition)?.as_bool()?;
                let body = if condition { then_body } else { else_body };
                self.scoped(|interpreter| interpreter.eval_block(body))
            }

            Statement::While { condition, body } => loop {
                if !self.eval_expression(condition)?.as_bool()? {
                    return Ok(Flow::Normal);
                }
                let flow = self.scoped(|interpreter| interpreter.eval_block(body))?;
                if flow != Flow::Normal {
                    return Ok(flow);
                }
            },

            Statement::For {
                init,
                condition,
                increment,
                body,
            } => self.scoped(|interpreter| {
                if let Some(clause) = init {
                    let value = interpreter.eval_expression(&clause.value)?;
                    let variable = Variable::new(clause.name.clone(), Environment::ANY, false)
                        .with_value(value);
                    interpreter.env.define_variable(variable)?;
                }
                loop {
                    if !interpreter.eval_expression(condition)?.as_bool()? {
                        return Ok(Flow::Normal);
                    }
                    // Each iteration gets a fresh scope for the body; the
                    // increment runs after the body, before the next
                    // condition check.
                    let flow = interpreter.scoped(|interpreter| interpreter.eval_block(body))?;
                    if flow != Flow::Normal {
                        return Ok(flow);
                    }
                    if let Some(clause) = increment {
                        let value = interpreter.eval_expression(&clause.value)?;
                        let id = interpreter.env.lookup_variable(&clause.name)?;
                        interpreter.assign(id, value)?;
                    }
                }
            }),

            Statement::Return { value } => Ok(Flow::Return(self.eval_expression(value)?)),
        }
    }

    fn assign(&mut self, id: VariableId, value: Value) -> Result<(), SemanticError> {
        let variable = self.env.variable(id);
        if variable.constant {
            return Err(SemanticError::runtime(format!(
                "cannot assign to constant '{}'",
                variable.name
            )));
        }
        self.env.variable_mut(id).value = value;
        Ok(())
    }

    fn eval_expression(&mut self, expression: &Expression) -> Result<Value, SemanticError> {
        match &expression.kind {
            ExprKind::Literal(literal) => Ok(literal_value(literal)),

            ExprKind::Group(inner) => self.eval_expression(inner),

            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right),

            ExprKind::Access { receiver, name, .. } => {
                let id = match receiver {
                    Some(object) => {
                        let scope = self.eval_expression(object)?.as_object()?;
                        self.env.lookup_variable_in(scope, name)?
                    }
                    None => self.env.lookup_variable(name)?,
                };
                Ok(self.env.variable(id).value.clone())
            }

            ExprKind::Function {
                receiver,
                name,
                arguments,
                ..
            } => match receiver {
                Some(object) => {
                    let object = self.eval_expression(object)?;
                    let scope = object.as_object()?;
                    // The receiver is argument 0.
                    let mut values = Vec::with_capacity(arguments.len() + 1);
                    values.push(object);
                    for argument in arguments {
                        values.push(self.eval_expression(argument)?);
                    }
                    let id = self.env.lookup_function_in(scope, name, values.len())?;
                    self.call(id, values)
                }
                None => {
                    let mut values = Vec::with_capacity(arguments.len());
                    for argument in arguments {
                        values.push(self.eval_expression(argument)?);
                    }
                    let id = self.env.lookup_function(name, values.len())?;
                    self.call(id, values)
                }
            },
        }
    }

    fn eval_binary(
        &mut self,
        op: BinaryOp,
        left: &Expression,
        right: &Expression,
    ) -> Result<Value, SemanticError> {
        match op {
            // The right operand must not be evaluated when the left one
            // decides the result.
            BinaryOp::And => {
                if !self.eval_expression(left)?.as_bool()? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval_expression(right)?.as_bool()?))
            }
            BinaryOp::Or => {
                if self.eval_expression(left)?.as_bool()? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval_expression(right)?.as_bool()?))
            }

            BinaryOp::Eq => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                Ok(Value::Bool(left == right))
            }
            BinaryOp::Ne => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                Ok(Value::Bool(left != right))
            }

            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                let ordering = compare(&left, &right)?;
                let result = match op {
                    BinaryOp::Lt => ordering == Ordering::Less,
                    BinaryOp::Le => ordering != Ordering::Greater,
                    BinaryOp::Gt => ordering == Ordering::Greater,
                    _ => ordering != Ordering::Less,
                };
                Ok(Value::Bool(result))
            }

            BinaryOp::Add => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                add(left, right)
            }
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                arithmetic(op, left, right)
            }
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Character(c) => Value::Character(*c),
        Literal::String(s) => Value::String(s.clone()),
        Literal::Integer(i) => Value::Integer(i.clone()),
        Literal::Decimal(d) => Value::Decimal(d.clone()),
    }
}

/// Natural ordering for the four comparable payloads; anything else,
/// including mixed kinds, is a type failure.
fn compare(left: &Value, right: &Value) -> Result<Ordering, SemanticError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(a.cmp(b)),
        (Value::Character(a), Value::Character(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        _ => Err(SemanticError::type_mismatch(
            left.type_name(),
            right.type_name(),
        )),
    }
}

/// `+`: string concatenation when either side is a string, numeric
/// addition otherwise.
fn add(left: Value, right: Value) -> Result<Value, SemanticError> {
    if left.is_string() || right.is_string() {
        return Ok(Value::String(format!("{left}{right}")));
    }
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a + b)),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(Value::Decimal(a + b)),
        (left, right) => Err(numeric_pair_error(&left, &right)),
    }
}

fn arithmetic(op: BinaryOp, left: Value, right: Value) -> Result<Value, SemanticError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => match op {
            BinaryOp::Sub => Ok(Value::Integer(a - b)),
            BinaryOp::Mul => Ok(Value::Integer(a * b)),
            _ => {
                if b.is_zero() {
                    return Err(SemanticError::runtime("division by zero"));
                }
                Ok(Value::Integer(a / b))
            }
        },
        (Value::Decimal(a), Value::Decimal(b)) => match op {
            BinaryOp::Sub => Ok(Value::Decimal(a - b)),
            BinaryOp::Mul => Ok(Value::Decimal(a * b)),
            _ => {
                if b.is_zero() {
                    return Err(SemanticError::runtime("division by zero"));
                }
                // Round half-to-even at the dividend's scale.
                let (_, scale) = a.as_bigint_and_exponent();
                let quotient = a / b;
                Ok(Value::Decimal(
                    quotient.with_scale_round(scale, RoundingMode::HalfEven),
                ))
            }
        },
        (left, right) => Err(numeric_pair_error(&left, &right)),
    }
}

fn numeric_pair_error(left: &Value, right: &Value) -> SemanticError {
    if !matches!(left, Value::Integer(_) | Value::Decimal(_)) {
        SemanticError::type_mismatch("Integer or Decimal", left.type_name())
    } else {
        SemanticError::type_mismatch(left.type_name(), right.type_name())
    }
}
