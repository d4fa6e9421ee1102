//! The semantic analyzer.

use num_traits::ToPrimitive;

use plcc_env::{Environment, Function, FunctionBody, Variable};
use plcc_par::{BinaryOp, ExprKind, Expression, Literal, Method, Source, Statement};
use plcc_util::{SemanticError, TypeId};

/// The hidden binding carrying the enclosing method's return type, so
/// `RETURN` statements can be checked without threading method state.
const RETURN_TYPE: &str = "returnType";

/// Analyze a source tree against an environment, annotating in place.
///
/// Fields are visited first, then methods, both in declaration order.
/// After traversal the program must define `main/0` returning `Integer`.
pub fn analyze(source: &mut Source, env: &mut Environment) -> Result<(), SemanticError> {
    Analyzer::new(env).analyze_source(source)
}

/// AST walker that resolves names against an [`Environment`] and enforces
/// the typing rules.
pub struct Analyzer<'a> {
    env: &'a mut Environment,
}

impl<'a> Analyzer<'a> {
    pub fn new(env: &'a mut Environment) -> Self {
        Self { env }
    }

    /// Run `f` inside a fresh child of the current scope, restoring the
    /// previous scope on every exit path.
    fn scoped<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, SemanticError>,
    ) -> Result<T, SemanticError> {
        let previous = self.env.current_scope();
        let child = self.env.push_child_of(previous);
        self.env.set_current(child);
        let result = f(self);
        self.env.set_current(previous);
        result
    }

    /// See [`analyze`].
    pub fn analyze_source(&mut self, source: &mut Source) -> Result<(), SemanticError> {
        for field in &mut source.fields {
            self.visit_field(field)?;
        }
        for method in &mut source.methods {
            self.visit_method(method)?;
        }

        let main = self.env.lookup_function("main", 0)?;
        let return_type = self.env.function(main).return_type;
        if return_type != Environment::INTEGER {
            return Err(SemanticError::type_mismatch(
                "Integer",
                &self.env.ty(return_type).name,
            ));
        }
        Ok(())
    }

    fn visit_field(&mut self, field: &mut plcc_par::Field) -> Result<(), SemanticError> {
        let declared = self.env.lookup_type(&field.type_name)?;

        // The initializer is visited before the field is in scope, so a
        // field cannot reference itself.
        match &mut field.value {
            Some(value) => {
                let actual = self.visit_expression(value)?;
                self.env.require_assignable(declared, actual)?;
            }
            None if field.constant => {
                return Err(SemanticError::invalid(format!(
                    "constant field '{}' needs an initializer",
                    field.name
                )));
            }
            None => {}
        }

        let variable = Variable::new(field.name.clone(), declared, field.constant);
        field.variable = Some(self.env.define_variable(variable)?);
        Ok(())
    }

    fn visit_method(&mut self, method: &mut Method) -> Result<(), SemanticError> {
        let mut param_types = Vec::with_capacity(method.param_type_names.len());
        for type_name in &method.param_type_names {
            param_types.push(self.env.lookup_type(type_name)?);
        }
        let return_type = match &method.return_type_name {
            Some(name) => self.env.lookup_type(name)?,
            None => Environment::ANY,
        };

        // Defined before the body is visited, permitting recursion.
        let function = Function {
            name: method.name.clone(),
            jvm_name: method.name.clone(),
            param_types: param_types.clone(),
            return_type,
            body: FunctionBody::Declared,
        };
        method.function = Some(self.env.define_function(function)?);

        self.scoped(|a| {
            for (name, ty) in method.params.iter().zip(&param_types) {
                a.env.define_variable(Variable::new(name.clone(), *ty, false))?;
            }
            a.env
                .define_variable(Variable::new(RETURN_TYPE, return_type, true))?;
            for statement in &mut method.body {
                a.visit_statement(statement)?;
            }
            Ok(())
        })
    }

    fn visit_statement(&mut self, statement: &mut Statement) -> Result<(), SemanticError> {
        match statement {
            Statement::Expression(expression) => {
                if !matches!(expression.kind, ExprKind::Function { .. }) {
                    return Err(SemanticError::invalid(
                        "expression statements must be function calls",
                    ));
                }
                self.visit_expression(expression)?;
                Ok(())
            }

            Statement::Declaration {
                name,
                type_name,
                value,
                variable,
            } => {
                let declared = match type_name {
                    Some(type_name) => Some(self.env.lookup_type(type_name)?),
                    None => None,
                };
                let actual = match value {
                    Some(value) => Some(self.visit_expression(value)?),
                    None => None,
                };
                let ty = match (declared, actual) {
                    (Some(declared), Some(actual)) => {
                        self.env.require_assignable(declared, actual)?;
                        declared
                    }
                    (Some(declared), None) => declared,
                    (None, Some(actual)) => actual,
                    (None, None) => {
                        return Err(SemanticError::invalid(format!(
                            "'{name}' needs a declared type or an initializer"
                        )));
                    }
                };
                let binding = Variable::new(name.clone(), ty, false);
                *variable = Some(self.env.define_variable(binding)?);
                Ok(())
            }

            Statement::Assignment { receiver, value } => {
                if !matches!(receiver.kind, ExprKind::Access { .. }) {
                    return Err(SemanticError::invalid(
                        "assignment target must be an access expression",
                    ));
                }
                let target = self.visit_expression(receiver)?;
                let actual = self.visit_expression(value)?;
                self.env.require_assignable(target, actual)
            }

            Statement::If {
                condition,
                then_body,
                else_body,
            } => {
                let cond = self.visit_expression(condition)?;
                self.env.require_assignable(Environment::BOOLEAN, cond)?;
                if then_body.is_empty() {
                    return Err(SemanticError::invalid(
                        "if statement needs a non-empty then branch",
                    ));
                }
                self.scoped(|a| {
                    for statement in then_body {
                        a.visit_statement(statement)?;
                    }
                    Ok(())
                })?;
                self.scoped(|a| {
                    for statement in else_body {
                        a.visit_statement(statement)?;
                    }
                    Ok(())
                })
            }

            Statement::While { condition, body } => {
                let cond = self.visit_expression(condition)?;
                self.env.require_assignable(Environment::BOOLEAN, cond)?;
                self.scoped(|a| {
                    for statement in body {
                        a.visit_statement(statement)?;
                    }
                    Ok(())
                })
            }

            Statement::For {
                init,
                condition,
                increment,
                body,
            } => self.scoped(|a| {
                if let Some(clause) = init {
                    let ty = a.visit_expression(&mut clause.value)?;
                    let binding = Variable::new(clause.name.clone(), ty, false);
                    clause.variable = Some(a.env.define_variable(binding)?);
                }

                let cond = a.visit_expression(condition)?;
                a.env.require_assignable(Environment::BOOLEAN, cond)?;

                if let Some(clause) = increment {
                    let id = a.env.lookup_variable(&clause.name)?;
                    let target = a.env.variable(id).ty;
                    let actual = a.visit_expression(&mut clause.value)?;
                    a.env.require_assignable(target, actual)?;
                    clause.variable = Some(id);
                }

                if body.is_empty() {
                    return Err(SemanticError::invalid(
                        "for statement needs a non-empty body",
                    ));
                }
                a.scoped(|a| {
                    for statement in body {
                        a.visit_statement(statement)?;
                    }
                    Ok(())
                })
            }),

            Statement::Return { value } => {
                let actual = self.visit_expression(value)?;
                let return_type = self.env.lookup_variable(RETURN_TYPE)?;
                let target = self.env.variable(return_type).ty;
                self.env.require_assignable(target, actual)
            }
        }
    }

    /// Visit an expression, fill its type slot, and return the type.
    fn visit_expression(&mut self, expression: &mut Expression) -> Result<TypeId, SemanticError> {
        let ty = match &mut expression.kind {
            ExprKind::Literal(literal) => self.literal_type(literal)?,

            ExprKind::Group(inner) => {
                if !matches!(inner.kind, ExprKind::Binary { .. }) {
                    return Err(SemanticError::invalid(
                        "redundant grouping: parentheses must wrap a binary expression",
                    ));
                }
                self.visit_expression(inner)?
            }

            ExprKind::Binary { op, left, right } => {
                let op = *op;
                let lhs = self.visit_expression(left)?;
                let rhs = self.visit_expression(right)?;
                self.binary_type(op, lhs, rhs)?
            }

            ExprKind::Access {
                receiver,
                name,
                variable,
            } => match receiver {
                Some(receiver) => {
                    let receiver_type = self.visit_expression(receiver)?;
                    let ty = self.env.ty(receiver_type);
                    let field = ty.fields.get(name.as_str()).copied().ok_or_else(|| {
                        SemanticError::undefined(format!("{}.{name}", ty.name))
                    })?;
                    *variable = Some(field);
                    self.env.variable(field).ty
                }
                None => {
                    let id = self.env.lookup_variable(name)?;
                    *variable = Some(id);
                    self.env.variable(id).ty
                }
            },

            ExprKind::Function {
                receiver,
                name,
                arguments,
                function,
            } => match receiver {
                Some(receiver) => {
                    let receiver_type = self.visit_expression(receiver)?;
                    let mut argument_types = Vec::with_capacity(arguments.len());
                    for argument in arguments.iter_mut() {
                        argument_types.push(self.visit_expression(argument)?);
                    }

                    // Methods take the receiver as parameter 0.
                    let arity = argument_types.len() + 1;
                    let ty = self.env.ty(receiver_type);
                    let id = ty
                        .methods
                        .get(&(name.clone(), arity))
                        .copied()
                        .ok_or_else(|| {
                            SemanticError::undefined(format!("{}.{name}/{arity}", ty.name))
                        })?;

                    let declared = self.env.function(id);
                    let param_types = declared.param_types.clone();
                    let return_type = declared.return_type;
                    if let Some(self_param) = param_types.first() {
                        self.env.require_assignable(*self_param, receiver_type)?;
                    }
                    for (param, argument) in param_types.iter().skip(1).zip(argument_types) {
                        self.env.require_assignable(*param, argument)?;
                    }
                    *function = Some(id);
                    return_type
                }
                None => {
                    let mut argument_types = Vec::with_capacity(arguments.len());
                    for argument in arguments.iter_mut() {
                        argument_types.push(self.visit_expression(argument)?);
                    }

                    let id = self.env.lookup_function(name, arguments.len())?;
                    let declared = self.env.function(id);
                    let param_types = declared.param_types.clone();
                    let return_type = declared.return_type;
                    for (param, argument) in param_types.iter().zip(argument_types) {
                        self.env.require_assignable(*param, argument)?;
                    }
                    *function = Some(id);
                    return_type
                }
            },
        };

        expression.ty = Some(ty);
        Ok(ty)
    }

    fn literal_type(&self, literal: &Literal) -> Result<TypeId, SemanticError> {
        Ok(match literal {
            Literal::Nil => Environment::NIL,
            Literal::Bool(_) => Environment::BOOLEAN,
            Literal::Character(_) => Environment::CHARACTER,
            Literal::String(_) => Environment::STRING,
            Literal::Integer(value) => {
                if value.to_i32().is_none() {
                    return Err(SemanticError::invalid(format!(
                        "integer literal '{value}' does not fit a signed 32-bit range"
                    )));
                }
                Environment::INTEGER
            }
            Literal::Decimal(value) => {
                if !value.to_f64().is_some_and(f64::is_finite) {
                    return Err(SemanticError::invalid(format!(
                        "decimal literal '{value}' is not representable as a finite 64-bit float"
                    )));
                }
                Environment::DECIMAL
            }
        })
    }

    fn binary_type(
        &self,
        op: BinaryOp,
        lhs: TypeId,
        rhs: TypeId,
    ) -> Result<TypeId, SemanticError> {
        match op {
            BinaryOp::And | BinaryOp::Or => {
                self.env.require_assignable(Environment::BOOLEAN, lhs)?;
                self.env.require_assignable(Environment::BOOLEAN, rhs)?;
                Ok(Environment::BOOLEAN)
            }
            BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge
            | BinaryOp::Eq
            | BinaryOp::Ne => {
                self.env.require_assignable(Environment::COMPARABLE, lhs)?;
                self.env.require_assignable(Environment::COMPARABLE, rhs)?;
                if lhs != rhs {
                    return Err(SemanticError::type_mismatch(
                        &self.env.ty(lhs).name,
                        &self.env.ty(rhs).name,
                    ));
                }
                Ok(Environment::BOOLEAN)
            }
            BinaryOp::Add => {
                if lhs == Environment::STRING || rhs == Environment::STRING {
                    Ok(Environment::STRING)
                } else {
                    self.require_numeric_pair(lhs, rhs)?;
                    Ok(lhs)
                }
            }
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                self.require_numeric_pair(lhs, rhs)?;
                Ok(lhs)
            }
        }
    }

    /// The left side must be numeric and the right side must match it.
    fn require_numeric_pair(&self, lhs: TypeId, rhs: TypeId) -> Result<(), SemanticError> {
        if lhs != Environment::INTEGER && lhs != Environment::DECIMAL {
            return Err(SemanticError::type_mismatch(
                "Integer or Decimal",
                &self.env.ty(lhs).name,
            ));
        }
        if lhs != rhs {
            return Err(SemanticError::type_mismatch(
                &self.env.ty(lhs).name,
                &self.env.ty(rhs).name,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plcc_env::Value;
    use plcc_par::parse;

    fn analyzed(source: &str) -> Result<(Source, Environment), SemanticError> {
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
        Ok((ast, env))
    }

    const EMPTY_MAIN: &str = "DEF main(): Integer DO RETURN 0; END";

    #[test]
    fn test_missing_main_rejected() {
        let err = analyzed("DEF foo() DO RETURN 0; END").unwrap_err();
        assert_eq!(err, SemanticError::undefined("main/0"));
    }

    #[test]
    fn test_main_must_return_integer() {
        let err = analyzed("DEF main(): String DO RETURN \"x\"; END").unwrap_err();
        assert_eq!(err, SemanticError::type_mismatch("Integer", "String"));
    }

    #[test]
    fn test_main_wrong_arity_is_missing() {
        let err = analyzed("DEF main(x: Integer): Integer DO RETURN x; END").unwrap_err();
        assert_eq!(err, SemanticError::undefined("main/0"));
    }

    #[test]
    fn test_literal_annotation() {
        let (ast, _) = analyzed(EMPTY_MAIN).unwrap();
        let Statement::Return { value } = &ast.methods[0].body[0] else {
            panic!("expected return");
        };
        assert_eq!(value.ty, Some(Environment::INTEGER));
        assert!(ast.methods[0].function.is_some());
    }

    #[test]
    fn test_field_annotation_and_typing() {
        let source = format!("LET CONST PI: Decimal = 3.14; {EMPTY_MAIN}");
        let (ast, env) = analyzed(&source).unwrap();
        let variable = ast.fields[0].variable.unwrap();
        assert_eq!(env.variable(variable).ty, Environment::DECIMAL);
        assert!(env.variable(variable).constant);
    }

    #[test]
    fn test_field_initializer_must_be_assignable() {
        let err = analyzed(&format!("LET x: Integer = 1.0; {EMPTY_MAIN}")).unwrap_err();
        assert_eq!(err, SemanticError::type_mismatch("Integer", "Decimal"));
    }

    #[test]
    fn test_constant_field_needs_initializer() {
        let err = analyzed(&format!("LET CONST x: Integer; {EMPTY_MAIN}")).unwrap_err();
        assert!(matches!(err, SemanticError::Invalid(_)));
    }

    #[test]
    fn test_field_cannot_reference_itself() {
        let err = analyzed(&format!("LET x: Integer = x; {EMPTY_MAIN}")).unwrap_err();
        assert_eq!(err, SemanticError::undefined("x"));
    }

    #[test]
    fn test_declaration_needs_type_or_initializer() {
        let err =
            analyzed("DEF main(): Integer DO LET x; RETURN 0; END").unwrap_err();
        assert!(matches!(err, SemanticError::Invalid(_)));
    }

    #[test]
    fn test_declaration_infers_type_from_initializer() {
        let (ast, env) =
            analyzed("DEF main(): Integer DO LET x = \"hi\"; RETURN 0; END").unwrap();
        let Statement::Declaration { variable, .. } = &ast.methods[0].body[0] else {
            panic!("expected declaration");
        };
        assert_eq!(env.variable(variable.unwrap()).ty, Environment::STRING);
    }

    #[test]
    fn test_assignment_receiver_must_be_access() {
        let err = analyzed("DEF main(): Integer DO 1 = 2; RETURN 0; END").unwrap_err();
        assert!(matches!(err, SemanticError::Invalid(_)));
    }

    #[test]
    fn test_assignment_type_checked() {
        let err = analyzed(
            "DEF main(): Integer DO LET x: Integer = 1; x = TRUE; RETURN 0; END",
        )
        .unwrap_err();
        assert_eq!(err, SemanticError::type_mismatch("Integer", "Boolean"));
    }

    #[test]
    fn test_statement_expression_must_be_call() {
        let err = analyzed("DEF main(): Integer DO 1 + 1; RETURN 0; END").unwrap_err();
        assert!(matches!(err, SemanticError::Invalid(_)));

        analyzed("DEF main(): Integer DO print(1); RETURN 0; END").unwrap();
    }

    #[test]
    fn test_if_condition_must_be_boolean() {
        let err =
            analyzed("DEF main(): Integer DO IF 1 DO RETURN 0; END RETURN 0; END").unwrap_err();
        assert_eq!(err, SemanticError::type_mismatch("Boolean", "Integer"));
    }

    #[test]
    fn test_if_then_branch_must_be_non_empty() {
        let err =
            analyzed("DEF main(): Integer DO IF TRUE DO END RETURN 0; END").unwrap_err();
        assert!(matches!(err, SemanticError::Invalid(_)));
    }

    #[test]
    fn test_branch_declarations_do_not_leak() {
        let err = analyzed(
            "DEF main(): Integer DO \
             IF TRUE DO LET y = 1; ELSE LET y = 2; END \
             RETURN y; END",
        )
        .unwrap_err();
        assert_eq!(err, SemanticError::undefined("y"));
    }

    #[test]
    fn test_branches_may_shadow_each_other() {
        // Each branch gets its own child scope, so the same name in both
        // branches is shadowing, not redefinition.
        analyzed(
            "DEF main(): Integer DO \
             IF TRUE DO LET y = 1; print(y); ELSE LET y = 2; print(y); END \
             RETURN 0; END",
        )
        .unwrap();
    }

    #[test]
    fn test_while_body_may_be_empty() {
        analyzed("DEF main(): Integer DO WHILE FALSE DO END RETURN 0; END").unwrap();
    }

    #[test]
    fn test_for_loop_checks() {
        let (ast, env) = analyzed(
            "DEF main(): Integer DO \
             FOR (i = 0; i < 3; i = i + 1) print(i); END \
             RETURN 0; END",
        )
        .unwrap();
        let Statement::For { init, increment, .. } = &ast.methods[0].body[0] else {
            panic!("expected for");
        };
        let induction = init.as_ref().unwrap().variable.unwrap();
        assert_eq!(env.variable(induction).ty, Environment::INTEGER);
        assert_eq!(increment.as_ref().unwrap().variable, Some(induction));
    }

    #[test]
    fn test_for_increment_type_must_match() {
        let err = analyzed(
            "DEF main(): Integer DO \
             FOR (i = 0; i < 3; i = TRUE) print(i); END \
             RETURN 0; END",
        )
        .unwrap_err();
        assert_eq!(err, SemanticError::type_mismatch("Integer", "Boolean"));
    }

    #[test]
    fn test_for_body_must_be_non_empty() {
        let err = analyzed(
            "DEF main(): Integer DO FOR (; TRUE ;) END RETURN 0; END",
        )
        .unwrap_err();
        assert!(matches!(err, SemanticError::Invalid(_)));
    }

    #[test]
    fn test_for_induction_variable_does_not_leak() {
        let err = analyzed(
            "DEF main(): Integer DO \
             FOR (i = 0; i < 3; i = i + 1) print(i); END \
             RETURN i; END",
        )
        .unwrap_err();
        assert_eq!(err, SemanticError::undefined("i"));
    }

    #[test]
    fn test_return_checked_against_declared_type() {
        let err = analyzed("DEF main(): Integer DO RETURN \"no\"; END").unwrap_err();
        assert_eq!(err, SemanticError::type_mismatch("Integer", "String"));
    }

    #[test]
    fn test_method_without_return_type_accepts_anything() {
        analyzed(&format!("DEF helper() DO RETURN 1.5; END {EMPTY_MAIN}")).unwrap();
    }

    #[test]
    fn test_recursion_is_permitted() {
        analyzed(
            "DEF fact(n: Integer): Integer DO \
             IF n <= 1 DO RETURN 1; ELSE RETURN n * fact(n - 1); END END \
             DEF main(): Integer DO RETURN fact(5); END",
        )
        .unwrap();
    }

    #[test]
    fn test_call_argument_types_checked() {
        let err = analyzed(
            "DEF twice(x: Integer): Integer DO RETURN x + x; END \
             DEF main(): Integer DO RETURN twice(TRUE); END",
        )
        .unwrap_err();
        assert_eq!(err, SemanticError::type_mismatch("Integer", "Boolean"));
    }

    #[test]
    fn test_call_arity_mismatch_is_unresolved() {
        let err = analyzed(
            "DEF twice(x: Integer): Integer DO RETURN x + x; END \
             DEF main(): Integer DO RETURN twice(1, 2); END",
        )
        .unwrap_err();
        assert_eq!(err, SemanticError::undefined("twice/2"));
    }

    #[test]
    fn test_group_must_wrap_binary() {
        let err = analyzed("DEF main(): Integer DO RETURN (1); END").unwrap_err();
        assert!(matches!(err, SemanticError::Invalid(_)));

        analyzed("DEF main(): Integer DO RETURN (1 + 2); END").unwrap();
    }

    #[test]
    fn test_integer_literal_range() {
        analyzed("DEF main(): Integer DO RETURN 2147483647; END").unwrap();
        let err = analyzed("DEF main(): Integer DO RETURN 2147483648; END").unwrap_err();
        assert!(matches!(err, SemanticError::Invalid(_)));
        analyzed("DEF main(): Integer DO RETURN -2147483648; END").unwrap();
    }

    #[test]
    fn test_binary_typing_table() {
        // String concatenation from either side.
        analyzed("DEF main(): Integer DO LET s = \"n=\" + 1; RETURN 0; END").unwrap();
        analyzed("DEF main(): Integer DO LET s = 1 + \"=n\"; RETURN 0; END").unwrap();

        // Mixed numeric arithmetic is rejected.
        let err =
            analyzed("DEF main(): Integer DO LET x = 1 + 1.0; RETURN 0; END").unwrap_err();
        assert_eq!(err, SemanticError::type_mismatch("Integer", "Decimal"));

        // Comparisons require matching comparable operands.
        let err =
            analyzed("DEF main(): Integer DO LET b = 1 < 'a'; RETURN 0; END").unwrap_err();
        assert_eq!(err, SemanticError::type_mismatch("Integer", "Character"));
        let err =
            analyzed("DEF main(): Integer DO LET b = TRUE == TRUE; RETURN 0; END").unwrap_err();
        assert_eq!(err, SemanticError::type_mismatch("Comparable", "Boolean"));

        // Logical operators require booleans.
        let err =
            analyzed("DEF main(): Integer DO LET b = TRUE && 1; RETURN 0; END").unwrap_err();
        assert_eq!(err, SemanticError::type_mismatch("Boolean", "Integer"));
    }

    #[test]
    fn test_scope_restored_after_analysis() {
        let (_, env) = analyzed(EMPTY_MAIN).unwrap();
        assert_eq!(env.current_scope(), env.root_scope());
    }

    #[test]
    fn test_scope_restored_after_failure() {
        let mut ast =
            parse("DEF main(): Integer DO IF TRUE DO RETURN \"no\"; END RETURN 0; END").unwrap();
        let mut env = Environment::new();
        let root = env.current_scope();
        assert!(analyze(&mut ast, &mut env).is_err());
        assert_eq!(env.current_scope(), root);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let source = "LET greeting: String = \"hi\"; \
                      DEF shout(times: Integer): Integer DO \
                      FOR (i = 0; i < times; i = i + 1) print(greeting); END \
                      RETURN times; END \
                      DEF main(): Integer DO RETURN shout(3); END";
        let (first, _) = analyzed(source).unwrap();
        let mut second = first.clone();
        let mut env = Environment::new();
        env.define_host_function(
            "print",
            "System.out.println",
            vec![Environment::ANY],
            Environment::NIL,
            |_| Ok(Value::Nil),
        )
        .unwrap();
        analyze(&mut second, &mut env).unwrap();
        assert_eq!(first, second);
    }
}
