//! AST-to-text generation.

use std::fmt;

use plcc_env::{Environment, Function, Variable};
use plcc_par::{ExprKind, Expression, Field, Literal, LoopClause, Method, Source, Statement};
use plcc_util::{FunctionId, VariableId};

use crate::error::GenError;
use crate::writer::Writer;

/// Emit an analyzed source tree as target-language text.
///
/// The sink is treated as infallible within the contract; a sink failure
/// or an empty annotation slot aborts generation with a [`GenError`], and
/// nothing more is written after a failure.
pub fn generate<W: fmt::Write>(
    source: &Source,
    env: &Environment,
    out: &mut W,
) -> Result<(), GenError> {
    Generator {
        env,
        w: Writer::new(out),
    }
    .gen_source(source)
}

struct Generator<'a, W: fmt::Write> {
    env: &'a Environment,
    w: Writer<'a, W>,
}

impl<'a, W: fmt::Write> Generator<'a, W> {
    /// `(indent in; emit; indent out)` balanced on every path, including
    /// early error returns.
    fn indented(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), GenError>,
    ) -> Result<(), GenError> {
        self.w.indent_in();
        let result = f(self);
        self.w.indent_out();
        result
    }

    fn variable(&self, slot: Option<VariableId>, name: &str) -> Result<&'a Variable, GenError> {
        slot.map(|id| self.env.variable(id))
            .ok_or_else(|| GenError::Unresolved(name.to_string()))
    }

    fn function(&self, slot: Option<FunctionId>, name: &str) -> Result<&'a Function, GenError> {
        slot.map(|id| self.env.function(id))
            .ok_or_else(|| GenError::Unresolved(name.to_string()))
    }

    fn gen_source(mut self, source: &Source) -> Result<(), GenError> {
        self.w.word("public class Main {")?;
        self.indented(|g| {
            if !source.fields.is_empty() {
                g.w.blank()?;
                for field in &source.fields {
                    g.w.line()?;
                    g.gen_field(field)?;
                }
            }

            g.w.blank()?;
            g.w.line()?;
            g.w.word("public static void main(String[] args) {")?;
            g.indented(|g| {
                g.w.line()?;
                g.w.word("System.exit(new Main().main());")
            })?;
            g.w.line()?;
            g.w.word("}")?;

            for method in &source.methods {
                g.w.blank()?;
                g.w.line()?;
                g.gen_method(method)?;
            }
            Ok(())
        })?;
        self.w.blank()?;
        self.w.line()?;
        self.w.word("}")
    }

    fn gen_field(&mut self, field: &Field) -> Result<(), GenError> {
        let variable = self.variable(field.variable, &field.name)?;
        let ty = self.env.ty(variable.ty);
        if field.constant {
            self.w.word("final ")?;
        }
        self.w.word(&ty.jvm_name)?;
        self.w.word(" ")?;
        self.w.word(&variable.jvm_name)?;
        if let Some(value) = &field.value {
            self.w.word(" = ")?;
            self.gen_expression(value)?;
        }
        self.w.word(";")
    }

    fn gen_method(&mut self, method: &Method) -> Result<(), GenError> {
        let function = self.function(method.function, &method.name)?;
        self.w.word(&self.env.ty(function.return_type).jvm_name)?;
        self.w.word(" ")?;
        self.w.word(&function.jvm_name)?;
        self.w.word("(")?;
        for (index, (name, ty)) in method.params.iter().zip(&function.param_types).enumerate() {
            if index > 0 {
                self.w.word(", ")?;
            }
            self.w.word(&self.env.ty(*ty).jvm_name)?;
            self.w.word(" ")?;
            self.w.word(name)?;
        }
        self.w.word(") ")?;
        self.gen_block(&method.body)
    }

    /// An empty block is `{}`; a non-empty one puts each statement on its
    /// own line at the next indent, with the closing brace back at the
    /// current one.
    fn gen_block(&mut self, body: &[Statement]) -> Result<(), GenError> {
        if body.is_empty() {
            return self.w.word("{}");
        }
        self.w.word("{")?;
        self.indented(|g| {
            for statement in body {
                g.w.line()?;
                g.gen_statement(statement)?;
            }
            Ok(())
        })?;
        self.w.line()?;
        self.w.word("}")
    }

    fn gen_statement(&mut self, statement: &Statement) -> Result<(), GenError> {
        match statement {
            Statement::Expression(expression) => {
                self.gen_expression(expression)?;
                self.w.word(";")
            }

            Statement::Declaration {
                name,
                value,
                variable,
                ..
            } => {
                let variable = self.variable(*variable, name)?;
                self.w.word(&self.env.ty(variable.ty).jvm_name)?;
                self.w.word(" ")?;
                self.w.word(&variable.jvm_name)?;
                if let Some(value) = value {
                    self.w.word(" = ")?;
                    self.gen_expression(value)?;
                }
                self.w.word(";")
            }

            Statement::Assignment { receiver, value } => {
                self.gen_expression(receiver)?;
                self.w.word(" = ")?;
                self.gen_expression(value)?;
                self.w.word(";")
            }

            Statement::If {
                condition,
                then_body,
                else_body,
            } => {
                self.w.word("if (")?;
                self.gen_expression(condition)?;
                self.w.word(") ")?;
                self.gen_block(then_body)?;
                if !else_body.is_empty() {
                    self.w.word(" else ")?;
                    self.gen_block(else_body)?;
                }
                Ok(())
            }

            Statement::While { condition, body } => {
                self.w.word("while (")?;
                self.gen_expression(condition)?;
                self.w.word(") ")?;
                self.gen_block(body)
            }

            Statement::For {
                init,
                condition,
                increment,
                body,
            } => {
                self.w.word("for (")?;
                if let Some(clause) = init {
                    self.w.word(" ")?;
                    self.gen_loop_clause(clause)?;
                }
                self.w.word(" ;")?;
                self.w.word(" ")?;
                self.gen_expression(condition)?;
                self.w.word(" ;")?;
                if let Some(clause) = increment {
                    self.w.word(" ")?;
                    self.gen_loop_clause(clause)?;
                }
                self.w.word(" ) ")?;
                self.gen_block(body)
            }

            Statement::Return { value } => {
                self.w.word("return ")?;
                self.gen_expression(value)?;
                self.w.word(";")
            }
        }
    }

    fn gen_loop_clause(&mut self, clause: &LoopClause) -> Result<(), GenError> {
        let variable = self.variable(clause.variable, &clause.name)?;
        self.w.word(&variable.jvm_name)?;
        self.w.word(" = ")?;
        self.gen_expression(&clause.value)
    }

    fn gen_expression(&mut self, expression: &Expression) -> Result<(), GenError> {
        match &expression.kind {
            ExprKind::Literal(literal) => self.gen_literal(literal),

            ExprKind::Group(inner) => {
                self.w.word("(")?;
                self.gen_expression(inner)?;
                self.w.word(")")
            }

            ExprKind::Binary { op, left, right } => {
                self.gen_expression(left)?;
                self.w.word(&format!(" {op} "))?;
                self.gen_expression(right)
            }

            ExprKind::Access {
                receiver,
                name,
                variable,
            } => {
                let variable = self.variable(*variable, name)?;
                if let Some(receiver) = receiver {
                    self.gen_expression(receiver)?;
                    self.w.word(".")?;
                }
                self.w.word(&variable.jvm_name)
            }

            ExprKind::Function {
                receiver,
                name,
                arguments,
                function,
            } => {
                let function = self.function(*function, name)?;
                if let Some(receiver) = receiver {
                    self.gen_expression(receiver)?;
                    self.w.word(".")?;
                }
                self.w.word(&function.jvm_name)?;
                self.w.word("(")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        self.w.word(", ")?;
                    }
                    self.gen_expression(argument)?;
                }
                self.w.word(")")
            }
        }
    }

    fn gen_literal(&mut self, literal: &Literal) -> Result<(), GenError> {
        match literal {
            Literal::Nil => self.w.word("null"),
            Literal::Bool(b) => self.w.word(if *b { "true" } else { "false" }),
            Literal::Character(c) => self.w.word(&format!("'{c}'")),
            Literal::String(s) => self.w.word(&format!("\"{s}\"")),
            Literal::Integer(i) => self.w.word(&i.to_string()),
            Literal::Decimal(d) => self.w.word(&d.to_string()),
        }
    }
}
