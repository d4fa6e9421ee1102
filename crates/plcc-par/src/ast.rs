//! AST node definitions.
//!
//! The parser produces these nodes with every annotation slot (`ty`,
//! `variable`, `function`) set to `None`; the analyzer fills the slots in
//! place, after which the tree is treated as read-only by the interpreter
//! and the generator.

use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use plcc_util::{FunctionId, TypeId, VariableId};

/// AST root: a source file is a list of fields followed by a list of
/// methods.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Source {
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

/// Top-level variable declaration, e.g. `LET CONST PI: Decimal = 3.14;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub type_name: String,
    pub constant: bool,
    pub value: Option<Expression>,
    /// Resolved binding, filled by the analyzer.
    pub variable: Option<VariableId>,
}

/// Method definition, e.g. `DEF main(): Integer DO ... END`.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub params: Vec<String>,
    pub param_type_names: Vec<String>,
    pub return_type_name: Option<String>,
    pub body: Vec<Statement>,
    /// Resolved binding, filled by the analyzer.
    pub function: Option<FunctionId>,
}

/// The `name = expr` clause of a `FOR` header (init or increment).
#[derive(Debug, Clone, PartialEq)]
pub struct LoopClause {
    pub name: String,
    pub value: Expression,
    /// Resolved induction variable, filled by the analyzer.
    pub variable: Option<VariableId>,
}

/// A statement inside a method body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A bare expression followed by `;`. Only function calls are legal
    /// here; the analyzer rejects everything else.
    Expression(Expression),

    /// `LET name (: Type)? (= value)? ;`
    Declaration {
        name: String,
        type_name: Option<String>,
        value: Option<Expression>,
        /// Resolved binding, filled by the analyzer.
        variable: Option<VariableId>,
    },

    /// `receiver = value ;` — the receiver must be an access expression,
    /// which is a semantic (not syntactic) requirement.
    Assignment {
        receiver: Expression,
        value: Expression,
    },

    /// `IF cond DO ... (ELSE ...)? END`
    If {
        condition: Expression,
        then_body: Vec<Statement>,
        else_body: Vec<Statement>,
    },

    /// `FOR ( init? ; cond ; incr? ) ... END`
    For {
        init: Option<LoopClause>,
        condition: Expression,
        increment: Option<LoopClause>,
        body: Vec<Statement>,
    },

    /// `WHILE cond DO ... END`
    While {
        condition: Expression,
        body: Vec<Statement>,
    },

    /// `RETURN value ;`
    Return { value: Expression },
}

/// An expression together with its type slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExprKind,
    /// Resolved type, filled by the analyzer.
    pub ty: Option<TypeId>,
}

impl Expression {
    /// An un-annotated expression.
    pub fn new(kind: ExprKind) -> Self {
        Self { kind, ty: None }
    }
}

/// Expression shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression. Must wrap a binary expression; other
    /// groupings are redundant and rejected by the analyzer.
    Group(Box<Expression>),

    /// A binary operation, operators drawn from the closed [`BinaryOp`]
    /// set.
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// A variable read (`name`) or field read (`receiver.name`).
    Access {
        receiver: Option<Box<Expression>>,
        name: String,
        /// Resolved binding, filled by the analyzer.
        variable: Option<VariableId>,
    },

    /// A function call (`name(args)`) or method call
    /// (`receiver.name(args)`).
    Function {
        receiver: Option<Box<Expression>>,
        name: String,
        arguments: Vec<Expression>,
        /// Resolved binding, filled by the analyzer.
        function: Option<FunctionId>,
    },
}

/// Decoded literal payloads. Numeric payloads are arbitrary precision;
/// the analyzer enforces the representability limits.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Bool(bool),
    Character(char),
    String(String),
    Integer(BigInt),
    Decimal(BigDecimal),
}

/// The closed set of binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    And,
    Or,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Map a surface operator lexeme to its operator, if any.
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        Some(match lexeme {
            "&&" => BinaryOp::And,
            "||" => BinaryOp::Or,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Le,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::Ge,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::Ne,
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            _ => return None,
        })
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        };
        f.write_str(op)
    }
}
