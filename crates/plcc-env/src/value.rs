//! Runtime values.

use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use plcc_util::{ScopeId, SemanticError};

/// A runtime value. Numeric payloads stay arbitrary precision through the
/// whole pipeline so that e.g. `1000000 * 1000000` is exact at runtime.
///
/// Objects are handles to a scope holding their fields and methods; the
/// scope lives in the same environment as every other scope.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    Character(char),
    String(String),
    Object(ScopeId),
}

impl Value {
    /// The language-level type name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Decimal(_) => "Decimal",
            Value::Character(_) => "Character",
            Value::String(_) => "String",
            Value::Object(_) => "Object",
        }
    }

    /// Dynamic type check: the payload must be a boolean.
    pub fn as_bool(&self) -> Result<bool, SemanticError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(SemanticError::type_mismatch("Boolean", other.type_name())),
        }
    }

    /// Dynamic type check: the payload must be an integer.
    pub fn as_integer(&self) -> Result<&BigInt, SemanticError> {
        match self {
            Value::Integer(i) => Ok(i),
            other => Err(SemanticError::type_mismatch("Integer", other.type_name())),
        }
    }

    /// Dynamic type check: the payload must be a decimal.
    pub fn as_decimal(&self) -> Result<&BigDecimal, SemanticError> {
        match self {
            Value::Decimal(d) => Ok(d),
            other => Err(SemanticError::type_mismatch("Decimal", other.type_name())),
        }
    }

    /// Dynamic type check: the payload must be a character.
    pub fn as_character(&self) -> Result<char, SemanticError> {
        match self {
            Value::Character(c) => Ok(*c),
            other => Err(SemanticError::type_mismatch("Character", other.type_name())),
        }
    }

    /// Dynamic type check: the payload must be a string.
    pub fn as_string(&self) -> Result<&str, SemanticError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(SemanticError::type_mismatch("String", other.type_name())),
        }
    }

    /// Dynamic type check: the payload must be an object.
    pub fn as_object(&self) -> Result<ScopeId, SemanticError> {
        match self {
            Value::Object(scope) => Ok(*scope),
            other => Err(SemanticError::type_mismatch("Object", other.type_name())),
        }
    }

    /// True when either operand of `+` should trigger string
    /// concatenation.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }
}

/// Structural equality: never across variants, and representation-exact
/// for decimals (`2.5` and `2.50` are different values).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => {
                a.as_bigint_and_exponent() == b.as_bigint_and_exponent()
            }
            (Value::Character(a), Value::Character(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// Display form: also the rendering used by string concatenation and the
/// default `print` binding.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Character(c) => write!(f, "{c}"),
            Value::String(s) => f.write_str(s),
            Value::Object(_) => f.write_str("object"),
        }
    }
}
