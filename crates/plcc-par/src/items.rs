//! Top-level item parsing: source files, fields, and methods.

use crate::ast::{Field, Method, Source};
use crate::Parser;
use plcc_util::ParseError;

impl<'src> Parser<'src> {
    /// Parse `field* method*`. Every field must precede every method; a
    /// `LET` after a `DEF` is a parse error.
    pub fn parse_source(&mut self) -> Result<Source, ParseError> {
        let mut source = Source::default();

        while !self.is_at_end() {
            if self.check_keyword("LET") {
                if !source.methods.is_empty() {
                    return Err(self.error("field declared after a method"));
                }
                source.fields.push(self.parse_field()?);
            } else if self.check_keyword("DEF") {
                source.methods.push(self.parse_method()?);
            } else {
                return Err(self.error("expected 'LET' or 'DEF'"));
            }
        }

        Ok(source)
    }

    /// `'LET' 'CONST'? ID ':' ID ('=' expr)? ';'`
    pub(crate) fn parse_field(&mut self) -> Result<Field, ParseError> {
        self.expect_keyword("LET")?;
        let constant = self.match_keyword("CONST");
        let name = self.expect_identifier("field name")?;
        self.expect_operator(":")?;
        let type_name = self.expect_identifier("type name")?;
        let value = if self.match_operator("=") {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_operator(";")?;

        Ok(Field {
            name,
            type_name,
            constant,
            value,
            variable: None,
        })
    }

    /// `'DEF' ID '(' params? ')' (':' ID)? 'DO' stmt* 'END'`
    pub(crate) fn parse_method(&mut self) -> Result<Method, ParseError> {
        self.expect_keyword("DEF")?;
        let name = self.expect_identifier("method name")?;
        self.expect_operator("(")?;

        let mut params = Vec::new();
        let mut param_type_names = Vec::new();
        if !self.check_operator(")") {
            loop {
                params.push(self.expect_identifier("parameter name")?);
                self.expect_operator(":")?;
                param_type_names.push(self.expect_identifier("parameter type")?);
                if !self.match_operator(",") {
                    break;
                }
            }
        }
        self.expect_operator(")")?;

        let return_type_name = if self.match_operator(":") {
            Some(self.expect_identifier("return type")?)
        } else {
            None
        };

        self.expect_keyword("DO")?;
        let body = self.parse_statements_until(&["END"])?;
        self.expect_keyword("END")?;

        Ok(Method {
            name,
            params,
            param_type_names,
            return_type_name,
            body,
            function: None,
        })
    }
}
