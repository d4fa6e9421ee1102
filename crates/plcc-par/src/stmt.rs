//! Statement parsing.

use crate::ast::{LoopClause, Statement};
use crate::Parser;
use plcc_util::ParseError;

impl<'src> Parser<'src> {
    /// Parse one statement. Statements starting with a keyword dispatch on
    /// it; everything else is `expr ('=' expr)? ';'`.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if self.check_keyword("LET") {
            self.parse_declaration()
        } else if self.check_keyword("IF") {
            self.parse_if()
        } else if self.check_keyword("FOR") {
            self.parse_for()
        } else if self.check_keyword("WHILE") {
            self.parse_while()
        } else if self.check_keyword("RETURN") {
            self.parse_return()
        } else {
            self.parse_expression_or_assignment()
        }
    }

    /// Parse statements up to (not consuming) one of the stop keywords.
    pub(crate) fn parse_statements_until(
        &mut self,
        stops: &[&str],
    ) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        while !self.is_at_end() && !stops.iter().any(|stop| self.check_keyword(stop)) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    /// `'LET' ID (':' ID)? ('=' expr)? ';'`
    fn parse_declaration(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword("LET")?;
        let name = self.expect_identifier("variable name")?;
        let type_name = if self.match_operator(":") {
            Some(self.expect_identifier("type name")?)
        } else {
            None
        };
        let value = if self.match_operator("=") {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_operator(";")?;

        Ok(Statement::Declaration {
            name,
            type_name,
            value,
            variable: None,
        })
    }

    /// `'IF' expr 'DO' stmt* ('ELSE' stmt*)? 'END'`
    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword("IF")?;
        let condition = self.parse_expression()?;
        self.expect_keyword("DO")?;
        let then_body = self.parse_statements_until(&["ELSE", "END"])?;
        let else_body = if self.match_keyword("ELSE") {
            self.parse_statements_until(&["END"])?
        } else {
            Vec::new()
        };
        self.expect_keyword("END")?;

        Ok(Statement::If {
            condition,
            then_body,
            else_body,
        })
    }

    /// `'FOR' '(' (ID '=' expr)? ';' expr ';' (ID '=' expr)? ')' stmt* 'END'`
    fn parse_for(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword("FOR")?;
        self.expect_operator("(")?;

        let init = if self.check_operator(";") {
            None
        } else {
            Some(self.parse_loop_clause()?)
        };
        self.expect_operator(";")?;

        let condition = self.parse_expression()?;
        self.expect_operator(";")?;

        let increment = if self.check_operator(")") {
            None
        } else {
            Some(self.parse_loop_clause()?)
        };
        self.expect_operator(")")?;

        let body = self.parse_statements_until(&["END"])?;
        self.expect_keyword("END")?;

        Ok(Statement::For {
            init,
            condition,
            increment,
            body,
        })
    }

    fn parse_loop_clause(&mut self) -> Result<LoopClause, ParseError> {
        let name = self.expect_identifier("loop variable")?;
        self.expect_operator("=")?;
        let value = self.parse_expression()?;
        Ok(LoopClause {
            name,
            value,
            variable: None,
        })
    }

    /// `'WHILE' expr 'DO' stmt* 'END'`
    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword("WHILE")?;
        let condition = self.parse_expression()?;
        self.expect_keyword("DO")?;
        let body = self.parse_statements_until(&["END"])?;
        self.expect_keyword("END")?;

        Ok(Statement::While { condition, body })
    }

    /// `'RETURN' expr ';'`
    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword("RETURN")?;
        let value = self.parse_expression()?;
        self.expect_operator(";")?;
        Ok(Statement::Return { value })
    }

    /// `expr ('=' expr)? ';'`
    fn parse_expression_or_assignment(&mut self) -> Result<Statement, ParseError> {
        let expression = self.parse_expression()?;

        if self.match_operator("=") {
            let value = self.parse_expression()?;
            self.expect_operator(";")?;
            return Ok(Statement::Assignment {
                receiver: expression,
                value,
            });
        }

        self.expect_operator(";")?;
        Ok(Statement::Expression(expression))
    }
}
