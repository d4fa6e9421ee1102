//! plcc-drv - Pipeline driver.
//!
//! Ties the stages together behind a handful of entry points. Each one
//! takes a complete source string; the environment argument is the root
//! scope, pre-populated with host bindings (see [`default_environment`]).
//!
//! The analyzer and the interpreter both define the program's names in
//! the environment they are given, so each pipeline run wants a fresh
//! environment.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use plcc_lex::Token;
use plcc_par::Source;

pub use plcc_env::{Environment, Value};
pub use plcc_gen::GenError;
pub use plcc_int::Interpreter;
pub use plcc_util::{ParseError, SemanticError};

/// Any failure a pipeline run can surface.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Generate(#[from] GenError),
}

/// Which pipeline sink to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// Lexer output, one token per line.
    Tokens,
    /// The analyzed tree, debug-printed.
    Ast,
    /// The generated target-language program.
    Java,
    /// Interpret the program and render its result value.
    #[default]
    Run,
}

/// One driver invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source file to compile.
    pub input: PathBuf,
    /// Selected sink.
    pub emit: EmitMode,
}

/// A fresh environment carrying the default host bindings.
///
/// Currently that is `print` (one `Any` argument, returns `Nil`, emits
/// the argument's display form on stdout), aliased to
/// `System.out.println` for the generator.
pub fn default_environment() -> Environment {
    let mut env = Environment::new();
    env.define_host_function(
        "print",
        "System.out.println",
        vec![Environment::ANY],
        Environment::NIL,
        |args| {
            println!("{}", args[0]);
            Ok(Value::Nil)
        },
    )
    .expect("a fresh environment accepts the default bindings");
    env
}

/// Lex a source string.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, Error> {
    let tokens = plcc_lex::tokenize(source)?;
    debug!(tokens = tokens.len(), "lexing done");
    Ok(tokens)
}

/// Parse a source string into an un-annotated tree.
pub fn parse(source: &str) -> Result<Source, Error> {
    let ast = plcc_par::parse(source)?;
    debug!(
        fields = ast.fields.len(),
        methods = ast.methods.len(),
        "parsing done"
    );
    Ok(ast)
}

/// Parse and analyze, returning the annotated tree.
pub fn analyze(source: &str, env: &mut Environment) -> Result<Source, Error> {
    let mut ast = parse(source)?;
    plcc_sem::analyze(&mut ast, env)?;
    debug!("analysis done");
    Ok(ast)
}

/// Parse and interpret against the given root environment.
pub fn interpret(source: &str, env: Environment) -> Result<Value, Error> {
    let ast = parse(source)?;
    let value = Interpreter::new(env).evaluate(&ast)?;
    debug!(%value, "interpretation done");
    Ok(value)
}

/// Parse, analyze, and emit the target-language program.
pub fn transpile(source: &str, env: &mut Environment) -> Result<String, Error> {
    let ast = analyze(source, env)?;
    let mut out = String::new();
    plcc_gen::generate(&ast, env, &mut out)?;
    debug!(bytes = out.len(), "generation done");
    Ok(out)
}

/// Run one pipeline invocation and render its output as text.
pub fn emit(source: &str, mode: EmitMode) -> Result<String, Error> {
    match mode {
        EmitMode::Tokens => {
            let mut listing = String::new();
            for token in tokenize(source)? {
                listing.push_str(&format!(
                    "{:?} {:?} @{}\n",
                    token.kind,
                    token.lexeme,
                    token.start()
                ));
            }
            Ok(listing)
        }
        EmitMode::Ast => {
            let mut env = default_environment();
            let ast = analyze(source, &mut env)?;
            Ok(format!("{ast:#?}\n"))
        }
        EmitMode::Java => {
            let mut env = default_environment();
            let mut java = transpile(source, &mut env)?;
            java.push('\n');
            Ok(java)
        }
        EmitMode::Run => {
            let value = interpret(source, default_environment())?;
            Ok(format!("{value}\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_run_renders_result() {
        let out = emit("DEF main(): Integer DO RETURN 6 * 7; END", EmitMode::Run).unwrap();
        assert_eq!(out, "42\n");
    }

    #[test]
    fn test_emit_tokens_lists_positions() {
        let out = emit("LET x = 1;", EmitMode::Tokens).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Identifier \"LET\" @0");
        assert_eq!(lines[3], "Integer \"1\" @8");
    }

    #[test]
    fn test_emit_java_ends_with_newline() {
        let out = emit("DEF main(): Integer DO RETURN 0; END", EmitMode::Java).unwrap();
        assert!(out.starts_with("public class Main {"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_errors_carry_their_source() {
        let err = emit("\"open", EmitMode::Tokens).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let err = emit("DEF f() DO RETURN 0; END", EmitMode::Java).unwrap_err();
        assert!(matches!(err, Error::Semantic(_)));
    }
}
