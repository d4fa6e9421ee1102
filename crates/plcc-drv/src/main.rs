//! The `plcc` command-line interface.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use plcc_drv::{emit, Config, EmitMode};

#[derive(Parser)]
#[command(name = "plcc", version, about = "Compiler for the PLC language")]
struct Cli {
    /// Source file to compile.
    input: PathBuf,

    /// What to produce: lexer output, the analyzed tree, the generated
    /// target program, or (default) the interpreted result.
    #[arg(long, value_enum, default_value = "run")]
    emit: Emit,
}

#[derive(Clone, Copy, ValueEnum)]
enum Emit {
    Tokens,
    Ast,
    Java,
    Run,
}

impl From<Emit> for EmitMode {
    fn from(emit: Emit) -> Self {
        match emit {
            Emit::Tokens => EmitMode::Tokens,
            Emit::Ast => EmitMode::Ast,
            Emit::Java => EmitMode::Java,
            Emit::Run => EmitMode::Run,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config {
        input: cli.input,
        emit: cli.emit.into(),
    };

    let source = std::fs::read_to_string(&config.input)
        .with_context(|| format!("reading {}", config.input.display()))?;
    let output = emit(&source, config.emit)
        .with_context(|| format!("compiling {}", config.input.display()))?;
    print!("{output}");
    Ok(())
}
