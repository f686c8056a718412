use arithmetic::config::{Config, DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_NESTING};
use arithmetic::{lexer, toplevel, Interpreter};
use clap::Parser;
use colored::Colorize;
use failure::ResultExt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(
    name = "arithmetic",
    about = "Evaluates let/func arithmetic programs",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Program to evaluate; starts the interactive prompt when omitted
    file: Option<PathBuf>,

    /// Print the token sequence before evaluating
    #[arg(long)]
    tokens: bool,

    /// Print the parsed statements before evaluating
    #[arg(long)]
    ast: bool,

    /// Nested calls allowed before evaluation stops
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Parenthesis and call nesting the parser accepts
    #[arg(long, default_value_t = DEFAULT_MAX_NESTING)]
    max_nesting: usize,
}

fn run_file(cli: &Cli, file: &Path) -> Result<(), failure::Error> {
    let source = fs::read_to_string(file)
        .with_context(|_| format!("could not read {}", file.display()))?;

    let mut interpreter = Interpreter::new(Config {
        max_call_depth: cli.max_call_depth,
        max_nesting: cli.max_nesting,
    });
    let tokens = lexer::tokenize(&source)?;
    if cli.tokens {
        for (i, token) in tokens.iter().enumerate() {
            println!("Token {}: {:?}", i, token);
        }
    }
    let program = interpreter.parse(tokens)?;
    if cli.ast {
        for stmt in &program {
            println!("{:#?}", stmt);
        }
    }
    if let Some(v) = interpreter.eval(&program)? {
        println!("{}", v);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.file {
        Some(ref file) => run_file(&cli, file),
        None => toplevel::main_loop(Config {
            max_call_depth: cli.max_call_depth,
            max_nesting: cli.max_nesting,
        }),
    };
    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}
