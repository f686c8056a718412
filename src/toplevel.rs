use super::ast::Expr;
use super::config::Config;
use super::environment::Environment;
use super::error::Error;
use super::evaluator::Evaluator;
use super::lexer;
use super::parser;
use super::token::Token;
use colored::Colorize;
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Runs programs against one global scope that persists between runs.
pub struct Interpreter {
    config: Config,
    evaluator: Evaluator,
    global: Environment<'static>,
}

impl Interpreter {
    pub fn new(config: Config) -> Interpreter {
        Interpreter {
            config,
            evaluator: Evaluator::new(config),
            global: Environment::new(),
        }
    }

    pub fn parse(&self, tokens: Vec<Token>) -> Result<Vec<Expr>, Error> {
        parser::parse(tokens, &self.config)
    }

    pub fn eval(&mut self, program: &[Expr]) -> Result<Option<f64>, Error> {
        self.evaluator.run(program, &mut self.global)
    }

    /// Lexes, parses and evaluates `source`. Returns the value of the last
    /// statement, or `None` if the source holds no statements.
    pub fn run(&mut self, source: &str) -> Result<Option<f64>, Error> {
        let program = self.parse(lexer::tokenize(source)?)?;
        self.eval(&program)
    }
}

impl Default for Interpreter {
    fn default() -> Interpreter {
        Interpreter::new(Config::default())
    }
}

/// Evaluates `source` with a fresh global scope.
pub fn run(source: &str) -> Result<Option<f64>, Error> {
    Interpreter::default().run(source)
}

pub fn main_loop(config: Config) -> Result<(), failure::Error> {
    let mut editor = DefaultEditor::new()?;
    let mut interpreter = Interpreter::new(config);

    loop {
        let line = match editor.readline("ready> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line.as_str());

        match interpreter.run(&line) {
            Ok(Some(v)) => println!("{}", v),
            Ok(None) => {}
            Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
        }
    }
    debug!("leaving interactive loop");
    Ok(())
}
