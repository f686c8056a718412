//! A small expression language: `let` bindings, single-expression `func`
//! definitions and floating point arithmetic.
//!
//! ```
//! let value = arithmetic::run("func add(a, b) = a + b; let x = 2; add(x, 3);").unwrap();
//! assert_eq!(value, Some(5.0));
//! ```
//!
//! Function bodies resolve names through the chain of scopes active at the
//! call site, so a callee sees its caller's parameters as well as globals.

pub mod ast;
pub mod config;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod toplevel;

pub use config::Config;
pub use error::{Error, ErrorKind};
pub use toplevel::{run, Interpreter};
