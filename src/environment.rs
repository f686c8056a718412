use super::ast::Function;
use super::error::{Error, ErrorKind};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Function(Rc<Function>),
}

pub type Scope = HashMap<String, Value>;

/// A chain of scopes searched innermost first.
///
/// The head scope is owned; the rest of the chain is borrowed from the
/// caller. A call scope is pushed by building a new `Environment` on top of
/// the caller's, which stays untouched and usable again once the call scope
/// is dropped.
#[derive(Debug, Default)]
pub struct Environment<'a> {
    scope: Scope,
    parent: Option<&'a Environment<'a>>,
}

impl<'a> Environment<'a> {
    pub fn new() -> Environment<'a> {
        Environment {
            scope: Scope::new(),
            parent: None,
        }
    }

    pub fn lookup(&self, name: &str) -> Result<&Value, Error> {
        let mut env = Some(self);
        while let Some(e) = env {
            if let Some(v) = e.scope.get(name) {
                return Ok(v);
            }
            env = e.parent;
        }
        Err(Error::from(ErrorKind::UndefinedName {
            name: name.to_owned(),
        }))
    }

    /// Binds `name` in the innermost scope, replacing any earlier binding.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.scope.insert(name.into(), value);
    }

    pub fn push_call_scope(&self, bindings: Scope) -> Environment<'_> {
        Environment {
            scope: bindings,
            parent: Some(self),
        }
    }

    /// Number of scopes in the chain.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut env = self.parent;
        while let Some(e) = env {
            depth += 1;
            env = e.parent;
        }
        depth
    }
}
